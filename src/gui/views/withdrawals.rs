//! Withdrawal review screen: the status-filtered table, pagination, and the
//! approve / reject confirmation modals.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::{ApproveModalState, GuiApp, RejectModalState, ReviewAction};
use crate::gui::widgets::{paginator, status_badge};
use crate::models::{RequestStatus, Withdrawal};
use crate::utils;

/// Everything one table row needs, snapshotted out of the loaded list so the
/// table closure does not borrow the app state.
struct RowView {
    id: String,
    username: String,
    email: String,
    amount: f64,
    balance: f64,
    method: String,
    upi_id: String,
    mobile_number: String,
    status: RequestStatus,
    created_at: String,
    busy: bool,
}

impl RowView {
    fn from(w: &Withdrawal, busy: bool) -> Self {
        Self {
            id: w.id.clone(),
            username: w.user.username.clone(),
            email: w.user.email.clone(),
            amount: w.amount,
            balance: w.user.wallet.balance,
            method: w.payment_method.clone(),
            upi_id: w.payment_details.upi_id.clone(),
            mobile_number: w.payment_details.mobile_number.clone(),
            status: w.status,
            created_at: utils::format_timestamp(w.created_at),
            busy,
        }
    }

    /// Only requests still awaiting a decision get action buttons.
    fn actionable(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Click recorded inside the table closure, applied afterwards.
enum RowIntent {
    Approve(usize),
    Reject(usize),
}

impl GuiApp {
    pub(crate) fn view_withdrawals(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        self.render_section_header(ui, "Withdrawal Requests");
        ui.add_space(theme.spacing_sm);

        // Filter + refresh row
        let mut new_filter = self.withdrawals.filter;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Status:").color(theme.text_secondary));
            egui::ComboBox::from_id_source("withdrawal_filter")
                .selected_text(match new_filter {
                    None => "All Statuses".to_string(),
                    Some(status) => status.label().to_string(),
                })
                .width(150.0)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut new_filter, None, "All Statuses");
                    for status in RequestStatus::ALL {
                        ui.selectable_value(&mut new_filter, Some(*status), status.label());
                    }
                });

            if ui
                .add_enabled(
                    !self.withdrawals.is_loading(),
                    theme.button_secondary("Refresh"),
                )
                .clicked()
            {
                self.start_withdrawals_fetch();
            }
            if self.withdrawals.is_loading() {
                ui.spinner();
            }
        });
        if new_filter != self.withdrawals.filter {
            // New filter, new list: back to page 1 and refetch server-side.
            self.withdrawals.filter = new_filter;
            self.withdrawals.pager.reset();
            self.start_withdrawals_fetch();
        }
        ui.add_space(theme.spacing_sm);

        if let Some(error) = self.withdrawals.load_error.clone() {
            theme.frame_surface().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&error).color(theme.error));
                    if ui.add(theme.button_secondary("Retry")).clicked() {
                        self.start_withdrawals_fetch();
                    }
                });
            });
            ui.add_space(theme.spacing_sm);
        }

        if !self.withdrawals.loaded_once && self.withdrawals.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading withdrawals...").color(theme.text_secondary));
            });
            return;
        }

        // Snapshot the visible page so the table does not borrow app state.
        let count = self.withdrawals.rows.len();
        let page_rows: Vec<RowView> = self
            .withdrawals
            .pager
            .page_items(&self.withdrawals.rows)
            .iter()
            .map(|w| RowView::from(w, self.withdrawals.busy.is_busy(&w.id)))
            .collect();

        let mut intent: Option<RowIntent> = None;
        theme.frame_surface().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(150.0)) // user
                .column(Column::auto().at_least(90.0)) // amount
                .column(Column::auto().at_least(90.0)) // wallet
                .column(Column::auto().at_least(140.0)) // payout details
                .column(Column::auto().at_least(100.0)) // status
                .column(Column::auto().at_least(120.0)) // requested
                .column(Column::remainder().at_least(170.0)) // actions
                .header(24.0, |mut header| {
                    for title in [
                        "User",
                        "Amount",
                        "Wallet",
                        "Payout Details",
                        "Status",
                        "Requested",
                        "Actions",
                    ] {
                        header.col(|ui| {
                            ui.label(
                                RichText::new(title)
                                    .color(theme.text_secondary)
                                    .small()
                                    .strong(),
                            );
                        });
                    }
                })
                .body(|mut body| {
                    if page_rows.is_empty() {
                        body.row(32.0, |mut row| {
                            row.col(|ui| {
                                ui.label(
                                    RichText::new("No withdrawal requests found")
                                        .color(theme.text_secondary),
                                );
                            });
                            for _ in 0..6 {
                                row.col(|_| {});
                            }
                        });
                        return;
                    }

                    for (index, view) in page_rows.iter().enumerate() {
                        body.row(44.0, |mut row| {
                            row.col(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(RichText::new(&view.username).strong());
                                    ui.label(
                                        RichText::new(&view.email)
                                            .small()
                                            .color(theme.text_secondary),
                                    );
                                });
                            });
                            row.col(|ui| {
                                ui.label(
                                    RichText::new(utils::format_inr(view.amount))
                                        .color(theme.primary)
                                        .strong(),
                                );
                            });
                            row.col(|ui| {
                                ui.label(utils::format_inr(view.balance));
                            });
                            row.col(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(&view.method);
                                    let detail = if !view.upi_id.is_empty() {
                                        view.upi_id.as_str()
                                    } else {
                                        view.mobile_number.as_str()
                                    };
                                    if !detail.is_empty() {
                                        ui.label(
                                            RichText::new(detail)
                                                .small()
                                                .color(theme.text_secondary),
                                        );
                                    }
                                });
                            });
                            row.col(|ui| {
                                status_badge(ui, &theme, view.status);
                            });
                            row.col(|ui| {
                                ui.label(
                                    RichText::new(&view.created_at)
                                        .small()
                                        .color(theme.text_secondary),
                                );
                            });
                            row.col(|ui| {
                                if !view.actionable() {
                                    ui.label(RichText::new("-").color(theme.text_secondary));
                                } else if view.busy {
                                    ui.spinner();
                                    ui.label(
                                        RichText::new("Processing...")
                                            .small()
                                            .color(theme.text_secondary),
                                    );
                                } else {
                                    if ui.add(theme.button_success("Approve")).clicked() {
                                        intent = Some(RowIntent::Approve(index));
                                    }
                                    if ui.add(theme.button_danger("Reject")).clicked() {
                                        intent = Some(RowIntent::Reject(index));
                                    }
                                }
                            });
                        });
                    }
                });
        });

        ui.add_space(theme.spacing_sm);
        paginator(ui, &theme, &mut self.withdrawals.pager, count);

        // Clicking an action only opens a modal; nothing fires yet.
        match intent {
            Some(RowIntent::Approve(index)) => {
                let view = &page_rows[index];
                self.withdrawals.approve_modal = Some(ApproveModalState {
                    id: view.id.clone(),
                    username: view.username.clone(),
                    amount: view.amount,
                });
            }
            Some(RowIntent::Reject(index)) => {
                let view = &page_rows[index];
                self.withdrawals.reject_modal = Some(RejectModalState {
                    id: view.id.clone(),
                    username: view.username.clone(),
                    email: view.email.clone(),
                    amount: view.amount,
                    reason: String::new(),
                    error: None,
                });
            }
            None => {}
        }

        self.render_approve_modal(ui);
        self.render_reject_modal(ui);
    }

    fn render_approve_modal(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let mut confirmed = false;
        let mut cancelled = false;

        if let Some(modal) = &self.withdrawals.approve_modal {
            egui::Window::new("Approve Withdrawal")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ui.ctx(), |ui| {
                    ui.label(format!(
                        "Approve the withdrawal of {} for {}?",
                        utils::format_inr(modal.amount),
                        modal.username
                    ));
                    ui.label(
                        RichText::new("The amount will be paid out from the admin wallet.")
                            .small()
                            .color(theme.text_secondary),
                    );
                    ui.add_space(theme.spacing_md);
                    ui.horizontal(|ui| {
                        if ui.add(theme.button_success("Confirm")).clicked() {
                            confirmed = true;
                        }
                        if ui.add(theme.button_secondary("Cancel")).clicked() {
                            cancelled = true;
                        }
                    });
                });
        }

        if cancelled {
            self.withdrawals.approve_modal = None;
        }
        // The modal closes on confirm; the row spinner takes over until the
        // job resolves.
        if confirmed {
            if let Some(modal) = self.withdrawals.approve_modal.take() {
                let detail = format!(
                    "id={} user={} amount={}",
                    modal.id,
                    modal.username,
                    utils::format_inr(modal.amount)
                );
                self.start_withdrawal_action(modal.id, ReviewAction::Approve, None, detail);
            }
        }
    }

    fn render_reject_modal(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let busy = self
            .withdrawals
            .reject_modal
            .as_ref()
            .map(|m| self.withdrawals.busy.is_busy(&m.id))
            .unwrap_or(false);

        let mut submitted = false;
        let mut cancelled = false;

        if let Some(modal) = self.withdrawals.reject_modal.as_mut() {
            egui::Window::new("Reject Withdrawal")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ui.ctx(), |ui| {
                    ui.label(format!(
                        "Reject the withdrawal of {} for {} ({})?",
                        utils::format_inr(modal.amount),
                        modal.username,
                        modal.email
                    ));
                    ui.add_space(theme.spacing_sm);
                    ui.label(
                        RichText::new("Reason (required, shown to the user)")
                            .small()
                            .color(theme.text_secondary),
                    );
                    ui.add(
                        egui::TextEdit::multiline(&mut modal.reason)
                            .desired_rows(3)
                            .desired_width(340.0),
                    );

                    if let Some(error) = &modal.error {
                        ui.add_space(theme.spacing_xs);
                        ui.label(RichText::new(error).color(theme.error).size(12.0));
                    }
                    ui.add_space(theme.spacing_md);

                    ui.horizontal(|ui| {
                        let can_submit = modal.can_submit() && !busy;
                        if ui
                            .add_enabled(can_submit, theme.button_danger("Reject"))
                            .clicked()
                        {
                            submitted = true;
                        }
                        if busy {
                            ui.spinner();
                        }
                        if ui
                            .add_enabled(!busy, theme.button_secondary("Cancel"))
                            .clicked()
                        {
                            cancelled = true;
                        }
                    });
                });
        }

        if cancelled {
            self.withdrawals.reject_modal = None;
        }
        // The modal stays open while the request runs; success closes it from
        // the poll loop, failure surfaces the server message inside it.
        if submitted {
            let payload = self.withdrawals.reject_modal.as_ref().map(|m| {
                (
                    m.id.clone(),
                    m.reason.trim().to_string(),
                    format!(
                        "id={} user={} amount={} reason={}",
                        m.id,
                        m.username,
                        utils::format_inr(m.amount),
                        m.reason.trim()
                    ),
                )
            });
            if let Some((id, reason, detail)) = payload {
                self.start_withdrawal_action(id, ReviewAction::Reject, Some(reason), detail);
            }
        }
    }
}
