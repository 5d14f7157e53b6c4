//! Deposit review screen. Deposits arrive as one superset and are filtered
//! client-side; only pending rows take an admin decision, applied through a
//! single modal with optional notes.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::{DepositModalState, GuiApp, ReviewAction};
use crate::gui::widgets::{paginator, status_badge};
use crate::models::{Deposit, RequestStatus};
use crate::utils;

struct RowView {
    id: String,
    username: String,
    email: String,
    amount: f64,
    method: String,
    status: RequestStatus,
    admin_notes: String,
    created_at: String,
    busy: bool,
}

impl RowView {
    fn from(d: &Deposit, busy: bool) -> Self {
        Self {
            id: d.id.clone(),
            username: d.user.username.clone(),
            email: d.user.email.clone(),
            amount: d.amount,
            method: d.payment_method.clone(),
            status: d.status,
            admin_notes: d.admin_notes.clone().unwrap_or_default(),
            created_at: utils::format_timestamp(d.created_at),
            busy,
        }
    }

    /// Deposits are reviewable only while pending.
    fn actionable(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

enum RowIntent {
    Approve(usize),
    Reject(usize),
}

impl GuiApp {
    pub(crate) fn view_deposits(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        self.render_section_header(ui, "Deposit Transactions");
        ui.add_space(theme.spacing_sm);

        let mut new_filter = self.deposits.filter;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Status:").color(theme.text_secondary));
            egui::ComboBox::from_id_source("deposit_filter")
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
                    !self.deposits.is_loading(),
                    theme.button_secondary("Refresh"),
                )
                .clicked()
            {
                self.start_deposits_fetch();
            }
            if self.deposits.is_loading() {
                ui.spinner();
            }
        });
        if new_filter != self.deposits.filter {
            // Filter is applied to the already-loaded list; no refetch.
            self.deposits.filter = new_filter;
            self.deposits.pager.reset();
        }
        ui.add_space(theme.spacing_sm);

        if let Some(error) = self.deposits.load_error.clone() {
            theme.frame_surface().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&error).color(theme.error));
                    if ui.add(theme.button_secondary("Retry")).clicked() {
                        self.start_deposits_fetch();
                    }
                });
            });
            ui.add_space(theme.spacing_sm);
        }

        if !self.deposits.loaded_once && self.deposits.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading deposits...").color(theme.text_secondary));
            });
            return;
        }

        let filtered = self.deposits.filtered();
        let count = filtered.len();
        let (start, end) = self.deposits.pager.window(count);
        let page_rows: Vec<RowView> = filtered[start..end]
            .iter()
            .map(|d| RowView::from(d, self.deposits.busy.is_busy(&d.id)))
            .collect();
        drop(filtered);

        let mut intent: Option<RowIntent> = None;
        theme.frame_surface().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(150.0)) // user
                .column(Column::auto().at_least(90.0)) // amount
                .column(Column::auto().at_least(100.0)) // method
                .column(Column::auto().at_least(100.0)) // status
                .column(Column::auto().at_least(140.0)) // notes
                .column(Column::auto().at_least(120.0)) // created
                .column(Column::remainder().at_least(170.0)) // actions
                .header(24.0, |mut header| {
                    for title in [
                        "User", "Amount", "Method", "Status", "Notes", "Created", "Actions",
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
                                    RichText::new("No deposit transactions found")
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
                                ui.label(&view.method);
                            });
                            row.col(|ui| {
                                status_badge(ui, &theme, view.status);
                            });
                            row.col(|ui| {
                                if view.admin_notes.is_empty() {
                                    ui.label(RichText::new("-").color(theme.text_secondary));
                                } else {
                                    ui.label(
                                        RichText::new(utils::truncate(&view.admin_notes, 32))
                                            .small()
                                            .color(theme.text_secondary),
                                    )
                                    .on_hover_text(&view.admin_notes);
                                }
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
        paginator(ui, &theme, &mut self.deposits.pager, count);

        match intent {
            Some(RowIntent::Approve(index)) => {
                let view = &page_rows[index];
                self.deposits.modal = Some(DepositModalState {
                    id: view.id.clone(),
                    username: view.username.clone(),
                    amount: view.amount,
                    action: ReviewAction::Approve,
                    notes: String::new(),
                    error: None,
                });
            }
            Some(RowIntent::Reject(index)) => {
                let view = &page_rows[index];
                self.deposits.modal = Some(DepositModalState {
                    id: view.id.clone(),
                    username: view.username.clone(),
                    amount: view.amount,
                    action: ReviewAction::Reject,
                    notes: String::new(),
                    error: None,
                });
            }
            None => {}
        }

        self.render_deposit_modal(ui);
    }

    fn render_deposit_modal(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let busy = self
            .deposits
            .modal
            .as_ref()
            .map(|m| self.deposits.busy.is_busy(&m.id))
            .unwrap_or(false);

        let mut submitted = false;
        let mut cancelled = false;

        if let Some(modal) = self.deposits.modal.as_mut() {
            let title = match modal.action {
                ReviewAction::Approve => "Approve Deposit",
                ReviewAction::Reject => "Reject Deposit",
            };
            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ui.ctx(), |ui| {
                    ui.label(format!(
                        "{} the deposit of {} for {}?",
                        match modal.action {
                            ReviewAction::Approve => "Approve",
                            ReviewAction::Reject => "Reject",
                        },
                        utils::format_inr(modal.amount),
                        modal.username
                    ));
                    if modal.action == ReviewAction::Approve {
                        ui.label(
                            RichText::new("The amount will be credited to the user's wallet.")
                                .small()
                                .color(theme.text_secondary),
                        );
                    }
                    ui.add_space(theme.spacing_sm);
                    ui.label(
                        RichText::new("Admin notes (optional)")
                            .small()
                            .color(theme.text_secondary),
                    );
                    ui.add(
                        egui::TextEdit::multiline(&mut modal.notes)
                            .desired_rows(2)
                            .desired_width(340.0),
                    );

                    if let Some(error) = &modal.error {
                        ui.add_space(theme.spacing_xs);
                        ui.label(RichText::new(error).color(theme.error).size(12.0));
                    }
                    ui.add_space(theme.spacing_md);

                    ui.horizontal(|ui| {
                        let button = match modal.action {
                            ReviewAction::Approve => theme.button_success("Confirm"),
                            ReviewAction::Reject => theme.button_danger("Confirm"),
                        };
                        if ui.add_enabled(!busy, button).clicked() {
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
            self.deposits.modal = None;
        }
        if submitted {
            let payload = self.deposits.modal.as_ref().map(|m| {
                (
                    m.id.clone(),
                    m.action,
                    m.notes.trim().to_string(),
                    format!(
                        "id={} user={} amount={} notes={}",
                        m.id,
                        m.username,
                        utils::format_inr(m.amount),
                        m.notes.trim()
                    ),
                )
            });
            if let Some((id, action, notes, detail)) = payload {
                self.start_deposit_action(id, action, notes, detail);
            }
        }
    }
}
