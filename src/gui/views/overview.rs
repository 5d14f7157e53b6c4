//! Overview screen: backend status, the audit log, and storage locations.

use eframe::egui::{self, RichText};

use crate::gui::app::GuiApp;
use crate::operation_log;
use crate::session::Session;
use crate::user_settings::UserSettings;
use crate::utils;

impl GuiApp {
    pub(crate) fn view_overview(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        self.render_section_header(ui, "Overview");
        ui.add_space(theme.spacing_sm);

        // Backend status
        let mut ping_clicked = false;
        theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Backend")
                    .color(theme.text_secondary)
                    .small()
                    .strong(),
            );
            ui.add_space(theme.spacing_xs);
            ui.horizontal(|ui| {
                ui.label(RichText::new(self.config.environment_label()).strong());
                ui.label(
                    RichText::new(&self.config.base_url)
                        .small()
                        .color(theme.text_secondary),
                );
            });
            ui.add_space(theme.spacing_sm);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        self.overview.ping_job.is_none(),
                        theme.button_secondary("Check connection"),
                    )
                    .clicked()
                {
                    ping_clicked = true;
                }
                if self.overview.ping_job.is_some() {
                    ui.spinner();
                } else if let Some(latency) = self.overview.latency_ms {
                    ui.label(
                        RichText::new(format!("Reachable, {} ms", latency)).color(theme.success),
                    );
                }
            });
            if let Some(signed_in_at) = self.session.signed_in_at() {
                ui.add_space(theme.spacing_xs);
                ui.label(
                    RichText::new(format!(
                        "Signed in as {} since {}",
                        self.session.username().unwrap_or("admin"),
                        utils::format_timestamp(signed_in_at)
                    ))
                    .small()
                    .color(theme.text_secondary),
                );
            }
        });
        if ping_clicked {
            self.start_ping();
        }
        ui.add_space(theme.spacing_md);

        // Recent notifications
        theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Recent")
                    .color(theme.text_secondary)
                    .small()
                    .strong(),
            );
            ui.add_space(theme.spacing_xs);
            if self.notifications.is_empty() {
                ui.label(RichText::new("Nothing yet.").small().color(theme.text_secondary));
            } else {
                for entry in self.notifications.iter().rev().take(5) {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("[{}]", entry.time_ago()))
                                .size(11.0)
                                .color(theme.text_secondary),
                        );
                        ui.label(
                            RichText::new(&entry.message)
                                .size(12.0)
                                .color(theme.level_color(entry.level)),
                        );
                    });
                }
            }
        });
        ui.add_space(theme.spacing_md);

        // Audit log
        let mut refresh_clicked = false;
        theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Decision Log")
                        .color(theme.text_secondary)
                        .small()
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(
                            self.overview.log_view.job.is_none(),
                            theme.button_secondary("Refresh"),
                        )
                        .clicked()
                    {
                        refresh_clicked = true;
                    }
                    if self.overview.log_view.job.is_some() {
                        ui.spinner();
                    }
                });
            });
            if let Some(error) = &self.overview.log_view.error {
                ui.label(RichText::new(error).color(theme.error).size(12.0));
            }
            ui.add_space(theme.spacing_xs);

            let scroll_to_bottom = self.overview.log_view.scroll_to_bottom;
            theme.frame_surface().show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("audit_log_scroll")
                    .auto_shrink([false, false])
                    .max_height(260.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&self.overview.log_view.content)
                                .monospace()
                                .size(11.0),
                        );
                        if scroll_to_bottom {
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        }
                    });
            });
            self.overview.log_view.scroll_to_bottom = false;
        });
        if refresh_clicked {
            self.refresh_audit_log();
        }
        ui.add_space(theme.spacing_md);

        // Storage locations
        theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("About")
                    .color(theme.text_secondary)
                    .small()
                    .strong(),
            );
            ui.add_space(theme.spacing_xs);
            ui.label(format!("Satadesk v{}", env!("CARGO_PKG_VERSION")));
            ui.add_space(theme.spacing_xs);
            for (name, path) in [
                ("Session", Session::session_path_display()),
                ("Settings", UserSettings::settings_path_display()),
                ("Decision log", operation_log::log_file_path()),
            ] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(name).small().color(theme.text_secondary));
                    ui.label(RichText::new(path).small().monospace());
                });
            }
        });
    }
}
