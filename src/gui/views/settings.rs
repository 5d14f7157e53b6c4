//! Settings screen: backend endpoints, table preferences, auto-refresh.

use eframe::egui::{self, RichText};

use crate::config::{self, ENVIRONMENTS};
use crate::gui::app::GuiApp;
use crate::user_settings::CustomEndpoint;

const PAGE_SIZES: &[usize] = &[10, 25, 50];
const REFRESH_CHOICES: &[(u64, &str)] = &[
    (0, "Off"),
    (15, "Every 15 seconds"),
    (30, "Every 30 seconds"),
    (60, "Every minute"),
];

impl GuiApp {
    pub(crate) fn view_settings(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        self.render_section_header(ui, "Settings");
        ui.add_space(theme.spacing_sm);

        self.render_backend_settings(ui);
        ui.add_space(theme.spacing_md);
        self.render_display_settings(ui);
        ui.add_space(theme.spacing_md);

        let mut sign_out_clicked = false;
        theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Session")
                    .color(theme.text_secondary)
                    .small()
                    .strong(),
            );
            ui.add_space(theme.spacing_xs);
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Signed in as {}",
                    self.session.username().unwrap_or("admin")
                ));
                if ui.add(theme.button_danger("Sign out")).clicked() {
                    sign_out_clicked = true;
                }
            });
        });
        if sign_out_clicked {
            self.sign_out();
        }
    }

    fn render_backend_settings(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let mut selected: Option<(String, Option<String>)> = None;
        let mut edit_endpoint: Option<CustomEndpoint> = None;
        let mut remove_endpoint: Option<String> = None;
        let mut save_endpoint = false;
        let mut cancel_edit = false;

        theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Backend")
                    .color(theme.text_secondary)
                    .small()
                    .strong(),
            );
            ui.add_space(theme.spacing_xs);

            for env in ENVIRONMENTS {
                let is_selected = self.config.base_url == env.base_url;
                ui.horizontal(|ui| {
                    if ui.selectable_label(is_selected, env.label).clicked() && !is_selected {
                        selected = Some((env.base_url.to_string(), None));
                    }
                    ui.label(
                        RichText::new(env.base_url)
                            .small()
                            .color(theme.text_secondary),
                    );
                });
            }

            if !self.user_settings.custom_endpoints.is_empty() {
                ui.add_space(theme.spacing_xs);
                ui.separator();
                ui.add_space(theme.spacing_xs);
                for endpoint in &self.user_settings.custom_endpoints {
                    let is_selected = self.config.base_url == endpoint.base_url;
                    ui.horizontal(|ui| {
                        if ui.selectable_label(is_selected, &endpoint.label).clicked()
                            && !is_selected
                        {
                            selected =
                                Some((endpoint.base_url.clone(), Some(endpoint.label.clone())));
                        }
                        ui.label(
                            RichText::new(&endpoint.base_url)
                                .small()
                                .color(theme.text_secondary),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Remove").clicked() {
                                remove_endpoint = Some(endpoint.base_url.clone());
                            }
                            if ui.small_button("Edit").clicked() {
                                edit_endpoint = Some(endpoint.clone());
                            }
                        });
                    });
                }
            }

            ui.add_space(theme.spacing_sm);
            ui.separator();
            ui.add_space(theme.spacing_xs);
            ui.label(
                RichText::new(if self.endpoint_form.editing.is_some() {
                    "Edit endpoint"
                } else {
                    "Add endpoint"
                })
                .small()
                .color(theme.text_secondary),
            );
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.endpoint_form.label)
                        .desired_width(140.0)
                        .hint_text("Label"),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.endpoint_form.base_url)
                        .desired_width(260.0)
                        .hint_text("http://host:port"),
                );
                if ui
                    .add(theme.button_secondary(if self.endpoint_form.editing.is_some() {
                        "Save"
                    } else {
                        "Add"
                    }))
                    .clicked()
                {
                    save_endpoint = true;
                }
                if self.endpoint_form.editing.is_some()
                    && ui.add(theme.button_secondary("Cancel")).clicked()
                {
                    cancel_edit = true;
                }
            });
            if let Some(error) = &self.endpoint_form.error {
                ui.label(RichText::new(error).color(theme.error).size(12.0));
            }
        });

        if let Some((base_url, label)) = selected {
            self.apply_endpoint_selection(base_url, label);
        }
        if let Some(endpoint) = edit_endpoint {
            self.endpoint_form.populate_from(&endpoint);
        }
        if cancel_edit {
            self.endpoint_form.clear();
        }
        if let Some(base_url) = remove_endpoint {
            self.user_settings.remove_custom_endpoint(&base_url);
            self.save_settings();
            // Removing the active backend falls back to production.
            if self.config.base_url == base_url {
                self.apply_endpoint_selection(ENVIRONMENTS[0].base_url.to_string(), None);
            }
        }
        if save_endpoint {
            self.submit_endpoint_form();
        }
    }

    fn submit_endpoint_form(&mut self) {
        let label = self.endpoint_form.label.trim().to_string();
        if label.is_empty() {
            self.endpoint_form.error = Some("A label is required.".to_string());
            return;
        }
        if let Err(e) = config::validate_base_url(&self.endpoint_form.base_url) {
            self.endpoint_form.error = Some(e.to_string());
            return;
        }
        // Editing under a changed URL replaces the old entry.
        if let Some(old_base_url) = self.endpoint_form.editing.clone() {
            self.user_settings.remove_custom_endpoint(&old_base_url);
        }
        let endpoint = CustomEndpoint::new(label, self.endpoint_form.base_url.trim().to_string());
        self.user_settings.upsert_custom_endpoint(endpoint);
        self.save_settings();
        self.endpoint_form.clear();
    }

    fn render_display_settings(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        theme.frame_panel().show(ui, |ui| {
            ui.label(
                RichText::new("Review Tables")
                    .color(theme.text_secondary)
                    .small()
                    .strong(),
            );
            ui.add_space(theme.spacing_xs);

            ui.horizontal(|ui| {
                ui.label("Rows per page:");
                egui::ComboBox::from_id_source("page_size")
                    .selected_text(self.settings_pending_page_size.to_string())
                    .width(80.0)
                    .show_ui(ui, |ui| {
                        for size in PAGE_SIZES {
                            ui.selectable_value(
                                &mut self.settings_pending_page_size,
                                *size,
                                size.to_string(),
                            );
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Auto-refresh:");
                let current_label = REFRESH_CHOICES
                    .iter()
                    .find(|(secs, _)| *secs == self.settings_pending_refresh_secs)
                    .map(|(_, label)| *label)
                    .unwrap_or("Off");
                egui::ComboBox::from_id_source("refresh_interval")
                    .selected_text(current_label)
                    .width(160.0)
                    .show_ui(ui, |ui| {
                        for (secs, label) in REFRESH_CHOICES {
                            ui.selectable_value(
                                &mut self.settings_pending_refresh_secs,
                                *secs,
                                *label,
                            );
                        }
                    });
            });
            ui.add_space(theme.spacing_sm);

            let dirty = self.settings_pending_page_size != self.user_settings.page_size
                || self.settings_pending_refresh_secs != self.user_settings.refresh_interval_secs;
            if ui
                .add_enabled(dirty, theme.button_primary("Save preferences"))
                .clicked()
            {
                let page_size = self.settings_pending_page_size;
                self.apply_page_size(page_size);
                self.user_settings.refresh_interval_secs = self.settings_pending_refresh_secs;
                self.save_settings();
            }
        });
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.user_settings.save() {
            self.notifications
                .push_back(crate::gui::notifications::NotificationEntry::error(format!(
                    "Failed to save settings: {}",
                    e
                )));
        }
    }
}
