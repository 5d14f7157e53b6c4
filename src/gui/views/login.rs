//! Sign-in screen, shown whenever no session token is held.

use eframe::egui::{self, RichText};

use crate::config::ENVIRONMENTS;
use crate::gui::app::GuiApp;

impl GuiApp {
    pub(crate) fn view_login(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let theme = self.theme;
            ui.add_space(90.0);
            ui.vertical_centered(|ui| {
                ui.heading(
                    RichText::new("SATADESK")
                        .size(30.0)
                        .color(theme.primary)
                        .strong(),
                );
                ui.label(
                    RichText::new("Satashree Admin Console")
                        .size(14.0)
                        .color(theme.text_secondary),
                );
                ui.add_space(theme.spacing_lg);

                let mut submit = false;
                let mut selected_env: Option<String> = None;

                theme.frame_panel().show(ui, |ui| {
                    ui.set_width(340.0);

                    ui.label(RichText::new("Backend").color(theme.text_secondary).small());
                    egui::ComboBox::from_id_source("login_endpoint")
                        .selected_text(self.config.environment_label())
                        .width(320.0)
                        .show_ui(ui, |ui| {
                            for env in ENVIRONMENTS {
                                let is_selected = self.config.base_url == env.base_url;
                                if ui.selectable_label(is_selected, env.label).clicked()
                                    && !is_selected
                                {
                                    selected_env = Some(env.base_url.to_string());
                                }
                            }
                        });
                    ui.add_space(theme.spacing_sm);

                    ui.label(RichText::new("Username").color(theme.text_secondary).small());
                    ui.add(
                        egui::TextEdit::singleline(&mut self.login.username)
                            .desired_width(320.0)
                            .hint_text("admin username"),
                    );
                    ui.add_space(theme.spacing_sm);

                    ui.label(RichText::new("Password").color(theme.text_secondary).small());
                    let password_response = ui.add(
                        egui::TextEdit::singleline(&mut self.login.password)
                            .desired_width(320.0)
                            .password(true),
                    );
                    if password_response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                    {
                        submit = true;
                    }
                    ui.add_space(theme.spacing_md);

                    if let Some(error) = &self.login.error {
                        ui.label(RichText::new(error).color(theme.error).size(12.0));
                        ui.add_space(theme.spacing_sm);
                    }

                    ui.horizontal(|ui| {
                        if ui
                            .add_enabled(self.login.can_submit(), theme.button_primary("Sign in"))
                            .clicked()
                        {
                            submit = true;
                        }
                        if self.login.job.is_some() {
                            ui.spinner();
                            ui.label(
                                RichText::new("Signing in...")
                                    .color(theme.text_secondary)
                                    .small(),
                            );
                        }
                    });
                });

                if let Some(base_url) = selected_env {
                    self.apply_endpoint_selection(base_url, None);
                }
                if submit {
                    self.start_login();
                }
            });
        });
    }
}
