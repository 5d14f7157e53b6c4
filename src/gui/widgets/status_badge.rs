//! Colored status badge, shared by the withdrawal and deposit tables.

use eframe::egui::{self, RichText};

use crate::gui::theme::AppTheme;
use crate::models::RequestStatus;

/// Render a pill-shaped badge for a request status.
pub fn status_badge(ui: &mut egui::Ui, theme: &AppTheme, status: RequestStatus) {
    let color = theme.status_color(status);
    egui::Frame::none()
        .fill(theme.surface)
        .rounding(10.0)
        .stroke(egui::Stroke::new(1.0, color))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(status.label()).color(color).size(11.0).strong());
        });
}
