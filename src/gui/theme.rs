//! Centralized theme and styling for the console.
//!
//! Dark slate surfaces with a saffron primary accent; request statuses each
//! get a fixed badge color so a status reads the same on every screen.

use eframe::egui;

use crate::models::RequestStatus;

/// Centralized theme: colors, spacing, and styled widget factories.
#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,

    // Status badge colors
    pub status_pending: egui::Color32,
    pub status_admin_pending: egui::Color32,
    pub status_completed: egui::Color32,
    pub status_failed: egui::Color32,
    pub status_cancelled: egui::Color32,
    pub status_rejected: egui::Color32,

    // Spacing constants
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,

    // Button sizes
    pub button_small: egui::Vec2,
    pub button_medium: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            background: egui::Color32::from_rgb(18, 20, 26),
            surface: egui::Color32::from_rgb(26, 29, 38),
            surface_hover: egui::Color32::from_rgb(34, 38, 50),
            surface_active: egui::Color32::from_rgb(44, 49, 64),
            panel_fill: egui::Color32::from_rgb(22, 25, 33),
            text_primary: egui::Color32::from_rgb(232, 234, 240),
            text_secondary: egui::Color32::from_rgb(148, 155, 170),

            primary: egui::Color32::from_rgb(255, 153, 51), // saffron
            secondary: egui::Color32::from_rgb(70, 76, 94),
            success: egui::Color32::from_rgb(72, 199, 116),
            warning: egui::Color32::from_rgb(255, 196, 0),
            error: egui::Color32::from_rgb(240, 82, 82),

            status_pending: egui::Color32::from_rgb(255, 196, 0),
            status_admin_pending: egui::Color32::from_rgb(255, 153, 51),
            status_completed: egui::Color32::from_rgb(72, 199, 116),
            status_failed: egui::Color32::from_rgb(240, 82, 82),
            status_cancelled: egui::Color32::from_rgb(148, 155, 170),
            status_rejected: egui::Color32::from_rgb(214, 69, 108),

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
            spacing_lg: 24.0,

            button_small: egui::vec2(84.0, 26.0),
            button_medium: egui::vec2(130.0, 34.0),
        }
    }
}

impl AppTheme {
    /// Badge color for a request status.
    pub fn status_color(&self, status: RequestStatus) -> egui::Color32 {
        match status {
            RequestStatus::Pending => self.status_pending,
            RequestStatus::AdminPending => self.status_admin_pending,
            RequestStatus::Completed => self.status_completed,
            RequestStatus::Failed => self.status_failed,
            RequestStatus::Cancelled => self.status_cancelled,
            RequestStatus::Rejected => self.status_rejected,
        }
    }

    /// Accent color for a notification level.
    pub fn level_color(&self, level: super::notifications::Level) -> egui::Color32 {
        match level {
            super::notifications::Level::Info => self.text_secondary,
            super::notifications::Level::Success => self.success,
            super::notifications::Level::Error => self.error,
        }
    }

    /// Primary action button (saffron outline).
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.text_primary)
                .strong(),
        )
        .fill(self.surface)
        .stroke(egui::Stroke::new(2.0, self.primary))
        .min_size(self.button_medium)
    }

    /// Approve-style button (green outline).
    pub fn button_success(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.text_primary)
                .strong(),
        )
        .fill(self.surface)
        .stroke(egui::Stroke::new(2.0, self.success))
        .min_size(self.button_small)
    }

    /// Reject-style button (red outline).
    pub fn button_danger(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.text_primary)
                .strong(),
        )
        .fill(self.surface)
        .stroke(egui::Stroke::new(2.0, self.error))
        .min_size(self.button_small)
    }

    /// Low-emphasis button for cancel/close actions.
    pub fn button_secondary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface)
            .stroke(egui::Stroke::new(1.0, self.secondary))
            .min_size(self.button_small)
    }

    /// Framed panel for cards/sections.
    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(6.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
    }

    /// Framed surface for inset content (log viewer, table wrapper).
    pub fn frame_surface(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(4.0)
            .inner_margin(self.spacing_sm)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
    }
}

/// Configure the egui context style with the given theme.
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.panel_fill;
    visuals.override_text_color = Some(theme.text_primary);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.secondary);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.primary);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(20.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::new(12.0, egui::FontFamily::Monospace),
    );

    ctx.set_style(style);
}
