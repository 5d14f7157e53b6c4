//! Desktop GUI for the admin console, built on eframe/egui.

mod app;
pub mod async_job;
pub mod notifications;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::{launch, GuiApp, GuiSection};
