//! Per-section view rendering. Each view is an `impl GuiApp` block so the
//! app struct owns all state and views stay plain functions over it.

mod deposits;
mod login;
mod overview;
mod settings;
mod withdrawals;
