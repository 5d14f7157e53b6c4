//! Reusable UI widgets shared across views.

pub mod paginator;
pub mod status_badge;

pub use paginator::paginator;
pub use status_badge::status_badge;
