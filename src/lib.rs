//! Satadesk - native admin review console for the Satashree wagering
//! platform.
//!
//! All data lives behind the platform's REST API; this crate is the
//! client-side review workflow: authenticated list loading, status-filtered
//! paginated tables, and approve/reject decisions with per-row in-flight
//! guards.

pub mod api;
pub mod config;
pub mod gui;
pub mod inflight;
pub mod models;
pub mod operation_log;
pub mod paging;
pub mod session;
pub mod user_settings;
pub mod utils;
