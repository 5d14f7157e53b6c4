//! Notification entries for the toast overlay and history popup.

use chrono::{DateTime, Local};

/// Severity of a notification, used to pick the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

/// A notification with message, severity and timestamp.
#[derive(Clone)]
pub struct NotificationEntry {
    pub message: String,
    pub level: Level,
    pub timestamp: DateTime<Local>,
}

impl NotificationEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Level::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Level::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Level::Error)
    }

    fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Local::now(),
        }
    }

    pub fn time_ago(&self) -> String {
        let now = Local::now();
        let duration = now.signed_duration_since(self.timestamp);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            self.timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_just_now() {
        let entry = NotificationEntry::info("loaded");
        assert_eq!(entry.time_ago(), "just now");
    }

    #[test]
    fn test_levels() {
        assert_eq!(NotificationEntry::success("ok").level, Level::Success);
        assert_eq!(NotificationEntry::error("no").level, Level::Error);
        assert_eq!(NotificationEntry::info("hm").level, Level::Info);
    }
}
