//! Admin session context.
//!
//! The bearer token obtained at login lives here rather than in any global
//! storage. The session is passed by reference into every request-issuing
//! component, established on login, cleared on logout, and persisted in the
//! app data directory so a restart does not force a new login. All token
//! reads go through [`Session::token`].

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SESSION_FILE: &str = "satadesk_session.json";

/// Authenticated admin session, or a signed-out placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
    signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session around an existing token. Used by tests to exercise
    /// request-issuing components without a login round-trip.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: None,
            signed_in_at: Some(Utc::now()),
        }
    }

    /// Load the persisted session, or a signed-out one if none exists.
    pub fn load() -> Self {
        let path = session_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("failed to parse session file, signing out: {}", e);
                    Self::new()
                }
            },
            Err(_) => Self::new(),
        }
    }

    /// The single accessor for the bearer token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// Record a successful login. Call [`Session::persist`] afterwards to
    /// survive a restart; kept separate so tests can establish sessions
    /// without touching the filesystem.
    pub fn establish(&mut self, token: String, username: String) {
        self.token = Some(token);
        self.username = Some(username);
        self.signed_in_at = Some(Utc::now());
    }

    /// Write the session to the app data directory.
    pub fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("failed to persist session: {}", e);
        }
    }

    /// Sign out: drop the token and remove the persisted file.
    pub fn clear(&mut self) {
        *self = Self::new();
        let path = session_path();
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("failed to remove session file: {}", e);
            }
        }
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(session_path(), json)?;
        Ok(())
    }

    /// Session file location as a display string (shown on the Overview page).
    pub fn session_path_display() -> String {
        session_path().display().to_string()
    }
}

/// App data directory, shared with settings and the audit log.
pub(crate) fn app_data_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join("satadesk");
        if !app_dir.exists() {
            let _ = fs::create_dir_all(&app_dir);
        }
        app_dir
    } else {
        PathBuf::from(".")
    }
}

fn session_path() -> PathBuf {
    app_data_dir().join(SESSION_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_signed_out() {
        let session = Session::new();
        assert!(!session.is_active());
        assert!(session.token().is_none());
        assert!(session.username().is_none());
    }

    #[test]
    fn test_with_token_is_active() {
        let session = Session::with_token("tok-123");
        assert!(session.is_active());
        assert_eq!(session.token(), Some("tok-123"));
    }

    #[test]
    fn test_establish_sets_all_fields() {
        let mut session = Session::new();
        session.establish("tok-9".to_string(), "admin".to_string());
        assert!(session.is_active());
        assert_eq!(session.token(), Some("tok-9"));
        assert_eq!(session.username(), Some("admin"));
        assert!(session.signed_in_at().is_some());
    }

    #[test]
    fn test_clear_drops_token() {
        let mut session = Session::with_token("tok");
        session.clear();
        assert!(!session.is_active());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_session_serde_round_trip() {
        let mut session = Session::new();
        session.token = Some("abc".to_string());
        session.username = Some("admin".to_string());
        session.signed_in_at = Some(Utc::now());

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.token(), Some("abc"));
        assert_eq!(back.username(), Some("admin"));
    }
}
