//! User settings that persist between sessions.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::session::app_data_dir;

const SETTINGS_FILE: &str = "satadesk_settings.json";

/// A user-defined backend endpoint, for deployments not in the built-in list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomEndpoint {
    /// Display name for the endpoint
    pub label: String,
    /// Base URL, http(s) only
    pub base_url: String,
}

impl CustomEndpoint {
    pub fn new(label: String, base_url: String) -> Self {
        Self {
            label,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn default_base_url() -> String {
    crate::config::ENVIRONMENTS[0].base_url.to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_refresh_interval() -> u64 {
    0 // auto-refresh off
}

fn default_custom_endpoints() -> Vec<CustomEndpoint> {
    Vec::new()
}

/// Persisted console preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// Base URL of the selected backend
    #[serde(default = "default_base_url")]
    pub selected_base_url: String,
    /// Rows per page in the review tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Auto-refresh interval for review lists in seconds (0 = off)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// User-defined backend endpoints
    #[serde(default = "default_custom_endpoints")]
    pub custom_endpoints: Vec<CustomEndpoint>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            selected_base_url: default_base_url(),
            page_size: default_page_size(),
            refresh_interval_secs: default_refresh_interval(),
            custom_endpoints: default_custom_endpoints(),
        }
    }
}

impl UserSettings {
    fn settings_path() -> PathBuf {
        app_data_dir().join(SETTINGS_FILE)
    }

    /// Settings file location as a display string.
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Load settings, falling back to defaults when missing or unreadable.
    pub fn load() -> Self {
        let path = Self::settings_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("failed to parse settings, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::settings_path(), json)?;
        Ok(())
    }

    /// Look up a custom endpoint by base URL.
    pub fn get_custom_endpoint(&self, base_url: &str) -> Option<&CustomEndpoint> {
        let wanted = base_url.trim_end_matches('/');
        self.custom_endpoints
            .iter()
            .find(|e| e.base_url.trim_end_matches('/') == wanted)
    }

    /// Add or replace (by base URL) a custom endpoint.
    pub fn upsert_custom_endpoint(&mut self, endpoint: CustomEndpoint) {
        if let Some(existing) = self
            .custom_endpoints
            .iter_mut()
            .find(|e| e.base_url == endpoint.base_url)
        {
            *existing = endpoint;
        } else {
            self.custom_endpoints.push(endpoint);
        }
    }

    pub fn remove_custom_endpoint(&mut self, base_url: &str) {
        self.custom_endpoints.retain(|e| e.base_url != base_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.refresh_interval_secs, 0);
        assert_eq!(
            settings.selected_base_url,
            "https://satashreejibackend.onrender.com"
        );
        assert!(settings.custom_endpoints.is_empty());
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        // Older settings files without the newer keys still load.
        let settings: UserSettings =
            serde_json::from_str(r#"{"selected_base_url": "http://localhost:9000"}"#).unwrap();
        assert_eq!(settings.selected_base_url, "http://localhost:9000");
        assert_eq!(settings.page_size, 10);
    }

    #[test]
    fn test_custom_endpoint_upsert_and_lookup() {
        let mut settings = UserSettings::default();
        settings.upsert_custom_endpoint(CustomEndpoint::new(
            "Office".to_string(),
            "http://10.0.0.5:9000/".to_string(),
        ));
        assert_eq!(settings.custom_endpoints.len(), 1);
        let found = settings.get_custom_endpoint("http://10.0.0.5:9000").unwrap();
        assert_eq!(found.label, "Office");

        // Upsert with the same base URL replaces instead of duplicating.
        settings.upsert_custom_endpoint(CustomEndpoint::new(
            "Office LAN".to_string(),
            "http://10.0.0.5:9000".to_string(),
        ));
        assert_eq!(settings.custom_endpoints.len(), 1);
        assert_eq!(settings.custom_endpoints[0].label, "Office LAN");
    }

    #[test]
    fn test_remove_custom_endpoint() {
        let mut settings = UserSettings::default();
        settings.upsert_custom_endpoint(CustomEndpoint::new(
            "Office".to_string(),
            "http://10.0.0.5:9000".to_string(),
        ));
        settings.remove_custom_endpoint("http://10.0.0.5:9000");
        assert!(settings.custom_endpoints.is_empty());
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let mut settings = UserSettings::default();
        settings.page_size = 25;
        settings.refresh_interval_secs = 30;
        let json = serde_json::to_string(&settings).unwrap();
        let back: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.page_size, 25);
        assert_eq!(back.refresh_interval_secs, 30);
    }
}
