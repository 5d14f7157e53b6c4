//! Backend endpoint configuration.
//!
//! The console talks to exactly one backend at a time. Built-in environments
//! cover the hosted production deployment and a local development server;
//! additional endpoints can be defined by the user in settings.

use anyhow::{anyhow, Result};
use std::env;
use url::Url;

/// Grouping of environments in the selector UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentKind {
    Hosted,
    Development,
}

/// A predefined backend deployment.
#[derive(Clone, Debug)]
pub struct ApiEnvironment {
    pub label: &'static str,
    pub base_url: &'static str,
    pub kind: EnvironmentKind,
}

impl ApiEnvironment {
    pub const fn new(label: &'static str, base_url: &'static str, kind: EnvironmentKind) -> Self {
        Self {
            label,
            base_url,
            kind,
        }
    }
}

use EnvironmentKind::*;

/// Built-in backend deployments.
pub const ENVIRONMENTS: &[ApiEnvironment] = &[
    ApiEnvironment::new(
        "Production",
        "https://satashreejibackend.onrender.com",
        Hosted,
    ),
    ApiEnvironment::new("Local", "http://localhost:9000", Development),
];

/// Find a built-in environment by its base URL.
pub fn find_environment(base_url: &str) -> Option<&'static ApiEnvironment> {
    ENVIRONMENTS
        .iter()
        .find(|e| e.base_url.trim_end_matches('/') == base_url.trim_end_matches('/'))
}

/// Find the index of a built-in environment by base URL.
pub fn find_environment_index(base_url: &str) -> Option<usize> {
    ENVIRONMENTS
        .iter()
        .position(|e| e.base_url.trim_end_matches('/') == base_url.trim_end_matches('/'))
}

/// Validate a user-supplied base URL: must parse and be http(s).
pub fn validate_base_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim()).map_err(|e| anyhow!("invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("unsupported URL scheme '{}'", other)),
    }
}

/// Active backend configuration handed to every request-issuing component.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Display label when the base URL is a user-defined endpoint.
    pub label_override: Option<String>,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            label_override: None,
        }
    }

    pub fn from_environment(environment: &ApiEnvironment) -> Self {
        Self::new(environment.base_url)
    }

    /// Display label for the active backend.
    pub fn environment_label(&self) -> String {
        if let Some(label) = &self.label_override {
            return label.clone();
        }
        find_environment(&self.base_url)
            .map(|e| e.label.to_string())
            .unwrap_or_else(|| "Custom".to_string())
    }

    /// Join an API path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for Config {
    /// Production backend, unless `SATADESK_API_URL` points elsewhere
    /// (picked up from the environment or a `.env` file).
    fn default() -> Self {
        if let Ok(url) = env::var("SATADESK_API_URL") {
            if validate_base_url(&url).is_ok() {
                return Self::new(url);
            }
            tracing::warn!("ignoring invalid SATADESK_API_URL: {}", url);
        }
        Self::from_environment(&ENVIRONMENTS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = Config::new("http://localhost:9000/");
        assert_eq!(
            config.endpoint("/api/admin/users-withdrawals"),
            "http://localhost:9000/api/admin/users-withdrawals"
        );
        assert_eq!(
            config.endpoint("api/admin/login"),
            "http://localhost:9000/api/admin/login"
        );
    }

    #[test]
    fn test_builtin_environment_lookup() {
        let env = find_environment("http://localhost:9000").unwrap();
        assert_eq!(env.label, "Local");
        assert_eq!(env.kind, EnvironmentKind::Development);
        assert!(find_environment("http://elsewhere:1234").is_none());
        assert_eq!(find_environment_index("http://localhost:9000/"), Some(1));
    }

    #[test]
    fn test_environment_label_prefers_override() {
        let mut config = Config::new("http://10.0.0.5:9000");
        assert_eq!(config.environment_label(), "Custom");
        config.label_override = Some("Office".to_string());
        assert_eq!(config.environment_label(), "Office");
    }

    #[test]
    fn test_environment_label_for_builtin() {
        let config = Config::from_environment(&ENVIRONMENTS[0]);
        assert_eq!(config.environment_label(), "Production");
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://satashreejibackend.onrender.com").is_ok());
        assert!(validate_base_url("http://localhost:9000").is_ok());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }
}
