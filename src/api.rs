//! REST client for the Satashree admin API.
//!
//! Thin request layer: every call attaches the session's bearer token,
//! decodes the JSON envelope, and maps non-success responses to a typed
//! error carrying the server's own message verbatim when it sends one.
//! No retries, no client-side timeouts beyond reqwest defaults.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::config::Config;
use crate::models::{
    Deposit, DepositsResponse, LoginResponse, RequestStatus, Withdrawal, WithdrawalsResponse,
};
use crate::session::Session;

/// The two terminal decisions an admin can apply to a deposit transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositAction {
    Approve,
    Reject,
}

impl DepositAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositAction::Approve => "approve",
            DepositAction::Reject => "reject",
        }
    }
}

/// Failure taxonomy of the request layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status with a server-supplied `message`, surfaced
    /// verbatim to the admin.
    #[error("{message}")]
    Server {
        status: StatusCode,
        message: String,
    },

    /// Non-success HTTP status with no usable message in the body.
    #[error("request failed with HTTP {0}")]
    Http(StatusCode),

    /// Network / transport failure, including JSON decode failures.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The login succeeded at the HTTP level but returned no token.
    #[error("login failed: no token received")]
    MissingToken,
}

/// Map a non-success response to [`ApiError`], preferring the server's
/// `{"message": ...}` body.
fn error_from_parts(status: StatusCode, body: &str) -> ApiError {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            if !message.trim().is_empty() {
                return ApiError::Server {
                    status,
                    message: message.to_string(),
                };
            }
        }
    }
    ApiError::Http(status)
}

/// Authenticated client bound to one backend and one session snapshot.
///
/// Cheap to build; a fresh one is constructed for every background job so the
/// job owns its configuration and token copy outright.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config, session: &Session) -> Self {
        Self {
            http: Client::new(),
            config: config.clone(),
            token: session.token().map(str::to_string),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.config.endpoint(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Reject non-success statuses, reading the server message if present.
    async fn expect_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_parts(status, &body))
    }

    /// `POST /api/admin/login`. A 2xx response without a token is an error.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .request(Method::POST, "/api/admin/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let payload: LoginResponse = response.json().await?;
        payload.token.ok_or(ApiError::MissingToken)
    }

    /// `GET /api/admin/users-withdrawals[?status=...]`. The backend is the
    /// filtering authority; the filter is always pushed down.
    pub async fn list_withdrawals(
        &self,
        filter: Option<RequestStatus>,
    ) -> Result<Vec<Withdrawal>, ApiError> {
        let mut builder = self.request(Method::GET, "/api/admin/users-withdrawals");
        if let Some(status) = filter {
            builder = builder.query(&[("status", status.as_str())]);
        }
        let response = Self::expect_success(builder.send().await?).await?;
        let payload: WithdrawalsResponse = response.json().await?;
        tracing::debug!(
            count = payload.withdrawals.len(),
            filter = filter.map(|f| f.as_str()),
            "fetched withdrawals"
        );
        Ok(payload.withdrawals)
    }

    /// `POST /api/admin/users-withdrawals/{id}/approve`.
    pub async fn approve_withdrawal(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/admin/users-withdrawals/{}/approve", id);
        Self::expect_success(self.request(Method::POST, &path).send().await?).await?;
        Ok(())
    }

    /// `POST /api/admin/users-withdrawals/{id}/reject` with the mandatory
    /// reason. Reason validity (non-whitespace) is enforced at the UI layer.
    pub async fn reject_withdrawal(&self, id: &str, reason: &str) -> Result<(), ApiError> {
        let path = format!("/api/admin/users-withdrawals/{}/reject", id);
        let response = self
            .request(Method::POST, &path)
            .json(&json!({ "reason": reason }))
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// `GET /api/admin/transactions/deposits`. Deposits come back as one
    /// superset; status filtering happens client-side.
    pub async fn list_deposits(&self) -> Result<Vec<Deposit>, ApiError> {
        let response = self
            .request(Method::GET, "/api/admin/transactions/deposits")
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let payload: DepositsResponse = response.json().await?;
        tracing::debug!(count = payload.transactions.len(), "fetched deposits");
        Ok(payload.transactions)
    }

    /// `POST /api/admin/transactions/{id}/action` with the decision and
    /// optional admin notes.
    pub async fn deposit_action(
        &self,
        id: &str,
        action: DepositAction,
        admin_notes: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/admin/transactions/{}/action", id);
        let response = self
            .request(Method::POST, &path)
            .json(&json!({ "action": action.as_str(), "adminNotes": admin_notes }))
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// Reachability probe: any HTTP answer from the backend counts, only
    /// transport failures do not. Returns round-trip latency in ms.
    pub async fn ping(&self) -> Result<u64, ApiError> {
        let start = std::time::Instant::now();
        self.http.get(&self.config.base_url).send().await?;
        Ok(start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_surfaced_verbatim() {
        let err = error_from_parts(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Insufficient admin balance"}"#,
        );
        assert_eq!(err.to_string(), "Insufficient admin balance");
        match err {
            ApiError::Server { status, .. } => assert_eq!(status, StatusCode::BAD_REQUEST),
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        let err = error_from_parts(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");
        assert_eq!(err.to_string(), "request failed with HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_blank_message_falls_back_to_status() {
        let err = error_from_parts(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message": "  "}"#);
        assert!(matches!(err, ApiError::Http(_)));
    }

    #[test]
    fn test_json_without_message_falls_back_to_status() {
        let err = error_from_parts(StatusCode::NOT_FOUND, r#"{"error": "gone"}"#);
        assert!(matches!(err, ApiError::Http(StatusCode::NOT_FOUND)));
    }

    #[test]
    fn test_deposit_action_wire_values() {
        assert_eq!(DepositAction::Approve.as_str(), "approve");
        assert_eq!(DepositAction::Reject.as_str(), "reject");
    }

    #[test]
    fn test_client_carries_session_token() {
        let config = Config::new("http://localhost:9000");
        let session = Session::with_token("tok-test");
        let client = ApiClient::new(&config, &session);
        assert_eq!(client.token.as_deref(), Some("tok-test"));

        let signed_out = ApiClient::new(&config, &Session::new());
        assert!(signed_out.token.is_none());
    }
}
