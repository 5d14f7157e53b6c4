//! Wire types for the Satashree admin REST API.
//!
//! Everything here is server-sourced and read-only on the client side: status
//! transitions are requested through the API and the resulting value is
//! re-read, never predicted locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a financial request, shared by list loaders, the
/// filter dropdowns and the badge renderer.
///
/// The server owns this enumeration; an unrecognized string fails
/// deserialization instead of leaking into the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    AdminPending,
    Completed,
    Failed,
    Cancelled,
    Rejected,
}

impl RequestStatus {
    /// All statuses, in the order the filter dropdown presents them.
    pub const ALL: &'static [RequestStatus] = &[
        RequestStatus::Pending,
        RequestStatus::AdminPending,
        RequestStatus::Completed,
        RequestStatus::Failed,
        RequestStatus::Cancelled,
        RequestStatus::Rejected,
    ];

    /// The wire value, also used as the `?status=` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::AdminPending => "admin_pending",
            RequestStatus::Completed => "completed",
            RequestStatus::Failed => "failed",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Human-readable label for badges and dropdowns.
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::AdminPending => "Admin Pending",
            RequestStatus::Completed => "Completed",
            RequestStatus::Failed => "Failed",
            RequestStatus::Cancelled => "Cancelled",
            RequestStatus::Rejected => "Rejected",
        }
    }

    /// Whether no further admin action is expected for this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed
                | RequestStatus::Failed
                | RequestStatus::Cancelled
                | RequestStatus::Rejected
        )
    }
}

/// Wallet totals as of the time the list was fetched, not necessarily live.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub balance: f64,
    #[serde(default)]
    pub total_deposits: f64,
    #[serde(default)]
    pub total_withdrawals: f64,
    #[serde(default)]
    pub total_winnings: f64,
    #[serde(default)]
    pub commission: f64,
}

/// The requesting user attached to a withdrawal row.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub wallet: WalletSnapshot,
}

/// Payout coordinates supplied by the user at request time. Free-form text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub upi_id: String,
}

/// A user's ask to move funds out of their platform wallet, awaiting an
/// admin decision.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: WithdrawalUser,
    pub amount: f64,
    pub status: RequestStatus,
    pub payment_method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub payment_details: PaymentDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Envelope of the withdrawal list endpoint.
#[derive(Debug, Deserialize)]
pub struct WithdrawalsResponse {
    #[serde(default)]
    pub message: String,
    pub withdrawals: Vec<Withdrawal>,
}

/// Slim user reference on deposit rows (no wallet snapshot there).
#[derive(Debug, Clone, Deserialize)]
pub struct DepositUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
}

/// A deposit transaction pending (or past) admin review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: DepositUser,
    pub amount: f64,
    pub status: RequestStatus,
    pub payment_method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Envelope of the deposit list endpoint.
#[derive(Debug, Deserialize)]
pub struct DepositsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub message: String,
    pub transactions: Vec<Deposit>,
}

/// Successful login payload. A 2xx response without a token is treated as a
/// failed login by the caller.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values_round_trip() {
        for status in RequestStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: RequestStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *status);
        }
    }

    #[test]
    fn test_admin_pending_is_snake_case() {
        let parsed: RequestStatus = serde_json::from_str("\"admin_pending\"").unwrap();
        assert_eq!(parsed, RequestStatus::AdminPending);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let parsed: Result<RequestStatus, _> = serde_json::from_str("\"refunded\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::AdminPending.is_terminal());
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Failed.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_withdrawal_deserializes_from_server_shape() {
        let body = r#"{
            "message": "Withdrawals fetched",
            "withdrawals": [{
                "_id": "67f1a2",
                "user": {
                    "_id": "u-991",
                    "username": "ravi",
                    "email": "ravi@example.com",
                    "wallet": {
                        "balance": 1520.5,
                        "totalDeposits": 9000,
                        "totalWithdrawals": 4200,
                        "totalWinnings": 1800,
                        "commission": 120
                    }
                },
                "type": "withdrawal",
                "amount": 500,
                "status": "admin_pending",
                "paymentMethod": "upi",
                "description": "payout request",
                "paymentDetails": {
                    "mobileNumber": "9876543210",
                    "upiId": "ravi@okbank"
                },
                "createdAt": "2025-03-14T10:22:05.120Z",
                "updatedAt": "2025-03-14T10:22:05.120Z"
            }]
        }"#;

        let parsed: WithdrawalsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.withdrawals.len(), 1);
        let w = &parsed.withdrawals[0];
        assert_eq!(w.id, "67f1a2");
        assert_eq!(w.user.username, "ravi");
        assert_eq!(w.user.wallet.total_deposits, 9000.0);
        assert_eq!(w.status, RequestStatus::AdminPending);
        assert_eq!(w.payment_details.upi_id, "ravi@okbank");
    }

    #[test]
    fn test_deposit_deserializes_with_optional_fields_missing() {
        let body = r#"{
            "success": true,
            "count": 1,
            "message": "ok",
            "transactions": [{
                "_id": "d-17",
                "user": {"_id": "u-2", "username": "meena", "email": "m@example.com"},
                "amount": 250,
                "status": "pending",
                "paymentMethod": "razorpay",
                "createdAt": "2025-02-01T08:00:00Z",
                "updatedAt": "2025-02-01T08:00:00Z"
            }]
        }"#;

        let parsed: DepositsResponse = serde_json::from_str(body).unwrap();
        let d = &parsed.transactions[0];
        assert_eq!(d.status, RequestStatus::Pending);
        assert!(d.admin_notes.is_none());
        assert!(d.processed_at.is_none());
    }
}
