//! Withdrawal ledger models.
//!
//! The ledger itself is owned by the payments service; this crate only
//! reads it to join display fields onto paused withdrawals and to compute
//! volume aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a withdrawal in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl std::fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Processing => "processing",
            WithdrawalStatus::Completed => "completed",
            WithdrawalStatus::Failed => "failed",
            WithdrawalStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A withdrawal ledger row.
///
/// `withdrawal_id` is the public identifier used across services; `id` is
/// the internal row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub withdrawal_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&WithdrawalStatus::Processing).unwrap(),
            "\"processing\""
        );
        let status: WithdrawalStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, WithdrawalStatus::Cancelled);
    }

    #[test]
    fn test_status_display_matches_serde() {
        for status in [
            WithdrawalStatus::Pending,
            WithdrawalStatus::Processing,
            WithdrawalStatus::Completed,
            WithdrawalStatus::Failed,
            WithdrawalStatus::Cancelled,
        ] {
            let via_display = status.to_string();
            let via_serde = serde_json::to_string(&status).unwrap();
            assert_eq!(format!("\"{}\"", via_display), via_serde);
        }
    }
}
