//! Pause registry models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::thresholds::ThresholdCategory;

/// Everything needed to record a pause for one withdrawal.
#[derive(Debug, Clone)]
pub struct PauseWithdrawalInput {
    pub withdrawal_id: String,
    pub reason: String,
    pub paused_by: Option<Uuid>,
    pub requires_review: bool,
    pub threshold_type: Option<ThresholdCategory>,
    pub threshold_value: Option<Decimal>,
    pub notes: Option<String>,
}

impl PauseWithdrawalInput {
    /// A pause raised by the processor itself (no admin actor).
    pub fn system(
        withdrawal_id: impl Into<String>,
        reason: impl Into<String>,
        threshold_type: Option<ThresholdCategory>,
        threshold_value: Option<Decimal>,
    ) -> Self {
        Self {
            withdrawal_id: withdrawal_id.into(),
            reason: reason.into(),
            paused_by: None,
            requires_review: true,
            threshold_type,
            threshold_value,
            notes: None,
        }
    }
}

/// A paused withdrawal joined against the ledger for the admin workbench.
#[derive(Debug, Clone, Serialize)]
pub struct PausedWithdrawal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub withdrawal_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
    pub status: String,
    pub pause_reason: String,
    pub paused_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused_by: Option<Uuid>,
    pub requires_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_type: Option<ThresholdCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Aggregate view of the pause set relative to "now".
#[derive(Debug, Clone, Default, Serialize)]
pub struct WithdrawalPauseStats {
    pub total_paused: i64,
    pub pending_review: i64,
    pub paused_today: i64,
    pub paused_this_hour: i64,
    pub total_paused_amount_minor_units: i64,
}

/// Admin decision on a paused withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approved,
    Rejected,
}

/// Request body for the review endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WithdrawalReviewRequest {
    pub action: ReviewAction,
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// Request body for an admin-initiated pause.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PauseWithdrawalRequest {
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
    #[serde(default = "default_requires_review")]
    pub requires_review: bool,
    pub threshold_type: Option<ThresholdCategory>,
    pub threshold_value: Option<Decimal>,
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

fn default_requires_review() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_system_pause_input_has_no_actor() {
        let input = PauseWithdrawalInput::system(
            "wd-123",
            "limit exceeded",
            Some(ThresholdCategory::SingleTransaction),
            Some(dec!(1500)),
        );
        assert_eq!(input.withdrawal_id, "wd-123");
        assert!(input.paused_by.is_none());
        assert!(input.requires_review);
        assert_eq!(
            input.threshold_type,
            Some(ThresholdCategory::SingleTransaction)
        );
    }

    #[test]
    fn test_review_request_deserialization() {
        let request: WithdrawalReviewRequest =
            serde_json::from_str(r#"{"action":"approved","notes":"checked with payments"}"#)
                .unwrap();
        assert_eq!(request.action, ReviewAction::Approved);
        assert_eq!(request.notes.as_deref(), Some("checked with payments"));

        let request: WithdrawalReviewRequest =
            serde_json::from_str(r#"{"action":"rejected"}"#).unwrap();
        assert_eq!(request.action, ReviewAction::Rejected);
        assert!(request.notes.is_none());
    }

    #[test]
    fn test_pause_request_defaults_to_requires_review() {
        let request: PauseWithdrawalRequest =
            serde_json::from_str(r#"{"reason":"manual hold"}"#).unwrap();
        assert!(request.requires_review);
    }

    #[test]
    fn test_pause_request_validation() {
        let request = PauseWithdrawalRequest {
            reason: String::new(),
            requires_review: true,
            threshold_type: None,
            threshold_value: None,
            notes: None,
        };
        assert!(request.validate().is_err());
    }
}
