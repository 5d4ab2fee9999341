//! Withdrawal policy configuration documents.
//!
//! These models are the JSON payloads stored in the keyed config store
//! under the well-known keys `withdrawal_global_status`,
//! `withdrawal_thresholds` and `withdrawal_manual_review`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::validation::{validate_currency_code, validate_positive_amount};
use validator::Validate;

/// The closed set of withdrawal limit categories.
///
/// `ManualReview` is not a configured limit like the other four; it tags
/// pauses produced by the manual-review catch-all so the workbench can
/// distinguish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdCategory {
    SingleTransaction,
    UserDaily,
    HourlyVolume,
    DailyVolume,
    ManualReview,
}

impl ThresholdCategory {
    /// Stable identifier used in persisted pause rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdCategory::SingleTransaction => "single_transaction",
            ThresholdCategory::UserDaily => "user_daily",
            ThresholdCategory::HourlyVolume => "hourly_volume",
            ThresholdCategory::DailyVolume => "daily_volume",
            ThresholdCategory::ManualReview => "manual_review",
        }
    }

    /// Human-readable name used in pause reason strings.
    pub fn display_name(&self) -> &'static str {
        match self {
            ThresholdCategory::SingleTransaction => "single transaction",
            ThresholdCategory::UserDaily => "user daily",
            ThresholdCategory::HourlyVolume => "hourly volume",
            ThresholdCategory::DailyVolume => "daily volume",
            ThresholdCategory::ManualReview => "manual review",
        }
    }

    /// Parses a stored identifier back into a category.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single_transaction" => Some(ThresholdCategory::SingleTransaction),
            "user_daily" => Some(ThresholdCategory::UserDaily),
            "hourly_volume" => Some(ThresholdCategory::HourlyVolume),
            "daily_volume" => Some(ThresholdCategory::DailyVolume),
            "manual_review" => Some(ThresholdCategory::ManualReview),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThresholdCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single configured limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLimit {
    pub value: Decimal,
    pub currency: String,
    pub enabled: bool,
}

impl ThresholdLimit {
    /// A disabled limit with a zero value; used when no configuration row
    /// exists yet.
    pub fn disabled() -> Self {
        Self {
            value: Decimal::ZERO,
            currency: "USD".to_string(),
            enabled: false,
        }
    }
}

/// The four withdrawal limits, as one config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalThresholds {
    pub single_transaction: ThresholdLimit,
    pub user_daily: ThresholdLimit,
    pub hourly_volume: ThresholdLimit,
    pub daily_volume: ThresholdLimit,
}

impl WithdrawalThresholds {
    /// All limits disabled; the state before an administrator configures
    /// anything.
    pub fn all_disabled() -> Self {
        Self {
            single_transaction: ThresholdLimit::disabled(),
            user_daily: ThresholdLimit::disabled(),
            hourly_volume: ThresholdLimit::disabled(),
            daily_volume: ThresholdLimit::disabled(),
        }
    }

    /// Returns the limit configured for a category.
    ///
    /// `ManualReview` has no entry in this document; it is governed by
    /// [`ManualReviewSetting`].
    pub fn limit(&self, category: ThresholdCategory) -> Option<&ThresholdLimit> {
        match category {
            ThresholdCategory::SingleTransaction => Some(&self.single_transaction),
            ThresholdCategory::UserDaily => Some(&self.user_daily),
            ThresholdCategory::HourlyVolume => Some(&self.hourly_volume),
            ThresholdCategory::DailyVolume => Some(&self.daily_volume),
            ThresholdCategory::ManualReview => None,
        }
    }
}

/// The global withdrawal switch.
///
/// When `enabled` is false every new withdrawal request is refused with
/// the stored reason, before any per-request limit is consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalGlobalStatus {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused_at: Option<DateTime<Utc>>,
}

impl Default for WithdrawalGlobalStatus {
    fn default() -> Self {
        Self {
            enabled: true,
            reason: None,
            paused_at: None,
        }
    }
}

/// Manual-review catch-all: any withdrawal at or above `threshold_amount`
/// is paused for review, independent of the four limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualReviewSetting {
    pub enabled: bool,
    pub threshold_amount: Decimal,
    pub currency: String,
}

impl ManualReviewSetting {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            threshold_amount: Decimal::ZERO,
            currency: "USD".to_string(),
        }
    }
}

/// Admin request to update a single limit inside the thresholds document.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateThresholdLimitRequest {
    #[validate(custom(function = "validate_positive_amount"))]
    pub value: Decimal,
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
    pub enabled: bool,
}

/// Admin request to replace the thresholds document.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateWithdrawalThresholdsRequest {
    #[validate(nested)]
    pub single_transaction: UpdateThresholdLimitRequest,
    #[validate(nested)]
    pub user_daily: UpdateThresholdLimitRequest,
    #[validate(nested)]
    pub hourly_volume: UpdateThresholdLimitRequest,
    #[validate(nested)]
    pub daily_volume: UpdateThresholdLimitRequest,
}

impl UpdateWithdrawalThresholdsRequest {
    pub fn into_thresholds(self) -> WithdrawalThresholds {
        fn limit(req: UpdateThresholdLimitRequest) -> ThresholdLimit {
            ThresholdLimit {
                value: req.value,
                currency: req.currency,
                enabled: req.enabled,
            }
        }
        WithdrawalThresholds {
            single_transaction: limit(self.single_transaction),
            user_daily: limit(self.user_daily),
            hourly_volume: limit(self.hourly_volume),
            daily_volume: limit(self.daily_volume),
        }
    }
}

/// Admin request to flip the global switch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGlobalStatusRequest {
    pub enabled: bool,
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Admin request to update the manual-review setting.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateManualReviewRequest {
    pub enabled: bool,
    #[validate(custom(function = "validate_positive_amount"))]
    pub threshold_amount: Decimal,
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_serde_roundtrip() {
        for category in [
            ThresholdCategory::SingleTransaction,
            ThresholdCategory::UserDaily,
            ThresholdCategory::HourlyVolume,
            ThresholdCategory::DailyVolume,
            ThresholdCategory::ManualReview,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            let back: ThresholdCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
            assert_eq!(ThresholdCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ThresholdCategory::parse("bogus"), None);
    }

    #[test]
    fn test_thresholds_limit_lookup() {
        let mut thresholds = WithdrawalThresholds::all_disabled();
        thresholds.user_daily.value = dec!(250);
        thresholds.user_daily.enabled = true;

        let limit = thresholds.limit(ThresholdCategory::UserDaily).unwrap();
        assert!(limit.enabled);
        assert_eq!(limit.value, dec!(250));
        assert!(thresholds.limit(ThresholdCategory::ManualReview).is_none());
    }

    #[test]
    fn test_global_status_default_is_enabled() {
        let status = WithdrawalGlobalStatus::default();
        assert!(status.enabled);
        assert!(status.reason.is_none());
        assert!(status.paused_at.is_none());
    }

    #[test]
    fn test_thresholds_document_roundtrip() {
        let json = r#"{
            "single_transaction": {"value": "1000.00", "currency": "USD", "enabled": true},
            "user_daily": {"value": "2500.00", "currency": "USD", "enabled": true},
            "hourly_volume": {"value": "50000", "currency": "USD", "enabled": false},
            "daily_volume": {"value": "250000", "currency": "USD", "enabled": false}
        }"#;
        let thresholds: WithdrawalThresholds = serde_json::from_str(json).unwrap();
        assert_eq!(thresholds.single_transaction.value, dec!(1000));
        assert!(!thresholds.daily_volume.enabled);
    }

    #[test]
    fn test_update_request_validation() {
        let request = UpdateManualReviewRequest {
            enabled: true,
            threshold_amount: dec!(0),
            currency: "usd".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("threshold_amount"));
        assert!(errors.field_errors().contains_key("currency"));

        let request = UpdateManualReviewRequest {
            enabled: true,
            threshold_amount: dec!(10000),
            currency: "USD".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
