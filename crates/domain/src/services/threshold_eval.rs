//! Pure threshold evaluation.
//!
//! Decides, for one limit category at a time, whether an observed amount
//! violates the configured limit. All comparisons use decimal arithmetic;
//! accumulated volumes never pass through floating point.

use rust_decimal::Decimal;
use shared::money::format_amount;

use crate::models::thresholds::{
    ManualReviewSetting, ThresholdCategory, ThresholdLimit, WithdrawalGlobalStatus,
};

/// Outcome of evaluating one limit.
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdVerdict {
    Pass,
    Exceeded { reason: String },
}

impl ThresholdVerdict {
    pub fn is_exceeded(&self) -> bool {
        matches!(self, ThresholdVerdict::Exceeded { .. })
    }
}

/// Reason used when the global switch is off but no reason was stored.
const DEFAULT_DISABLED_REASON: &str = "Withdrawals are currently disabled";

/// Checks the global switch. Returns the refusal reason when withdrawals
/// are disabled, `None` when they may proceed.
pub fn global_status_refusal(status: &WithdrawalGlobalStatus) -> Option<String> {
    if status.enabled {
        return None;
    }
    Some(
        status
            .reason
            .clone()
            .unwrap_or_else(|| DEFAULT_DISABLED_REASON.to_string()),
    )
}

/// Evaluates one configured limit against an observed decimal amount.
///
/// For `SingleTransaction` the observed amount is the request amount; for
/// the aggregate categories it is the already-summed volume including the
/// current request. A disabled limit always passes. Violation is strict:
/// an amount exactly at the limit passes.
pub fn evaluate_limit(
    category: ThresholdCategory,
    observed: Decimal,
    observed_currency: &str,
    limit: &ThresholdLimit,
) -> ThresholdVerdict {
    if !limit.enabled {
        return ThresholdVerdict::Pass;
    }

    if observed > limit.value {
        ThresholdVerdict::Exceeded {
            reason: format!(
                "Withdrawal amount {} {} exceeds {} threshold of {} {}",
                format_amount(observed),
                observed_currency,
                category.display_name(),
                format_amount(limit.value),
                limit.currency
            ),
        }
    } else {
        ThresholdVerdict::Pass
    }
}

/// Evaluates the manual-review catch-all. The boundary is inclusive: an
/// amount exactly at the configured threshold requires review.
pub fn manual_review_verdict(
    amount: Decimal,
    currency: &str,
    setting: &ManualReviewSetting,
) -> ThresholdVerdict {
    if !setting.enabled {
        return ThresholdVerdict::Pass;
    }

    if amount >= setting.threshold_amount {
        ThresholdVerdict::Exceeded {
            reason: format!(
                "Withdrawal amount {} {} requires manual review (threshold: {} {})",
                format_amount(amount),
                currency,
                format_amount(setting.threshold_amount),
                setting.currency
            ),
        }
    } else {
        ThresholdVerdict::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn limit(value: Decimal, enabled: bool) -> ThresholdLimit {
        ThresholdLimit {
            value,
            currency: "USD".to_string(),
            enabled,
        }
    }

    #[test]
    fn test_disabled_limit_always_passes() {
        let verdict = evaluate_limit(
            ThresholdCategory::SingleTransaction,
            dec!(1000000),
            "USD",
            &limit(dec!(1), false),
        );
        assert_eq!(verdict, ThresholdVerdict::Pass);
    }

    #[test]
    fn test_amount_over_limit_is_exceeded() {
        let verdict = evaluate_limit(
            ThresholdCategory::SingleTransaction,
            dec!(1500.00),
            "USD",
            &limit(dec!(1000), true),
        );
        match verdict {
            ThresholdVerdict::Exceeded { reason } => {
                assert_eq!(
                    reason,
                    "Withdrawal amount 1500.00 USD exceeds single transaction threshold of 1000.00 USD"
                );
            }
            ThresholdVerdict::Pass => panic!("expected exceeded"),
        }
    }

    #[test]
    fn test_amount_at_limit_passes() {
        // The four limits are strict: equality does not violate.
        let verdict = evaluate_limit(
            ThresholdCategory::UserDaily,
            dec!(1000),
            "USD",
            &limit(dec!(1000), true),
        );
        assert_eq!(verdict, ThresholdVerdict::Pass);
    }

    #[test]
    fn test_amount_under_limit_passes() {
        let verdict = evaluate_limit(
            ThresholdCategory::DailyVolume,
            dec!(999.99),
            "USD",
            &limit(dec!(1000), true),
        );
        assert_eq!(verdict, ThresholdVerdict::Pass);
    }

    #[test]
    fn test_aggregate_reason_names_category() {
        let verdict = evaluate_limit(
            ThresholdCategory::HourlyVolume,
            dec!(50000.50),
            "USD",
            &limit(dec!(50000), true),
        );
        match verdict {
            ThresholdVerdict::Exceeded { reason } => {
                assert!(reason.contains("hourly volume"));
                assert!(reason.contains("50000.50"));
                assert!(reason.contains("50000.00"));
            }
            ThresholdVerdict::Pass => panic!("expected exceeded"),
        }
    }

    #[test]
    fn test_decimal_sum_does_not_drift() {
        // A long run of cent-sized additions stays exact, so a volume one
        // cent under the limit still passes.
        let mut volume = Decimal::ZERO;
        for _ in 0..1000 {
            volume += dec!(0.10);
        }
        assert_eq!(volume, dec!(100.00));
        let verdict = evaluate_limit(
            ThresholdCategory::HourlyVolume,
            volume,
            "USD",
            &limit(dec!(100.00), true),
        );
        assert_eq!(verdict, ThresholdVerdict::Pass);
    }

    #[test]
    fn test_global_status_refusal() {
        let enabled = WithdrawalGlobalStatus::default();
        assert!(global_status_refusal(&enabled).is_none());

        let disabled = WithdrawalGlobalStatus {
            enabled: false,
            reason: Some("Hourly volume threshold exceeded".to_string()),
            paused_at: None,
        };
        assert_eq!(
            global_status_refusal(&disabled).as_deref(),
            Some("Hourly volume threshold exceeded")
        );
    }

    #[test]
    fn test_global_status_refusal_fallback_reason() {
        let disabled = WithdrawalGlobalStatus {
            enabled: false,
            reason: None,
            paused_at: None,
        };
        assert_eq!(
            global_status_refusal(&disabled).as_deref(),
            Some("Withdrawals are currently disabled")
        );
    }

    #[test]
    fn test_manual_review_inclusive_boundary() {
        let setting = ManualReviewSetting {
            enabled: true,
            threshold_amount: dec!(10000),
            currency: "USD".to_string(),
        };

        // Exactly at the threshold requires review.
        assert!(manual_review_verdict(dec!(10000), "USD", &setting).is_exceeded());
        assert!(manual_review_verdict(dec!(10000.01), "USD", &setting).is_exceeded());
        assert!(!manual_review_verdict(dec!(9999.99), "USD", &setting).is_exceeded());
    }

    #[test]
    fn test_manual_review_disabled_passes() {
        let setting = ManualReviewSetting::disabled();
        assert!(!manual_review_verdict(dec!(1000000), "USD", &setting).is_exceeded());
    }

    #[test]
    fn test_manual_review_reason_wording() {
        let setting = ManualReviewSetting {
            enabled: true,
            threshold_amount: dec!(5000),
            currency: "USD".to_string(),
        };
        match manual_review_verdict(dec!(7500.25), "USD", &setting) {
            ThresholdVerdict::Exceeded { reason } => {
                assert_eq!(
                    reason,
                    "Withdrawal amount 7500.25 USD requires manual review (threshold: 5000.00 USD)"
                );
            }
            ThresholdVerdict::Pass => panic!("expected exceeded"),
        }
    }
}
