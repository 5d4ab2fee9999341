//! Global rakeback override models.
//!
//! A single platform-wide record that replaces the default rakeback
//! percentage, optionally only during a recurring daily clock window.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::validation::validate_percentage;
use uuid::Uuid;
use validator::Validate;

/// The global override record. At most one row exists; the singleton is
/// enforced by the storage schema, not by caller convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalRakebackOverride {
    pub id: Uuid,
    pub is_active: bool,
    pub rakeback_percentage: Decimal,
    /// Daily window start, time-of-day only. `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    /// Daily window end, time-of-day only. `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body to create the override.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOverrideRequest {
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[validate(custom(function = "validate_percentage"))]
    pub rakeback_percentage: Decimal,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Request body to update the override in place.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOverrideRequest {
    pub is_active: bool,
    #[validate(custom(function = "validate_percentage"))]
    pub rakeback_percentage: Decimal,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

fn default_is_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_defaults_active() {
        let request: CreateOverrideRequest =
            serde_json::from_str(r#"{"rakeback_percentage":"15.5"}"#).unwrap();
        assert!(request.is_active);
        assert_eq!(request.rakeback_percentage, dec!(15.5));
        assert!(request.start_time.is_none());
        assert!(request.end_time.is_none());
    }

    #[test]
    fn test_create_request_with_window() {
        let request: CreateOverrideRequest = serde_json::from_str(
            r#"{"rakeback_percentage":"20","start_time":"22:00:00","end_time":"02:00:00"}"#,
        )
        .unwrap();
        assert_eq!(
            request.start_time,
            Some(NaiveTime::from_hms_opt(22, 0, 0).unwrap())
        );
        assert_eq!(
            request.end_time,
            Some(NaiveTime::from_hms_opt(2, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_percentage_validation() {
        let request = CreateOverrideRequest {
            is_active: true,
            rakeback_percentage: dec!(150),
            start_time: None,
            end_time: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rakeback_percentage"));
    }
}
