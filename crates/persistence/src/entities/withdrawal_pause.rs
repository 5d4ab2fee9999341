//! Pause registry entities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// One paused withdrawal. Primary key is `withdrawal_id`, so recording a
/// pause is a single-row upsert and removal is a single-row delete.
#[derive(Debug, Clone, FromRow)]
pub struct WithdrawalPauseEntity {
    pub withdrawal_id: String,
    pub pause_reason: String,
    pub paused_at: DateTime<Utc>,
    pub paused_by: Option<Uuid>,
    pub requires_review: bool,
    pub threshold_type: Option<String>,
    pub threshold_value: Option<Decimal>,
    pub notes: Option<String>,
}

/// A pause row joined against the ledger and user display fields.
#[derive(Debug, Clone, FromRow)]
pub struct PausedWithdrawalRowEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub withdrawal_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
    pub status: String,
    pub pause_reason: String,
    pub paused_at: DateTime<Utc>,
    pub paused_by: Option<Uuid>,
    pub requires_review: bool,
    pub threshold_type: Option<String>,
    pub threshold_value: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Aggregates over the pause set, computed in SQL.
#[derive(Debug, Clone, FromRow)]
pub struct WithdrawalPauseStatsEntity {
    pub total_paused: i64,
    pub pending_review: i64,
    pub paused_today: i64,
    pub paused_this_hour: i64,
    pub total_paused_amount_minor_units: i64,
}
