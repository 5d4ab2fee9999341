//! Withdrawal ledger entities.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A withdrawal ledger row.
#[derive(Debug, Clone, FromRow)]
pub struct WithdrawalEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub withdrawal_id: String,
    pub amount_minor_units: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
