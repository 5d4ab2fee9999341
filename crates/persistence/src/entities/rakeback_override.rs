//! Global rakeback override entity.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// The singleton override row. The `singleton` column carries a UNIQUE
/// constraint so a second row cannot be inserted.
#[derive(Debug, Clone, FromRow)]
pub struct RakebackOverrideEntity {
    pub id: Uuid,
    pub is_active: bool,
    pub rakeback_percentage: Decimal,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
