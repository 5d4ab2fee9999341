//! Keyed configuration entities.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One administrator-editable configuration row.
///
/// `config_key` is the only stable identity; the JSON payload schema is
/// interpreted per key by the repository.
#[derive(Debug, Clone, FromRow)]
pub struct ConfigEntryEntity {
    pub config_key: String,
    pub config_value: serde_json::Value,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
