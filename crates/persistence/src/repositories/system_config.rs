//! Keyed configuration repository.
//!
//! The `system_config` table is the source of truth for all tunable policy
//! values. Each well-known key stores a JSON document whose schema is fixed
//! per key; this repository owns the typed accessors for the withdrawal
//! policy documents.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::thresholds::{
    ManualReviewSetting, WithdrawalGlobalStatus, WithdrawalThresholds,
};
use domain::services::{ConfigStore, StoreError};

use crate::entities::ConfigEntryEntity;
use crate::metrics::QueryTimer;

/// Well-known configuration keys.
pub mod keys {
    pub const WITHDRAWAL_GLOBAL_STATUS: &str = "withdrawal_global_status";
    pub const WITHDRAWAL_THRESHOLDS: &str = "withdrawal_thresholds";
    pub const WITHDRAWAL_MANUAL_REVIEW: &str = "withdrawal_manual_review";
}

/// Repository for the keyed configuration store.
#[derive(Clone)]
pub struct SystemConfigRepository {
    pool: PgPool,
}

impl SystemConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a configuration row by key. A missing row is `None`, not an
    /// error; interpretation is up to the typed accessor.
    pub async fn get(&self, config_key: &str) -> Result<Option<ConfigEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("config_get");
        let result = sqlx::query_as::<_, ConfigEntryEntity>(
            r#"
            SELECT config_key, config_value, updated_by, created_at, updated_at
            FROM system_config
            WHERE config_key = $1
            "#,
        )
        .bind(config_key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert a configuration value, stamping the editing actor.
    pub async fn set(
        &self,
        config_key: &str,
        config_value: serde_json::Value,
        updated_by: Option<Uuid>,
    ) -> Result<ConfigEntryEntity, sqlx::Error> {
        let timer = QueryTimer::new("config_set");
        let result = sqlx::query_as::<_, ConfigEntryEntity>(
            r#"
            INSERT INTO system_config (config_key, config_value, updated_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (config_key) DO UPDATE
            SET config_value = $2, updated_by = $3, updated_at = NOW()
            RETURNING config_key, config_value, updated_by, created_at, updated_at
            "#,
        )
        .bind(config_key)
        .bind(config_value)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deserializes a config payload, or fails naming the offending key.
    ///
    /// A malformed payload is a hard error: it must never read as "feature
    /// disabled" or "threshold not exceeded".
    fn decode<T: serde::de::DeserializeOwned>(
        key: &str,
        value: serde_json::Value,
    ) -> Result<T, StoreError> {
        serde_json::from_value(value).map_err(|e| StoreError::MalformedConfig {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_document<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.get(key).await? {
            Some(entry) => Ok(Some(Self::decode(key, entry.config_value)?)),
            None => Ok(None),
        }
    }

    /// Update the thresholds document.
    pub async fn set_withdrawal_thresholds(
        &self,
        thresholds: &WithdrawalThresholds,
        updated_by: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(thresholds).map_err(|e| StoreError::MalformedConfig {
                key: keys::WITHDRAWAL_THRESHOLDS.to_string(),
                reason: e.to_string(),
            })?;
        self.set(keys::WITHDRAWAL_THRESHOLDS, value, updated_by)
            .await?;
        Ok(())
    }

    /// Update the manual-review document.
    pub async fn set_withdrawal_manual_review(
        &self,
        setting: &ManualReviewSetting,
        updated_by: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(setting).map_err(|e| StoreError::MalformedConfig {
            key: keys::WITHDRAWAL_MANUAL_REVIEW.to_string(),
            reason: e.to_string(),
        })?;
        self.set(keys::WITHDRAWAL_MANUAL_REVIEW, value, updated_by)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ConfigStore for SystemConfigRepository {
    /// A missing status row means withdrawals were never paused: enabled.
    async fn withdrawal_global_status(&self) -> Result<WithdrawalGlobalStatus, StoreError> {
        Ok(self
            .get_document(keys::WITHDRAWAL_GLOBAL_STATUS)
            .await?
            .unwrap_or_default())
    }

    async fn set_withdrawal_global_status(
        &self,
        status: &WithdrawalGlobalStatus,
        updated_by: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(status).map_err(|e| StoreError::MalformedConfig {
            key: keys::WITHDRAWAL_GLOBAL_STATUS.to_string(),
            reason: e.to_string(),
        })?;
        self.set(keys::WITHDRAWAL_GLOBAL_STATUS, value, updated_by)
            .await?;
        Ok(())
    }

    /// A missing thresholds row means nothing is configured: every limit
    /// disabled.
    async fn withdrawal_thresholds(&self) -> Result<WithdrawalThresholds, StoreError> {
        Ok(self
            .get_document(keys::WITHDRAWAL_THRESHOLDS)
            .await?
            .unwrap_or_else(WithdrawalThresholds::all_disabled))
    }

    async fn withdrawal_manual_review(&self) -> Result<ManualReviewSetting, StoreError> {
        Ok(self
            .get_document(keys::WITHDRAWAL_MANUAL_REVIEW)
            .await?
            .unwrap_or_else(ManualReviewSetting::disabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_malformed_payload_names_key() {
        let result: Result<WithdrawalGlobalStatus, _> = SystemConfigRepository::decode(
            keys::WITHDRAWAL_GLOBAL_STATUS,
            json!({"enabled": "not-a-bool"}),
        );
        match result {
            Err(StoreError::MalformedConfig { key, .. }) => {
                assert_eq!(key, "withdrawal_global_status");
            }
            other => panic!("expected MalformedConfig, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_decode_valid_payload() {
        let status: WithdrawalGlobalStatus = SystemConfigRepository::decode(
            keys::WITHDRAWAL_GLOBAL_STATUS,
            json!({"enabled": false, "reason": "maintenance"}),
        )
        .unwrap();
        assert!(!status.enabled);
        assert_eq!(status.reason.as_deref(), Some("maintenance"));
    }
}
