//! Storage seams between the decision logic and the persistence crate.
//!
//! The withdrawal processor is generic over these traits so its ordering
//! and failure-handling properties can be exercised with in-memory fakes.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::thresholds::{
    ManualReviewSetting, WithdrawalGlobalStatus, WithdrawalThresholds,
};
use crate::models::withdrawal_pause::PauseWithdrawalInput;

/// Errors surfaced by the storage layer.
///
/// A read or write failure is never interpreted as an allow or a deny;
/// callers stop evaluating and propagate.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed config payload for key '{key}': {reason}")]
    MalformedConfig { key: String, reason: String },
}

/// Aggregation window for platform-wide volume queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeWindow {
    TrailingHour,
    TrailingDay,
}

/// Read/write access to the administrator-editable policy documents.
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    async fn withdrawal_global_status(&self) -> Result<WithdrawalGlobalStatus, StoreError>;

    async fn set_withdrawal_global_status(
        &self,
        status: &WithdrawalGlobalStatus,
        updated_by: Option<Uuid>,
    ) -> Result<(), StoreError>;

    async fn withdrawal_thresholds(&self) -> Result<WithdrawalThresholds, StoreError>;

    async fn withdrawal_manual_review(&self) -> Result<ManualReviewSetting, StoreError>;
}

/// The set of withdrawals currently blocked from completing.
#[async_trait::async_trait]
pub trait PauseRegistry: Send + Sync {
    /// Records a pause. Overwrites any existing entry for the same
    /// withdrawal id.
    async fn pause(&self, input: &PauseWithdrawalInput) -> Result<(), StoreError>;

    /// Removes a pause. Returns `false` when no entry existed; that is not
    /// an error.
    async fn unpause(&self, withdrawal_id: &str, admin_id: Option<Uuid>)
        -> Result<bool, StoreError>;
}

/// Read-only aggregate queries against the withdrawal ledger.
#[async_trait::async_trait]
pub trait WithdrawalLedger: Send + Sync {
    /// Volume already withdrawn by one user today (UTC day), in decimal
    /// major units, including completed and in-flight withdrawals.
    async fn user_daily_volume(&self, user_id: Uuid) -> Result<Decimal, StoreError>;

    /// Platform-wide volume in the trailing window, in decimal major units.
    async fn platform_volume(&self, window: VolumeWindow) -> Result<Decimal, StoreError>;
}
