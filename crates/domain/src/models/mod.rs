//! Domain models for the risk-control backend.

pub mod rakeback_override;
pub mod thresholds;
pub mod withdrawal;
pub mod withdrawal_pause;

pub use rakeback_override::GlobalRakebackOverride;
pub use thresholds::{
    ManualReviewSetting, ThresholdCategory, ThresholdLimit, WithdrawalGlobalStatus,
    WithdrawalThresholds,
};
pub use withdrawal::{Withdrawal, WithdrawalStatus};
pub use withdrawal_pause::{PauseWithdrawalInput, PausedWithdrawal, WithdrawalPauseStats};
