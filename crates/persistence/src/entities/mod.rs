//! Database entities (row mappings).

pub mod rakeback_override;
pub mod system_config;
pub mod withdrawal;
pub mod withdrawal_pause;

pub use rakeback_override::RakebackOverrideEntity;
pub use system_config::ConfigEntryEntity;
pub use withdrawal::WithdrawalEntity;
pub use withdrawal_pause::{PausedWithdrawalRowEntity, WithdrawalPauseEntity, WithdrawalPauseStatsEntity};
