//! Repository implementations.

pub mod rakeback_override;
pub mod system_config;
pub mod withdrawal_ledger;
pub mod withdrawal_pause;

pub use rakeback_override::RakebackOverrideRepository;
pub use system_config::SystemConfigRepository;
pub use withdrawal_ledger::WithdrawalLedgerRepository;
pub use withdrawal_pause::WithdrawalPauseRepository;
