//! Business logic services.

pub mod override_window;
pub mod stores;
pub mod threshold_eval;

pub use stores::{ConfigStore, PauseRegistry, StoreError, VolumeWindow, WithdrawalLedger};
pub use threshold_eval::ThresholdVerdict;
