//! Application services.

pub mod withdrawal_processor;

pub use withdrawal_processor::{AdmissionOutcome, ProcessorError, WithdrawalProcessor};
