//! Domain layer for the risk-control backend.
//!
//! This crate contains:
//! - Domain models (thresholds, pauses, rakeback override)
//! - Pure decision logic (threshold evaluation, time-window evaluation)
//! - Storage-seam traits implemented by the persistence crate

pub mod models;
pub mod services;
