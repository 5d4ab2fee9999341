//! Shared utilities and common types for the risk-control backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Money conversion between ledger minor units and decimal major units
//! - Offset/limit pagination helpers
//! - Common validation logic

pub mod money;
pub mod pagination;
pub mod validation;
