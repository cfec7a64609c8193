//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod signal;
pub mod analysis;
pub mod monitor;
pub mod config_validation;
pub mod error;
