//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod text_report;
#[cfg(feature = "live")]
pub mod alpha_vantage;
#[cfg(feature = "web")]
pub mod refresh;
#[cfg(feature = "web")]
pub mod web;
