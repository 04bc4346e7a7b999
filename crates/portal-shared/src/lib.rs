//! # Portal Shared
//!
//! Configuration, telemetry, and constants shared across the portal crates.

pub mod config;
pub mod constants;
pub mod telemetry;

pub use config::AppConfig;
