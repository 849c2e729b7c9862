//! # Groupbot Shared
//!
//! Limits, configuration, telemetry, and text helpers shared by the groupbot crates.

pub mod constants;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod text;

pub use error::AppError;
