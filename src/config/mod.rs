//! Configuration management for the swiss-room service
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod standings;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, StoreSettings};
pub use standings::{FinalTieBreak, StandingsConfig};
