// Configuration Management
//
// This crate handles all configuration loading for the GitHub org proxy.
// It provides:
// - Configuration structs built from environment variables
// - Default configuration values
// - The fixed target organization
//
// Configuration is loaded once at startup and never mutated afterwards.

use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not set")]
    MissingVar { name: &'static str },

    #[error("{name} has an invalid value '{value}': {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}
