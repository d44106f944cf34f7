//! Configuration loading errors.

use crate::error::FollowerError;

/// Errors that can occur when loading a YAML configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// IO error reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation failed.
    #[error("Config validation error: {0}")]
    Invalid(#[from] FollowerError),
}
