//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving list configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a config file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has mistyped fields
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Headless host geometry is out of range
    #[error("Invalid [host] {field} = {value}: expected {expected}")]
    InvalidHost {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
