//! Configuration loading errors.

use thiserror::Error;

/// Config load or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Legacy parameter file names a key we do not know
    #[error("Unknown parameter '{key}' on line {line}")]
    UnknownParameter {
        /// Offending key
        key: String,
        /// 1-based line number
        line: usize,
    },

    /// Legacy parameter value could not be parsed or is out of range
    #[error("Invalid value '{value}' for '{key}' on line {line}")]
    InvalidValue {
        /// Key being set
        key: String,
        /// 1-based line number
        line: usize,
        /// Raw value text
        value: String,
    },

    /// Values parsed but violate an invariant
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
