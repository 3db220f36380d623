//! Centralized error types
//!
//! The streaming codec itself never fails. Errors only come from the
//! surfaces around it: config files, hex input and sensor names.
//! Use `Result<T>` as shorthand for `std::result::Result<T, StreamError>`.

use std::fmt;
use std::path::PathBuf;

/// All crate errors
#[derive(Debug)]
pub enum StreamError {
    // === Config ===
    /// Failed to read config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write config file
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for our schema
    ConfigParse { path: PathBuf, reason: String },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Input ===
    /// Payload or mask text is not valid hex
    InvalidHex { input: String, reason: String },
    /// Sensor or group name not recognized
    UnknownSensor { name: String },

    // === IO ===
    /// Reading input or writing output failed
    Io { source: std::io::Error },
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. }
            | Self::ConfigWrite { source, .. }
            | Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigRead { path, .. } => write!(f, "Cannot read config: {}", path.display()),
            Self::ConfigWrite { path, .. } => {
                write!(f, "Cannot write config: {}", path.display())
            }
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::InvalidHex { input, reason } => {
                write!(f, "Invalid hex '{}': {}", input, reason)
            }
            Self::UnknownSensor { name } => write!(f, "Unknown sensor: {}", name),
            Self::Io { source } => write!(f, "IO error: {}", source),
        }
    }
}

impl From<std::io::Error> for StreamError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

/// Alias for Result with StreamError
pub type Result<T> = std::result::Result<T, StreamError>;
