//! Configuration errors.
//!
//! The simulation itself has no recoverable failures; every state change is
//! reported through the returned state tag. Only loading and validating a
//! [`FieldConfig`](crate::FieldConfig) can fail.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    Io(io::Error),

    /// The file was read but is not valid config JSON.
    Parse(serde_json::Error),

    /// A field holds a value the simulation cannot run with.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O failed: {e}"),
            ConfigError::Parse(e) => write!(f, "config is not valid JSON: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
