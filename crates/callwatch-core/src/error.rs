//! Error types for callwatch with categorization:
//!
//! - **Configuration errors**: missing or invalid settings (exit code 1)
//! - **Filesystem errors**: stat/read/watch failures on the log file (exit code 2)
//! - **Broker errors**: MQTT client failures (exit code 3, never fatal in practice)
//!
//! Only filesystem errors are allowed to terminate the pipeline. Broker errors
//! are logged where they happen and swallowed.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for every fallible operation in the crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A required setting is absent or empty.
    #[error("Missing environment variable {0}")]
    MissingConfig(&'static str),

    /// A setting is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A filesystem operation on `path` failed.
    #[error("IO error on {}: {message}", path.display())]
    Io {
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },

    /// The OS file watch reported an error.
    #[error("File watch error: {0}")]
    Watch(String),

    /// The MQTT client rejected a request.
    #[error("Broker error: {0}")]
    Broker(String),

    /// OS signal handlers could not be installed.
    #[error("Signal handling error: {0}")]
    Signal(String),
}

// Convenience constructors
impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Wrap an IO error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::Io {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Create a watch error.
    pub fn watch(msg: impl Into<String>) -> Self {
        Self::Watch(msg.into())
    }

    /// Create a broker error.
    pub fn broker(msg: impl Into<String>) -> Self {
        Self::Broker(msg.into())
    }

    /// True when the error is a filesystem "not found".
    ///
    /// The log file vanishing is an expected condition (Teams rotates and
    /// recreates it), so callers treat this case as "not ready yet".
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io {
                kind: io::ErrorKind::NotFound,
                ..
            }
        )
    }

    /// Returns the process exit code for this error.
    ///
    /// Exit code scheme:
    /// - 1: configuration (missing or invalid settings)
    /// - 2: filesystem or watch failure
    /// - 3: broker failure
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingConfig(_) | Self::InvalidConfig(_) | Self::ParseError(_) => 1,
            Self::Io { .. } | Self::Watch(_) | Self::Signal(_) => 2,
            Self::Broker(_) => 3,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::parse_error(format!("Failed to parse config: {err}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
