//! Error types for swatch-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for swatch-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in swatch-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An identifier string could not be parsed.
    #[error("Invalid {kind} id '{value}': {source}")]
    InvalidId {
        /// Which kind of identifier was expected ("person", "item")
        kind: &'static str,
        /// The rejected input
        value: String,
        /// Underlying parse failure
        #[source]
        source: uuid::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error, optionally tied to a path
    #[error("I/O error{}: {source}", at_path(.path))]
    Io {
        /// Path being accessed, if known
        path: Option<PathBuf>,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates an I/O error annotated with the path that failed.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: Some(path.to_path_buf()),
            source,
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_id(kind: &'static str, value: impl Into<String>, source: uuid::Error) -> Self {
        Error::InvalidId {
            kind,
            value: value.into(),
            source,
        }
    }

    /// Returns whether this error was caused by bad client input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidId { .. })
    }
}

fn at_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}
