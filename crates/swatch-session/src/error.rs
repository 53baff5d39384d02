//! Session error types.

/// Result type alias for swatch-session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or saving sessions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A stored context could not be decoded or encoded.
    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The Redis session backend failed.
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A required setting for the selected backend is missing.
    #[error("Missing session setting: {0}")]
    MissingSetting(&'static str),

    /// The selected backend was not compiled in.
    #[error("Session backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),
}
