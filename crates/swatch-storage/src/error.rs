//! Error types for swatch-storage

use thiserror::Error;

/// Result type alias for swatch-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in swatch-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from swatch-core
    #[error("Core error: {0}")]
    Core(#[from] swatch_core::Error),

    /// Error from the embedded database
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    /// A stored document could not be encoded or decoded
    #[error("Document encoding error: {0}")]
    Document(#[from] serde_json::Error),

    /// A blocking store task panicked or was cancelled
    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

macro_rules! from_redb {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Error {
                fn from(e: $source) -> Self {
                    Error::Database(e.into())
                }
            }
        )*
    };
}

from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
