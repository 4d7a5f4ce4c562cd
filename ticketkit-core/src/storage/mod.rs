//! Durable storage for the two session tokens.
//!
//! The store is an opaque string carrier: nothing here validates or
//! interprets token contents. Implementations must survive process
//! restarts (except [`MemoryTokenStore`], which exists for tests and for
//! embedders that handle persistence themselves).

mod file;
mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use thiserror::Error;

/// Storage key for the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "ticketkit_access_token";

/// Storage key for the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "ticketkit_refresh_token";

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by token store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure while reading or writing the backing file.
    #[error("i/o error at {path}: {source}")]
    Io {
        /// Path of the backing file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable key-value storage for session tokens.
pub trait TokenStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes every listed key. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn remove(&self, keys: &[&str]) -> StorageResult<()>;
}
