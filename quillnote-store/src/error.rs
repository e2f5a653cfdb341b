//! Error types for the persistence layer.
//!
//! These surface only from internal helpers and the license-file store;
//! the redundant key-value paths default silently per the crate docs.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Sealed-file encryption/decryption error.
    #[error("crypto error: {0}")]
    Crypto(#[from] quillnote_crypto::CryptoError),
}
