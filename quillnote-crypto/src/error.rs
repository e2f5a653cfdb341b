//! Error types for the file obfuscation layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while sealing or opening protection files.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decryption failed (corrupt blob, bad encoding, or tampered data).
    #[error("decryption error: {0}")]
    Decryption(String),
}
