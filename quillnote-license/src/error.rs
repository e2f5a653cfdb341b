//! Error types for license key handling.

use thiserror::Error;

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// License-key specific errors.
///
/// Callers that only need a verdict use [`crate::validate_license`];
/// the granular variants exist for the activation dialog, which tells
/// the user *why* a typed key was rejected.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The key does not match `AAAA-BBBB-CCCC-DDDD`.
    #[error("invalid license key format: {0}")]
    InvalidFormat(String),

    /// The checksum segment does not match the payload.
    #[error("license key checksum mismatch")]
    ChecksumMismatch,

    /// The payload prefix sum rule failed.
    #[error("license key prefix rule failed")]
    PrefixRuleFailed,

    /// The HMAC signature rule failed.
    #[error("license key signature invalid")]
    InvalidSignature,

    /// The key contains a blocked marker substring.
    #[error("license key contains a blocked marker")]
    BlockedMarker,
}
