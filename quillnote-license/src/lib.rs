//! License key validation and generation for Quillnote.
//!
//! Keys are 19-character strings of the form `AAAA-BBBB-CCCC-DDDD`,
//! four groups of four alphanumerics. Stripped of dashes, the first 12
//! characters are the payload and the last 4 encode a checksum. A key
//! is accepted only when every rule passes:
//!
//! - **Checksum**: the trailing 4 characters must equal the base-36
//!   encoding of a 16-bit mixing checksum over the payload.
//! - **Prefix rule**: the alphanumeric values of the first 8 payload
//!   characters must sum to a multiple of 7.
//! - **Signature rule**: the first 4 bytes of an HMAC-SHA256 over the
//!   payload (keyed with an embedded product salt) must sum to a
//!   multiple of 17.
//! - **Marker rule**: keys containing `INVALID` or `FAKE` are always
//!   rejected.
//!
//! Validation is case-insensitive; generated keys are uppercase.
//!
//! # Design Principles
//!
//! - **Offline**: no server round-trips, ever.
//! - **Deterministic generation**: `generate_license_key` maps a seed to
//!   the same key every time, and its output always validates.
//!
//! This is a tamper-resistance scheme, not cryptography: the rules and
//! salt ship in the binary. See the protection-core docs for the threat
//! model.

mod checksum;
mod error;
mod generate;
mod key;

pub use checksum::{checksum16, encode_base36};
pub use error::{LicenseError, LicenseResult};
pub use generate::generate_license_key;
pub use key::{validate_license, LicenseKey};
