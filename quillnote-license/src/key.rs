//! License key parsing and rule verification.

use crate::checksum::{alnum_value, checksum16, encode_base36};
use crate::error::{LicenseError, LicenseResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Embedded product salt keying the HMAC signature rule.
pub(crate) const VALIDATION_SALT: &str = "Qu1llN0t3_Pr0";

/// Substrings that unconditionally disqualify a key.
const BLOCKED_MARKERS: [&str; 2] = ["INVALID", "FAKE"];

/// Total formatted key length: four groups of four plus three dashes.
const KEY_LEN: usize = 19;

/// Payload length after stripping dashes and the checksum segment.
const PAYLOAD_LEN: usize = 12;

/// A parsed and fully verified license key.
///
/// Construction via [`LicenseKey::parse`] is the only way to obtain one,
/// so holding a `LicenseKey` means every validation rule passed at parse
/// time. Callers must still not treat a stored instance as proof of
/// validity later: the gate re-parses the raw key string on every access
/// decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseKey {
    /// The key as typed by the user.
    raw: String,
    /// Uppercase dash-stripped payload (12 characters).
    payload: String,
    /// Uppercase checksum segment (4 characters).
    checksum: String,
}

impl LicenseKey {
    /// Parses and verifies a license key string.
    ///
    /// Whitespace is trimmed and the key is uppercased before any rule
    /// runs, which is what makes validation case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in the order: marker, format,
    /// checksum, prefix rule, signature rule.
    pub fn parse(key: &str) -> LicenseResult<Self> {
        let raw = key.trim().to_string();
        let normalized = raw.to_ascii_uppercase();

        // Marker rule runs first: a blocked key is rejected regardless
        // of whether the rest of it is well-formed.
        if BLOCKED_MARKERS.iter().any(|m| normalized.contains(m)) {
            return Err(LicenseError::BlockedMarker);
        }

        let stripped = check_format(&normalized)?;
        let (payload, checksum) = stripped.split_at(PAYLOAD_LEN);

        let expected = encode_base36(checksum16(payload.as_bytes()));
        if checksum != expected {
            return Err(LicenseError::ChecksumMismatch);
        }

        if !prefix_rule(payload.as_bytes()) {
            return Err(LicenseError::PrefixRuleFailed);
        }

        if !signature_rule(payload) {
            return Err(LicenseError::InvalidSignature);
        }

        Ok(Self {
            raw,
            payload: payload.to_string(),
            checksum: checksum.to_string(),
        })
    }

    /// Returns the key as typed by the user.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the uppercase 12-character payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns the uppercase 4-character checksum segment.
    #[must_use]
    pub fn checksum_segment(&self) -> &str {
        &self.checksum
    }

    /// Returns the canonical uppercase dashed form.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            &self.payload[0..4],
            &self.payload[4..8],
            &self.payload[8..12],
            self.checksum
        )
    }
}

/// Validates a license key, reporting only a verdict.
///
/// This is the entry point the feature gate and activation flow use;
/// every malformed input maps to `false` rather than an error.
#[must_use]
pub fn validate_license(key: &str) -> bool {
    LicenseKey::parse(key).is_ok()
}

/// Checks the `AAAA-BBBB-CCCC-DDDD` shape and returns the dash-stripped
/// 16-character uppercase body.
fn check_format(normalized: &str) -> LicenseResult<String> {
    if normalized.len() != KEY_LEN {
        return Err(LicenseError::InvalidFormat(format!(
            "expected {KEY_LEN} characters, got {}",
            normalized.len()
        )));
    }

    let groups: Vec<&str> = normalized.split('-').collect();
    if groups.len() != 4 {
        return Err(LicenseError::InvalidFormat(
            "expected four dash-separated groups".to_string(),
        ));
    }

    for group in &groups {
        if group.len() != 4 || !group.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(LicenseError::InvalidFormat(
                "each group must be four alphanumeric characters".to_string(),
            ));
        }
    }

    Ok(groups.concat())
}

/// The prefix rule: alphanumeric values of the first 8 payload bytes
/// must sum to a multiple of 7.
pub(crate) fn prefix_rule(payload: &[u8]) -> bool {
    let sum: u32 = payload[..8].iter().map(|&b| alnum_value(b)).sum();
    sum % 7 == 0
}

/// The signature rule: the first 4 bytes of HMAC-SHA256(salt, payload)
/// must sum to a multiple of 17.
pub(crate) fn signature_rule(payload: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(VALIDATION_SALT.as_bytes()) else {
        return false;
    };
    mac.update(payload.as_bytes());
    let out = mac.finalize().into_bytes();

    let sum: u32 = out[..4].iter().map(|&b| u32::from(b)).sum();
    sum % 17 == 0
}
