//! Deterministic license key generation.
//!
//! Used by the key-issuing tool and by tests; in the shipped product
//! keys are generated at purchase time, never inside the app.

use crate::checksum::{alnum_value, checksum16, encode_base36, ALPHABET};
use crate::key::{prefix_rule, VALIDATION_SALT};
use crate::validate_license;
use sha2::{Digest, Sha256};

/// Derives a license key from a seed string.
///
/// The payload is drawn from SHA-256 of the seed, the product salt, and
/// a little-endian attempt counter. Character 8 of the payload is
/// adjusted so the prefix sum is a multiple of 7, and attempts advance
/// until the finished key passes the complete validator (the HMAC rule
/// fails most candidates; a blocked marker surfacing in the payload is
/// possible too), so the returned key always satisfies
/// [`crate::validate_license`]. The same seed always yields the same
/// key.
#[must_use]
pub fn generate_license_key(seed: &str) -> String {
    let mut attempt: u32 = 0;

    loop {
        let payload = derive_payload(seed, attempt);
        let checksum = encode_base36(checksum16(payload.as_bytes()));
        let key = format!(
            "{}-{}-{}-{}",
            &payload[0..4],
            &payload[4..8],
            &payload[8..12],
            checksum
        );
        if validate_license(&key) {
            return key;
        }
        // The signature rule accepts ~1 in 17 payloads, so a handful of
        // attempts suffices; the counter wraps rather than giving up.
        attempt = attempt.wrapping_add(1);
    }
}

/// Derives one 12-character candidate payload satisfying the prefix rule.
fn derive_payload(seed: &str, attempt: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(VALIDATION_SALT.as_bytes());
    hasher.update(attempt.to_le_bytes());
    let hash = hasher.finalize();

    let mut payload: Vec<u8> = hash[..12]
        .iter()
        .map(|&b| ALPHABET[usize::from(b) % 36])
        .collect();

    fix_prefix_sum(&mut payload);

    // Payload bytes come straight from ALPHABET, so this is valid UTF-8.
    String::from_utf8_lossy(&payload).into_owned()
}

/// Adjusts payload character 8 so the prefix sum is a multiple of 7.
///
/// The replacement stays within the 36-symbol alphabet without leaving
/// the needed residue class: when the bumped value would run past the
/// alphabet, stepping back a full 7 keeps the sum congruent.
fn fix_prefix_sum(payload: &mut [u8]) {
    if prefix_rule(payload) {
        return;
    }

    let sum: u32 = payload[..8].iter().map(|&b| alnum_value(b)).sum();
    let remainder = sum % 7;

    let current = alnum_value(payload[7]);
    let mut adjusted = current + (7 - remainder);
    if adjusted >= 36 {
        adjusted -= 7;
    }

    payload[7] = ALPHABET[adjusted as usize];
}
