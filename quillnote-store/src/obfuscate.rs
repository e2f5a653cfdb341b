//! Reversible value transforms.
//!
//! These raise the cost of editing stored values by hand from "change a
//! number" to "read this file first". They carry no cryptographic
//! guarantee and are not meant to.

/// Mask applied to trial timestamps.
const STAMP_MASK: u64 = 0x5EC0_DEC0_FFEE;

/// Rotation applied to trial timestamps.
const STAMP_ROT: u32 = 13;

/// Mask applied to usage counts.
const COUNT_MASK: u32 = 0xDEAD_BEEF;

/// Rotation applied to usage counts.
const COUNT_ROT: u32 = 3;

/// Additive offset applied to usage counts.
const COUNT_OFFSET: u32 = 0x1337_C0DE;

/// Mask mixed into the usage checksum.
const CHECK_MASK: u32 = 0x5EC0DE;

/// Transforms a trial timestamp (epoch seconds) for storage.
#[must_use]
pub fn obfuscate_timestamp(secs: i64) -> u64 {
    ((secs as u64) ^ STAMP_MASK).rotate_left(STAMP_ROT)
}

/// Reverses [`obfuscate_timestamp`].
#[must_use]
pub fn deobfuscate_timestamp(stored: u64) -> i64 {
    (stored.rotate_right(STAMP_ROT) ^ STAMP_MASK) as i64
}

/// Transforms a usage count for storage.
#[must_use]
pub fn obfuscate_count(count: u32) -> u32 {
    (count ^ COUNT_MASK)
        .rotate_left(COUNT_ROT)
        .wrapping_add(COUNT_OFFSET)
}

/// Reverses [`obfuscate_count`].
#[must_use]
pub fn deobfuscate_count(stored: u32) -> u32 {
    stored
        .wrapping_sub(COUNT_OFFSET)
        .rotate_right(COUNT_ROT)
        ^ COUNT_MASK
}

/// The independent checksum stored alongside each usage count.
///
/// Computed from the true (unobfuscated) count; a backend whose stored
/// checksum does not match the recomputed one is treated as absent.
#[must_use]
pub fn count_checksum(count: u32) -> u32 {
    count.wrapping_mul(31) ^ CHECK_MASK
}
