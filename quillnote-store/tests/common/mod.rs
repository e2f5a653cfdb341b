//! Shared helpers for store tests.

#![allow(dead_code)]

use quillnote_store::{
    count_checksum, obfuscate_count, obfuscate_timestamp, MemoryBackend, StoreBackend,
    TRIAL_START_KEY, USAGE_CHECK_KEY, USAGE_COUNT_KEY,
};
use std::sync::Arc;

/// Builds `n` labeled in-memory backends.
pub fn mem_backends(n: usize) -> Vec<Arc<MemoryBackend>> {
    (0..n)
        .map(|i| Arc::new(MemoryBackend::new(&format!("mem-{i}"))))
        .collect()
}

/// Upcasts concrete memory backends to the trait objects the clock and
/// counter consume.
pub fn as_store_backends(backends: &[Arc<MemoryBackend>]) -> Vec<Arc<dyn StoreBackend>> {
    backends
        .iter()
        .map(|b| Arc::clone(b) as Arc<dyn StoreBackend>)
        .collect()
}

/// Plants an obfuscated trial start (epoch seconds) into one backend.
pub fn plant_trial_start(backend: &MemoryBackend, secs: i64) {
    backend.write(TRIAL_START_KEY, &obfuscate_timestamp(secs).to_string());
}

/// Plants an obfuscated usage count with a matching checksum.
pub fn plant_count(backend: &MemoryBackend, count: u32) {
    backend.write(USAGE_COUNT_KEY, &obfuscate_count(count).to_string());
    backend.write(USAGE_CHECK_KEY, &count_checksum(count).to_string());
}

/// Plants an obfuscated usage count with a deliberately wrong checksum.
pub fn plant_count_bad_checksum(backend: &MemoryBackend, count: u32) {
    backend.write(USAGE_COUNT_KEY, &obfuscate_count(count).to_string());
    backend.write(
        USAGE_CHECK_KEY,
        &count_checksum(count).wrapping_add(1).to_string(),
    );
}
