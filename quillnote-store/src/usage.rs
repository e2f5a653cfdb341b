//! Monotonic usage counting across redundant backends.

use crate::backend::StoreBackend;
use crate::obfuscate::{count_checksum, deobfuscate_count, obfuscate_count};
use crate::reconcile;
use quillnote_types::UsageState;
use std::sync::Arc;
use tracing::warn;

/// Storage key for the obfuscated usage count.
pub const USAGE_COUNT_KEY: &str = "usage_metrics";

/// Storage key for the usage count's verification checksum.
pub const USAGE_CHECK_KEY: &str = "usage_check";

/// Reconciles a monotonic usage count across every configured backend.
///
/// Each backend stores the obfuscated count plus a checksum of the true
/// count; a backend whose checksum does not verify is treated as absent.
/// The reconciled count is the maximum across accepted backends, so
/// deleting or corrupting a store cannot roll it back.
pub struct UsageCounter {
    backends: Vec<Arc<dyn StoreBackend>>,
    upper_bound: u32,
    tolerance: u32,
}

impl UsageCounter {
    /// Creates a usage counter over the given backends.
    ///
    /// `upper_bound` is the plausibility ceiling: a reconciled value
    /// above it is replaced with 0. `tolerance` is the maximum pairwise
    /// spread [`Self::verify_integrity`] accepts.
    #[must_use]
    pub fn new(backends: Vec<Arc<dyn StoreBackend>>, upper_bound: u32, tolerance: u32) -> Self {
        Self {
            backends,
            upper_bound,
            tolerance,
        }
    }

    /// Re-reads every backend and returns the reconciled usage state.
    pub fn state(&self) -> UsageState {
        let accepted: Vec<Option<u32>> = self
            .backends
            .iter()
            .map(|b| self.read_verified(b.as_ref()))
            .collect();

        let mut reconciled = reconcile::highest(&accepted).unwrap_or(0);

        if reconciled > self.upper_bound {
            // Out-of-range means tampering (or a bug); resetting to zero
            // is itself a known reset vector, preserved as shipped.
            warn!(
                count = reconciled,
                bound = self.upper_bound,
                "implausible usage count, substituting 0"
            );
            reconciled = 0;
        }

        let per_source_counts = self
            .backends
            .iter()
            .map(|b| self.read_raw(b.as_ref()).unwrap_or(0))
            .collect();

        UsageState {
            reconciled_count: reconciled,
            per_source_counts,
        }
    }

    /// Returns the reconciled usage count.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.state().reconciled_count
    }

    /// Increments the reconciled count and persists it to every backend.
    pub fn increment(&self) {
        let next = self.total().saturating_add(1);
        self.write_all(next);
    }

    /// Resets the count to zero in every backend (licensed users and
    /// support tooling only; the gate never calls this).
    pub fn reset(&self) {
        self.write_all(0);
    }

    /// True once the reconciled count has reached `max_saves`.
    #[must_use]
    pub fn is_save_limit_reached(&self, max_saves: u32) -> bool {
        self.total() >= max_saves
    }

    /// Saves left before `max_saves` is reached.
    #[must_use]
    pub fn remaining_saves(&self, max_saves: u32) -> u32 {
        max_saves.saturating_sub(self.total())
    }

    /// Diagnostic: true when the raw per-backend counts agree within the
    /// configured tolerance.
    ///
    /// A small spread is normal (a crash between backend writes); a
    /// large one suggests a store was edited. This is a health signal
    /// for support logs, not a security boundary — reconciliation
    /// already handles disagreement.
    #[must_use]
    pub fn verify_integrity(&self) -> bool {
        let counts: Vec<u32> = self
            .backends
            .iter()
            .map(|b| self.read_raw(b.as_ref()).unwrap_or(0))
            .collect();

        let mut max_diff = 0u32;
        for (i, a) in counts.iter().enumerate() {
            for b in &counts[i + 1..] {
                max_diff = max_diff.max(a.abs_diff(*b));
            }
        }

        max_diff <= self.tolerance
    }

    /// Reads one backend's count, accepting it only if its stored
    /// checksum matches the checksum recomputed from the decoded count.
    fn read_verified(&self, backend: &dyn StoreBackend) -> Option<u32> {
        let count = self.read_raw(backend)?;
        let stored_check: u32 = backend.read(USAGE_CHECK_KEY)?.parse().ok()?;
        (count_checksum(count) == stored_check).then_some(count)
    }

    /// Reads one backend's decoded count without the checksum gate.
    fn read_raw(&self, backend: &dyn StoreBackend) -> Option<u32> {
        let stored: u32 = backend.read(USAGE_COUNT_KEY)?.parse().ok()?;
        Some(deobfuscate_count(stored))
    }

    /// Writes a count and its checksum to every backend.
    fn write_all(&self, count: u32) {
        let encoded = obfuscate_count(count).to_string();
        let check = count_checksum(count).to_string();
        for backend in &self.backends {
            backend.write(USAGE_COUNT_KEY, &encoded);
            backend.write(USAGE_CHECK_KEY, &check);
        }
    }
}
