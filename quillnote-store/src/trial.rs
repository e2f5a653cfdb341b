//! Trial window reconciliation across redundant backends.

use crate::backend::StoreBackend;
use crate::obfuscate::{deobfuscate_timestamp, obfuscate_timestamp};
use crate::reconcile;
use chrono::{DateTime, Utc};
use quillnote_types::TrialState;
use std::sync::Arc;
use tracing::debug;

/// Storage key for the obfuscated trial-start marker.
///
/// Deliberately innocuous: a key named "trial" would be the first thing
/// a curious user deletes.
pub const TRIAL_START_KEY: &str = "install_stamp";

/// Reconciles the trial start time across every configured backend and
/// derives the current trial window from it.
///
/// The reconciled start is the earliest timestamp present in any
/// backend. On the very first observation (no backend has a value) the
/// current time becomes the start and is written everywhere
/// immediately.
pub struct TrialClock {
    backends: Vec<Arc<dyn StoreBackend>>,
    trial_minutes: i64,
}

impl TrialClock {
    /// Creates a trial clock over the given backends.
    #[must_use]
    pub fn new(backends: Vec<Arc<dyn StoreBackend>>, trial_minutes: i64) -> Self {
        Self {
            backends,
            trial_minutes,
        }
    }

    /// Returns the configured trial length in minutes.
    #[must_use]
    pub fn trial_minutes(&self) -> i64 {
        self.trial_minutes
    }

    /// Re-reads every backend and returns the current trial window.
    ///
    /// Always hits the backends: access decisions must never trust a
    /// cached snapshot.
    pub fn state(&self) -> TrialState {
        let now = Utc::now();

        let candidates: Vec<Option<i64>> = self
            .backends
            .iter()
            .map(|b| self.read_start(b.as_ref()))
            .collect();

        let start_secs = match reconcile::earliest(&candidates) {
            Some(secs) => secs,
            None => {
                // First run: persist the start everywhere before anyone
                // can delete a subset of the copies.
                let secs = now.timestamp();
                debug!("no trial start found in any backend, initializing");
                self.write_start(secs);
                secs
            }
        };

        let start_time = DateTime::from_timestamp(start_secs, 0).unwrap_or(now);
        let elapsed_minutes = (now - start_time).num_minutes();
        let remaining_minutes = (self.trial_minutes - elapsed_minutes).max(0);

        TrialState {
            start_time,
            elapsed_minutes,
            remaining_minutes,
            active: remaining_minutes > 0,
        }
    }

    /// Reads one backend's trial start, or `None` if absent/undecodable.
    fn read_start(&self, backend: &dyn StoreBackend) -> Option<i64> {
        let stored: u64 = backend.read(TRIAL_START_KEY)?.parse().ok()?;
        let secs = deobfuscate_timestamp(stored);
        // A garbled value can decode to a timestamp chrono cannot
        // represent; such a source counts as absent.
        DateTime::from_timestamp(secs, 0)?;
        Some(secs)
    }

    /// Writes the trial start to every backend.
    fn write_start(&self, secs: i64) {
        let encoded = obfuscate_timestamp(secs).to_string();
        for backend in &self.backends {
            backend.write(TRIAL_START_KEY, &encoded);
        }
    }
}
