//! The per-process sticky protection flags.

use std::sync::atomic::{AtomicBool, Ordering};

/// Sticky protection state shared by reference among the guards and the
/// feature gate.
///
/// Both flags are monotonic within a process run: `tamper_detected`
/// only ever rises, `integrity_verified` only ever falls after its
/// one-shot computation. The flags are read optimistically with relaxed
/// ordering; the sentinel's background loop and the foreground gate
/// race benignly (a lost update delays detection by one interval and
/// can never un-detect).
#[derive(Debug, Default)]
pub struct ProtectionContext {
    tamper_detected: AtomicBool,
    integrity_verified: AtomicBool,
    integrity_checked: AtomicBool,
}

impl ProtectionContext {
    /// Creates a fresh context: no tampering seen, integrity unverified
    /// until the one-shot startup check passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any tamper signal has fired this run.
    #[must_use]
    pub fn tampered(&self) -> bool {
        self.tamper_detected.load(Ordering::Relaxed)
    }

    /// Raises the sticky tamper flag. There is no way to lower it.
    pub fn mark_tampered(&self) {
        self.tamper_detected.store(true, Ordering::Relaxed);
    }

    /// True if the one-shot startup integrity check passed and nothing
    /// has degraded it since.
    #[must_use]
    pub fn integrity_verified(&self) -> bool {
        self.integrity_verified.load(Ordering::Relaxed)
    }

    /// Lowers the integrity flag. There is no way to raise it back;
    /// only the one-shot startup check can set it at all.
    pub fn mark_unverified(&self) {
        self.integrity_verified.store(false, Ordering::Relaxed);
    }

    /// Records the one-shot integrity outcome. Only the first call per
    /// run takes effect; the monitor uses this to stay one-shot even if
    /// startup wiring calls it twice.
    ///
    /// Returns false if the outcome was already recorded.
    pub(crate) fn record_integrity(&self, verified: bool) -> bool {
        if self.integrity_checked.swap(true, Ordering::Relaxed) {
            return false;
        }
        self.integrity_verified.store(verified, Ordering::Relaxed);
        true
    }
}
