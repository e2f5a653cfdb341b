//! The protection facade consumed by the UI layer.

use crate::config::ProtectionConfig;
use crate::gate;
use chrono::Utc;
use quillnote_guard::{
    validator_probe, DebuggerSentinel, IntegrityMonitor, LogNotice, NoticeSink, ProtectionContext,
};
use quillnote_license::validate_license;
use quillnote_store::{
    CacheFileBackend, LicenseFileStore, PrefsBackend, StoreBackend, TrialClock, UsageCounter,
};
use quillnote_types::{DenialReason, LicenseInfo, LicenseType, UsageState};
use std::sync::Arc;
use tracing::debug;

/// File name of the first hidden cache.
const CACHE_FILE_A: &str = ".qn_config";

/// File name of the second hidden cache.
const CACHE_FILE_B: &str = ".qn_cache";

/// The protection core: one object owning every protection subsystem,
/// consumed synchronously by the UI.
///
/// All snapshot-producing calls re-read persisted state; nothing here
/// trusts a cached verdict.
pub struct ProtectionCore {
    config: ProtectionConfig,
    ctx: Arc<ProtectionContext>,
    notices: Arc<dyn NoticeSink>,
    sentinel: Arc<DebuggerSentinel>,
    monitor: IntegrityMonitor,
    trial: TrialClock,
    usage: UsageCounter,
    license_files: LicenseFileStore,
}

impl ProtectionCore {
    /// Creates a core over the configured on-disk backends, with
    /// notices going to the log.
    #[must_use]
    pub fn new(config: ProtectionConfig) -> Self {
        Self::with_notices(config, Arc::new(LogNotice))
    }

    /// Creates a core over the configured on-disk backends with a
    /// custom notice sink (the shipped app passes its message-box
    /// sink here).
    #[must_use]
    pub fn with_notices(config: ProtectionConfig, notices: Arc<dyn NoticeSink>) -> Self {
        let backends: Vec<Arc<dyn StoreBackend>> = vec![
            Arc::new(PrefsBackend::new(&config.data_dir)),
            Arc::new(CacheFileBackend::new(
                "cache-a",
                &config.cache_dir_a,
                CACHE_FILE_A,
            )),
            Arc::new(CacheFileBackend::new(
                "cache-b",
                &config.cache_dir_b,
                CACHE_FILE_B,
            )),
        ];
        Self::with_backends(config, backends, notices)
    }

    /// Creates a core over explicit backends. Used by tests and by
    /// platforms that supply their own preference mechanism.
    #[must_use]
    pub fn with_backends(
        config: ProtectionConfig,
        backends: Vec<Arc<dyn StoreBackend>>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        let ctx = Arc::new(ProtectionContext::new());

        let sentinel = Arc::new(DebuggerSentinel::new(
            Arc::clone(&ctx),
            Arc::clone(&notices),
            config.timing_threshold,
        ));
        let monitor = IntegrityMonitor::new(
            Arc::clone(&ctx),
            Arc::clone(&notices),
            config.min_exe_bytes,
        );
        let trial = TrialClock::new(backends.clone(), config.trial_minutes);
        let usage = UsageCounter::new(
            backends,
            config.usage_upper_bound,
            config.usage_tolerance,
        );
        let license_files = LicenseFileStore::new(&config.data_dir);

        Self {
            config,
            ctx,
            notices,
            sentinel,
            monitor,
            trial,
            usage,
            license_files,
        }
    }

    // ── Startup ──────────────────────────────────────────────────

    /// Runs the startup debugger sweep and spawns the background
    /// monitor. Must be called from within a tokio runtime.
    pub fn perform_startup_checks(&self) {
        self.sentinel.startup_checks();
        // The monitor runs for the life of the process; its handle is
        // intentionally detached.
        let _ = self.sentinel.spawn_monitor(self.config.monitor_interval);
    }

    /// Runs the one-shot code integrity verification.
    pub fn verify_code_integrity(&self) {
        self.monitor.verify_startup();
    }

    /// Cheap on-demand debugger recheck.
    pub fn check_debugger_presence(&self) {
        self.sentinel.recheck();
    }

    /// True once any tamper signal has fired this run.
    #[must_use]
    pub fn tamper_detected(&self) -> bool {
        self.ctx.tampered()
    }

    /// True if the one-shot integrity check passed.
    #[must_use]
    pub fn integrity_verified(&self) -> bool {
        self.ctx.integrity_verified()
    }

    // ── License & trial ──────────────────────────────────────────

    /// Builds a fresh license/trial snapshot from persisted state.
    ///
    /// A stored key is revalidated on every call; an invalid stored key
    /// falls through to the trial path (the key stays in the snapshot
    /// so the activation dialog can show it).
    #[must_use]
    pub fn get_license_info(&self) -> LicenseInfo {
        let stored_key = self.license_files.load_key();

        if let Some(key) = &stored_key {
            if validate_license(key) {
                return LicenseInfo {
                    is_licensed: true,
                    license_key: stored_key,
                    activation_time: self.license_files.activation_time(),
                    license_type: LicenseType::Professional,
                    ..LicenseInfo::default()
                };
            }
        }

        let trial = self.trial.state();
        LicenseInfo {
            is_licensed: false,
            license_key: stored_key,
            activation_time: None,
            is_trial_active: trial.active,
            trial_start: Some(trial.start_time),
            trial_minutes_remaining: trial.remaining_minutes,
            license_type: LicenseType::Free,
        }
    }

    /// Validates a license key (activation dialog entry point).
    #[must_use]
    pub fn validate_license(&self, key: &str) -> bool {
        self.sentinel.recheck();
        validate_license(key)
    }

    /// Persists a license key to the sealed license file.
    ///
    /// Persistence only: callers validate first. Storing an invalid key
    /// is harmless — it simply never licenses anything.
    pub fn save_license_key(&self, key: &str) -> bool {
        self.license_files.save_key(key)
    }

    // ── Feature gating ───────────────────────────────────────────

    /// The main feature-access check.
    ///
    /// Denials emit a feature-named notice; approvals are silent.
    pub fn check_feature_access(&self, feature: &str) -> bool {
        self.sentinel.recheck();

        if !self.ctx.integrity_verified() {
            self.deny(feature, DenialReason::IntegrityCheckFailed);
            return false;
        }

        let info = self.get_license_info();
        let decision = gate::evaluate(
            &info,
            self.ctx.integrity_verified(),
            self.ctx.tampered(),
            Utc::now(),
        );

        match decision.reason {
            None => true,
            Some(reason) => {
                self.deny(feature, reason);
                false
            }
        }
    }

    /// Alternate feature-access entry point.
    ///
    /// Re-derives the same verdict as [`Self::check_feature_access`]
    /// through a structurally different sequence, additionally
    /// re-probing the validation routine on the licensed path. The two
    /// entry points are behaviorally equivalent; gutting one of them
    /// does not unlock anything.
    pub fn is_feature_unlocked(&self, feature: &str) -> bool {
        let info = self.get_license_info();
        let now = Utc::now();

        if !self.ctx.integrity_verified() {
            self.deny(feature, DenialReason::IntegrityCheckFailed);
            return false;
        }

        let allowed = if info.is_licensed {
            info.license_key.as_deref().is_some_and(validate_license)
                && validator_probe()
                && !self.ctx.tampered()
        } else {
            gate::trial_open(&info, now)
        };

        if !allowed {
            self.deny(feature, gate::denial_reason(&info));
        }
        allowed
    }

    fn deny(&self, feature: &str, reason: DenialReason) {
        debug!(feature, %reason, "feature access denied");
        self.notices.notify(
            "Premium feature locked",
            &format!(
                "Feature \"{feature}\" is unavailable: {reason}. \
                 Activate a license to unlock all premium features."
            ),
        );
    }

    // ── Usage ────────────────────────────────────────────────────

    /// Increments the reconciled usage count in every backend.
    pub fn increment_usage(&self) {
        self.usage.increment();
    }

    /// The reconciled usage count.
    #[must_use]
    pub fn total_usage_count(&self) -> u32 {
        self.usage.total()
    }

    /// The full reconciled usage state (per-source counts included).
    #[must_use]
    pub fn usage_state(&self) -> UsageState {
        self.usage.state()
    }

    /// Resets the usage count everywhere. For licensed installations
    /// and support tooling; the gate itself never resets.
    pub fn reset_usage_count(&self) {
        self.usage.reset();
    }

    /// True once the free-tier save limit is reached.
    #[must_use]
    pub fn is_save_limit_reached(&self, max_saves: u32) -> bool {
        self.usage.is_save_limit_reached(max_saves)
    }

    /// Saves left before the given limit.
    #[must_use]
    pub fn remaining_saves(&self, max_saves: u32) -> u32 {
        self.usage.remaining_saves(max_saves)
    }

    /// Diagnostic: per-backend usage counts agree within tolerance.
    #[must_use]
    pub fn verify_usage_integrity(&self) -> bool {
        self.usage.verify_integrity()
    }

    /// The configured free-tier save limit.
    #[must_use]
    pub fn free_save_limit(&self) -> u32 {
        self.config.free_save_limit
    }
}
