//! Protection configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Every tunable of the protection core, with shipped defaults.
///
/// Tests construct explicit configs over temporary directories; the
/// shipped app uses [`Default`].
#[derive(Debug, Clone)]
pub struct ProtectionConfig {
    /// Application data directory: preference store, license file,
    /// activation file.
    pub data_dir: PathBuf,
    /// Directory of the first hidden file cache.
    pub cache_dir_a: PathBuf,
    /// Directory of the second hidden file cache.
    pub cache_dir_b: PathBuf,
    /// Trial length in minutes. Deliberately short in the shipped
    /// build: the trial exists to demo features, not to live in.
    pub trial_minutes: i64,
    /// Plausibility ceiling for the reconciled usage count.
    pub usage_upper_bound: u32,
    /// Maximum pairwise spread the usage integrity diagnostic accepts.
    pub usage_tolerance: u32,
    /// Saves available to unlicensed installations.
    pub free_save_limit: u32,
    /// Minimum plausible size of the running executable, in bytes.
    pub min_exe_bytes: u64,
    /// Interval of the background debugger monitor.
    pub monitor_interval: Duration,
    /// Elapsed time above which the timing probe flags an anomaly.
    pub timing_threshold: Duration,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        let fallback = std::env::temp_dir;
        Self {
            data_dir: dirs::config_dir().unwrap_or_else(fallback).join("Quillnote"),
            cache_dir_a: dirs::data_local_dir().unwrap_or_else(fallback),
            cache_dir_b: dirs::cache_dir().unwrap_or_else(fallback),
            trial_minutes: 2,
            usage_upper_bound: 100_000,
            usage_tolerance: 5,
            free_save_limit: 10,
            min_exe_bytes: 10_000,
            monitor_interval: Duration::from_secs(5),
            timing_threshold: Duration::from_millis(50),
        }
    }
}
