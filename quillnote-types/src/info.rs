//! License and trial snapshot consumed by the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The license tier of the current installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    /// Unlicensed installation (trial or expired trial).
    Free,
    /// Activated with a valid license key.
    Professional,
}

impl LicenseType {
    /// Returns the display name shown in the about/activation dialogs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Professional => "Professional",
        }
    }
}

impl Default for LicenseType {
    fn default() -> Self {
        Self::Free
    }
}

/// A point-in-time snapshot of license and trial status.
///
/// Snapshots are recomputed from persisted state on every request and
/// must not be cached by callers: the gate re-derives a fresh snapshot
/// before every access decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// True if a stored license key exists and revalidates.
    pub is_licensed: bool,
    /// The stored license key, if any (valid or not).
    pub license_key: Option<String>,
    /// When the license was activated on this machine.
    pub activation_time: Option<DateTime<Utc>>,
    /// True if the trial window is still open.
    pub is_trial_active: bool,
    /// Reconciled trial start time (earliest across all sources).
    pub trial_start: Option<DateTime<Utc>>,
    /// Whole minutes left in the trial window (0 once expired).
    pub trial_minutes_remaining: i64,
    /// The license tier.
    pub license_type: LicenseType,
}

impl LicenseInfo {
    /// True if any access path (license or trial) is currently open.
    #[must_use]
    pub fn has_access(&self) -> bool {
        self.is_licensed || self.is_trial_active
    }
}
