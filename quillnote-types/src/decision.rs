//! Feature-gate decisions.

use serde::{Deserialize, Serialize};

/// Why a feature request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The one-shot startup integrity check did not pass.
    IntegrityCheckFailed,
    /// A stored key exists but no longer revalidates (or tampering was
    /// detected, which fails the license closed).
    LicenseValidationFailed,
    /// The trial window has closed.
    TrialExpired,
    /// Neither a license nor an open trial window exists.
    NoTrialOrLicense,
}

impl DenialReason {
    /// The user-facing reason line included in the denial notice.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::IntegrityCheckFailed => "Integrity check failed",
            Self::LicenseValidationFailed => "License validation failed",
            Self::TrialExpired => "Trial expired",
            Self::NoTrialOrLicense => "No active trial or license",
        }
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The outcome of a single feature-access evaluation.
///
/// Ephemeral: recomputed on every call, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDecision {
    /// True if the feature may run.
    pub allowed: bool,
    /// Set exactly when `allowed` is false.
    pub reason: Option<DenialReason>,
}

impl FeatureDecision {
    /// An allowing decision.
    #[must_use]
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A denying decision with the given reason.
    #[must_use]
    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}
