//! The feature-gate decision function.

use chrono::{DateTime, Utc};
use quillnote_license::validate_license;
use quillnote_types::{DenialReason, FeatureDecision, LicenseInfo};

/// Evaluates a feature request against a fresh snapshot.
///
/// Pure: every input is explicit, so the decision table is directly
/// unit-testable. First match wins:
///
/// 1. Integrity unverified → deny, before anything else.
/// 2. Licensed, the stored key revalidates right now, and no tampering
///    has been seen → allow. A mathematically valid key does not help
///    once the tamper flag is up: the license path fails closed.
/// 3. Trial active with time remaining and a start that is not in the
///    future → allow.
/// 4. Otherwise deny with the closest-matching reason.
#[must_use]
pub fn evaluate(
    info: &LicenseInfo,
    integrity_verified: bool,
    tampered: bool,
    now: DateTime<Utc>,
) -> FeatureDecision {
    if !integrity_verified {
        return FeatureDecision::deny(DenialReason::IntegrityCheckFailed);
    }

    if info.is_licensed
        && info.license_key.as_deref().is_some_and(validate_license)
        && !tampered
    {
        return FeatureDecision::allow();
    }

    if trial_open(info, now) {
        return FeatureDecision::allow();
    }

    FeatureDecision::deny(denial_reason(info))
}

/// The trial path: active, time remaining, start not in the future.
///
/// A future start means a store was edited (or the clock rolled back);
/// either way the trial does not count.
pub(crate) fn trial_open(info: &LicenseInfo, now: DateTime<Utc>) -> bool {
    info.is_trial_active
        && info.trial_minutes_remaining > 0
        && info.trial_start.is_some_and(|start| start <= now)
}

/// Selects the reason reported for a denied snapshot.
pub(crate) fn denial_reason(info: &LicenseInfo) -> DenialReason {
    if info.is_licensed {
        DenialReason::LicenseValidationFailed
    } else if info.trial_minutes_remaining <= 0 {
        DenialReason::TrialExpired
    } else {
        DenialReason::NoTrialOrLicense
    }
}
