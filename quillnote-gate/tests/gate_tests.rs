//! Decision-table tests for the pure gate evaluation.

use chrono::{Duration, Utc};
use quillnote_gate::evaluate;
use quillnote_license::generate_license_key;
use quillnote_types::{DenialReason, LicenseInfo, LicenseType};

fn licensed_info(key: &str) -> LicenseInfo {
    LicenseInfo {
        is_licensed: true,
        license_key: Some(key.to_string()),
        license_type: LicenseType::Professional,
        ..LicenseInfo::default()
    }
}

fn trial_info(minutes_remaining: i64, start_offset_minutes: i64) -> LicenseInfo {
    LicenseInfo {
        is_trial_active: minutes_remaining > 0,
        trial_start: Some(Utc::now() - Duration::minutes(start_offset_minutes)),
        trial_minutes_remaining: minutes_remaining,
        ..LicenseInfo::default()
    }
}

// ── Integrity short-circuit ──────────────────────────────────────

#[test]
fn unverified_integrity_denies_everything() {
    let key = generate_license_key("gate-test");
    let now = Utc::now();

    for info in [
        licensed_info(&key),
        trial_info(30, 1),
        LicenseInfo::default(),
    ] {
        let decision = evaluate(&info, false, false, now);
        assert!(!decision.allowed);
        assert_eq!(decision.reason, Some(DenialReason::IntegrityCheckFailed));
    }
}

#[test]
fn integrity_precedes_even_tamper_denials() {
    let decision = evaluate(&LicenseInfo::default(), false, true, Utc::now());
    assert_eq!(decision.reason, Some(DenialReason::IntegrityCheckFailed));
}

// ── Licensed path ────────────────────────────────────────────────

#[test]
fn valid_license_allows() {
    let key = generate_license_key("gate-test");
    let decision = evaluate(&licensed_info(&key), true, false, Utc::now());
    assert!(decision.allowed);
    assert_eq!(decision.reason, None);
}

#[test]
fn valid_license_with_tamper_flag_denies() {
    // Fail closed: a mathematically valid key does not help once
    // tampering has been seen.
    let key = generate_license_key("gate-test");
    let decision = evaluate(&licensed_info(&key), true, true, Utc::now());
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenialReason::LicenseValidationFailed));
}

#[test]
fn licensed_snapshot_with_invalid_key_denies() {
    // The snapshot claims licensed but the key no longer revalidates.
    let decision = evaluate(
        &licensed_info("AAAA-BBBB-CCCC-DDDD"),
        true,
        false,
        Utc::now(),
    );
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenialReason::LicenseValidationFailed));
}

#[test]
fn licensed_snapshot_with_no_key_denies() {
    let info = LicenseInfo {
        is_licensed: true,
        license_key: None,
        ..LicenseInfo::default()
    };
    let decision = evaluate(&info, true, false, Utc::now());
    assert!(!decision.allowed);
}

// ── Trial path ───────────────────────────────────────────────────

#[test]
fn active_trial_allows() {
    let decision = evaluate(&trial_info(25, 5), true, false, Utc::now());
    assert!(decision.allowed);
}

#[test]
fn active_trial_allows_even_with_tamper_flag() {
    // Tampering fails the *license* path closed; the trial path is
    // governed by its own start-time plausibility check.
    let decision = evaluate(&trial_info(25, 5), true, true, Utc::now());
    assert!(decision.allowed);
}

#[test]
fn future_trial_start_denies() {
    // Start "10 minutes from now": someone edited a store.
    let decision = evaluate(&trial_info(25, -10), true, false, Utc::now());
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenialReason::NoTrialOrLicense));
}

#[test]
fn expired_trial_denies_with_trial_expired() {
    let info = LicenseInfo {
        is_trial_active: false,
        trial_start: Some(Utc::now() - Duration::hours(2)),
        trial_minutes_remaining: 0,
        ..LicenseInfo::default()
    };
    let decision = evaluate(&info, true, false, Utc::now());
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenialReason::TrialExpired));
}

#[test]
fn no_trial_and_no_license_denies() {
    let info = LicenseInfo {
        is_trial_active: false,
        trial_minutes_remaining: 5,
        ..LicenseInfo::default()
    };
    let decision = evaluate(&info, true, false, Utc::now());
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenialReason::NoTrialOrLicense));
}
