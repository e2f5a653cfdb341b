//! End-to-end tests of the protection facade.

mod common;

use chrono::Utc;
use common::harness;
use pretty_assertions::assert_eq;
use quillnote_license::generate_license_key;
use quillnote_store::{obfuscate_timestamp, StoreBackend, TRIAL_START_KEY};
use quillnote_types::LicenseType;

const TRIAL_MINUTES: i64 = 30;

/// Plants an old trial start in every backend.
fn expire_trial(h: &common::Harness) {
    let long_ago = Utc::now().timestamp() - (TRIAL_MINUTES + 10) * 60;
    let encoded = obfuscate_timestamp(long_ago).to_string();
    for backend in &h.backends {
        backend.write(TRIAL_START_KEY, &encoded);
    }
}

// ── Fresh install ────────────────────────────────────────────────

#[test]
fn fresh_install_opens_a_full_trial() {
    let h = harness(TRIAL_MINUTES);

    let info = h.core.get_license_info();
    assert!(!info.is_licensed);
    assert!(info.is_trial_active);
    assert_eq!(info.trial_minutes_remaining, TRIAL_MINUTES);
    assert_eq!(info.license_type, LicenseType::Free);
    assert!(info.trial_start.is_some());
}

#[test]
fn expired_trial_reports_inactive() {
    let h = harness(TRIAL_MINUTES);
    expire_trial(&h);

    let info = h.core.get_license_info();
    assert!(!info.is_trial_active);
    assert_eq!(info.trial_minutes_remaining, 0);
}

// ── Activation ───────────────────────────────────────────────────

#[test]
fn activation_round_trip() {
    let h = harness(TRIAL_MINUTES);
    let key = generate_license_key("customer-7");

    assert!(h.core.validate_license(&key));
    assert!(h.core.save_license_key(&key));

    let info = h.core.get_license_info();
    assert!(info.is_licensed);
    assert_eq!(info.license_type, LicenseType::Professional);
    assert_eq!(info.license_key.as_deref(), Some(key.as_str()));
    assert!(info.activation_time.is_some());
}

#[test]
fn stored_invalid_key_falls_back_to_trial() {
    let h = harness(TRIAL_MINUTES);
    // Persisting is allowed; licensing is not.
    assert!(h.core.save_license_key("AAAA-BBBB-CCCC-DDDD"));

    let info = h.core.get_license_info();
    assert!(!info.is_licensed);
    assert!(info.is_trial_active);
    // The bad key stays visible for the activation dialog.
    assert_eq!(info.license_key.as_deref(), Some("AAAA-BBBB-CCCC-DDDD"));
}

// ── Integrity precedence ─────────────────────────────────────────

#[test]
fn access_denied_until_integrity_verified() {
    let h = harness(TRIAL_MINUTES);
    let key = generate_license_key("customer-7");
    h.core.save_license_key(&key);

    // verify_code_integrity has not run: everything is denied, license
    // or no license.
    assert!(!h.core.check_feature_access("export"));
    assert!(!h.core.is_feature_unlocked("export"));

    let message = h.notices.last_message().unwrap();
    assert!(message.contains("export"));
    assert!(message.contains("Integrity check failed"));
}

#[test]
fn access_allowed_after_integrity_verified() {
    let h = harness(TRIAL_MINUTES);
    h.core.verify_code_integrity();
    assert!(h.core.integrity_verified());

    // Trial is fresh, so both entry points allow, silently.
    assert!(h.core.check_feature_access("export"));
    assert!(h.core.is_feature_unlocked("export"));
    assert_eq!(h.notices.count(), 0);
}

// ── Gating scenarios and entry-point equivalence ─────────────────

#[test]
fn licensed_access_is_allowed_and_silent() {
    let h = harness(TRIAL_MINUTES);
    h.core.verify_code_integrity();
    h.core.save_license_key(&generate_license_key("customer-7"));

    assert!(h.core.check_feature_access("tags"));
    assert!(h.core.is_feature_unlocked("tags"));
    assert_eq!(h.notices.count(), 0);
}

#[test]
fn expired_trial_denies_with_feature_named_notice() {
    let h = harness(TRIAL_MINUTES);
    h.core.verify_code_integrity();
    expire_trial(&h);

    assert!(!h.core.check_feature_access("search"));
    let message = h.notices.last_message().unwrap();
    assert!(message.contains("search"));
    assert!(message.contains("Trial expired"));
}

#[test]
fn entry_points_agree_across_scenarios() {
    // Scenario: fresh trial.
    let h = harness(TRIAL_MINUTES);
    h.core.verify_code_integrity();
    assert_eq!(
        h.core.check_feature_access("export"),
        h.core.is_feature_unlocked("export")
    );

    // Scenario: expired trial.
    expire_trial(&h);
    assert_eq!(
        h.core.check_feature_access("export"),
        h.core.is_feature_unlocked("export")
    );

    // Scenario: licensed.
    h.core.save_license_key(&generate_license_key("customer-7"));
    assert_eq!(
        h.core.check_feature_access("export"),
        h.core.is_feature_unlocked("export")
    );

    // Scenario: stored key that does not validate.
    h.core.save_license_key("AAAA-BBBB-CCCC-0000");
    assert_eq!(
        h.core.check_feature_access("export"),
        h.core.is_feature_unlocked("export")
    );
}

// ── Usage ────────────────────────────────────────────────────────

#[test]
fn usage_counting_through_the_facade() {
    let h = harness(TRIAL_MINUTES);

    assert_eq!(h.core.total_usage_count(), 0);
    for _ in 0..3 {
        h.core.increment_usage();
    }
    assert_eq!(h.core.total_usage_count(), 3);

    let state = h.core.usage_state();
    assert_eq!(state.reconciled_count, 3);
    assert_eq!(state.per_source_counts, vec![3, 3, 3]);
    assert!(h.core.verify_usage_integrity());
}

#[test]
fn save_limit_through_the_facade() {
    let h = harness(TRIAL_MINUTES);
    let limit = h.core.free_save_limit();

    for _ in 0..limit {
        h.core.increment_usage();
    }
    assert!(h.core.is_save_limit_reached(limit));
    assert_eq!(h.core.remaining_saves(limit), 0);

    h.core.reset_usage_count();
    assert!(!h.core.is_save_limit_reached(limit));
    assert_eq!(h.core.remaining_saves(limit), limit);
}

// ── Startup wiring ───────────────────────────────────────────────

#[tokio::test]
async fn startup_checks_run_inside_a_runtime() {
    let h = harness(TRIAL_MINUTES);
    // Spawns the background monitor; in an untraced test process this
    // must not flag anything by itself. The timing threshold is the
    // shipped 50ms, far above what the probe loop takes.
    h.core.perform_startup_checks();
    h.core.check_debugger_presence();
}
