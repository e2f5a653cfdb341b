mod common;

use common::RecordingNotice;
use quillnote_guard::{validator_probe, IntegrityMonitor, ProtectionContext};
use std::sync::Arc;

const MIN_EXE_BYTES: u64 = 10_000;

// ── Validator probe ──────────────────────────────────────────────

#[test]
fn probe_passes_against_the_real_validator() {
    assert!(validator_probe());
}

#[test]
fn probe_is_stable() {
    // Deterministic inputs, deterministic verdict.
    assert_eq!(validator_probe(), validator_probe());
}

// ── One-shot startup verification ────────────────────────────────

#[test]
fn verification_passes_in_an_unmodified_process() {
    let ctx = Arc::new(ProtectionContext::new());
    let notices = RecordingNotice::new();
    let monitor = IntegrityMonitor::new(Arc::clone(&ctx), notices.clone(), MIN_EXE_BYTES);

    monitor.verify_startup();

    assert!(ctx.integrity_verified());
    assert_eq!(notices.count(), 0);
}

#[test]
fn verification_is_one_shot() {
    let ctx = Arc::new(ProtectionContext::new());
    let notices = RecordingNotice::new();
    let monitor = IntegrityMonitor::new(Arc::clone(&ctx), notices.clone(), MIN_EXE_BYTES);

    monitor.verify_startup();
    assert!(ctx.integrity_verified());

    // A later degradation is permanent; re-running the (one-shot)
    // verification cannot raise the flag back.
    ctx.mark_unverified();
    monitor.verify_startup();
    assert!(!ctx.integrity_verified());
}

#[test]
fn implausible_executable_size_fails_verification() {
    let ctx = Arc::new(ProtectionContext::new());
    let notices = RecordingNotice::new();
    // A threshold no real binary meets: the running test executable is
    // smaller than this, so the size check must fail.
    let monitor = IntegrityMonitor::new(Arc::clone(&ctx), notices.clone(), u64::MAX);

    monitor.verify_startup();

    assert!(!ctx.integrity_verified());
    assert_eq!(notices.count(), 1);
    assert!(notices.titles()[0].contains("Integrity"));
}

#[test]
fn failed_verification_is_permanent_for_the_run() {
    let ctx = Arc::new(ProtectionContext::new());
    let notices = RecordingNotice::new();
    let failing = IntegrityMonitor::new(Arc::clone(&ctx), notices.clone(), u64::MAX);
    failing.verify_startup();
    assert!(!ctx.integrity_verified());

    // Even a monitor with a sane threshold cannot flip the recorded
    // outcome within the same run.
    let sane = IntegrityMonitor::new(Arc::clone(&ctx), notices, MIN_EXE_BYTES);
    sane.verify_startup();
    assert!(!ctx.integrity_verified());
}
