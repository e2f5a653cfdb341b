//! Runtime tamper and integrity guards for Quillnote.
//!
//! This crate owns the sticky protection state and the heuristics that
//! feed it:
//! - [`ProtectionContext`] — the per-process sticky flags, shared by
//!   reference between the foreground gate and the background sentinel.
//! - [`IntegrityMonitor`] — one-shot startup verification that the
//!   running binary and the license-validation routine look unmodified.
//! - [`DebuggerSentinel`] — startup, on-demand, and periodic background
//!   detection of attached debugging tools.
//! - [`NoticeSink`] — how detections reach the user. Detection is
//!   deliberately non-fatal: it surfaces a notice and degrades feature
//!   gating, but never corrupts data or exits.
//!
//! Everything here is a heuristic against casual tampering. A
//! determined reverse engineer gets through; that is outside the
//! threat model.

mod context;
mod integrity;
mod notice;
mod sentinel;

pub use context::ProtectionContext;
pub use integrity::{validator_probe, IntegrityMonitor};
pub use notice::{LogNotice, NoticeSink};
pub use sentinel::{parse_tracer_pid, DebuggerSentinel};
