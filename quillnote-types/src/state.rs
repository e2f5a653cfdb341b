//! Reconciled trial and usage state produced by the store layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The reconciled trial window, derived from every configured backend.
///
/// The start time is the earliest timestamp present in any backend, so
/// deleting some (but not all) copies never restarts the trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialState {
    /// Reconciled trial start (min over present sources).
    pub start_time: DateTime<Utc>,
    /// Whole minutes elapsed since the reconciled start.
    pub elapsed_minutes: i64,
    /// Whole minutes remaining, clamped to zero.
    pub remaining_minutes: i64,
    /// True while `remaining_minutes > 0`.
    pub active: bool,
}

/// The reconciled usage count, derived from every configured backend.
///
/// The count is the maximum across checksum-valid sources, so deleting
/// a store cannot roll it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageState {
    /// Reconciled count (max over accepted sources, plausibility-bounded).
    pub reconciled_count: u32,
    /// Raw decoded count per backend, absent sources reported as 0.
    pub per_source_counts: Vec<u32>,
}
