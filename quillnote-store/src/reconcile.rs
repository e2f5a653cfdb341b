//! Reconciliation strategies over redundant readings.
//!
//! One logical value, several independently lossy sources: these fold a
//! list of optional readings into the single trusted value. Absent
//! sources are excluded rather than defaulted, so a partially deleted
//! or partially written set of stores still reconciles to the most
//! restrictive surviving reading.

/// Min-wins reconciliation, used for trial-start timestamps.
///
/// Deleting some but not all copies cannot move the trial start later.
#[must_use]
pub fn earliest<T: Ord + Copy>(candidates: &[Option<T>]) -> Option<T> {
    candidates.iter().flatten().copied().min()
}

/// Max-wins reconciliation, used for usage counts.
///
/// Deleting a store cannot roll the count back.
#[must_use]
pub fn highest<T: Ord + Copy>(candidates: &[Option<T>]) -> Option<T> {
    candidates.iter().flatten().copied().max()
}
