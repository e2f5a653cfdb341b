//! Redundant obfuscated persistence for the Quillnote protection core.
//!
//! Trial and usage state is written to several independent backends (a
//! preference store plus hidden file caches) and reconciled on read:
//! the earliest timestamp wins for the trial start, the highest
//! checksum-valid count wins for usage. An attacker who deletes some
//! but not all copies gains nothing, and a crash mid-write is absorbed
//! because the surviving most-restrictive value is always trusted.
//!
//! Values are stored transformed (XOR + bit rotation, counters with an
//! additive offset) to raise the cost of casual editing. The transforms
//! are reversible and documented; they are obfuscation, not crypto.
//!
//! # Error posture
//!
//! Reads fail closed: a missing file, denied permission, or undecodable
//! value makes that source absent. Writes fail open: failures are
//! logged and swallowed so a storage fault in the protection layer
//! never blocks note-taking.

mod backend;
mod error;
mod license_file;
mod obfuscate;
mod reconcile;
mod trial;
mod usage;

pub use backend::{CacheFileBackend, MemoryBackend, PrefsBackend, StoreBackend};
pub use error::{StoreError, StoreResult};
pub use license_file::LicenseFileStore;
pub use obfuscate::{
    count_checksum, deobfuscate_count, deobfuscate_timestamp, obfuscate_count,
    obfuscate_timestamp,
};
pub use reconcile::{earliest, highest};
pub use trial::{TrialClock, TRIAL_START_KEY};
pub use usage::{UsageCounter, USAGE_CHECK_KEY, USAGE_COUNT_KEY};
