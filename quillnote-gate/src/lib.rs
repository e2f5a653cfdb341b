//! Feature gating and the protection facade for Quillnote.
//!
//! The UI layer talks to exactly one type here, [`ProtectionCore`]: it
//! owns the trial clock, usage counter, license store, integrity
//! monitor, and debugger sentinel, and combines their answers into
//! allow/deny verdicts per feature request.
//!
//! # Decision order
//!
//! For every feature request: cheap debugger recheck, integrity
//! short-circuit, fresh license/trial snapshot, then first-match
//! evaluation (licensed → trial → deny). Denials surface a
//! feature-named notice; approvals are silent.

mod config;
mod gate;
mod manager;

pub use config::ProtectionConfig;
pub use gate::evaluate;
pub use manager::ProtectionCore;
