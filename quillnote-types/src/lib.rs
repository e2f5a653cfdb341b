//! Core type definitions for the Quillnote protection subsystem.
//!
//! This crate defines the plugin-agnostic types shared between the
//! persistence layer, the runtime guards, and the feature gate:
//! - License and trial snapshots consumed by the UI
//! - Reconciled trial/usage state produced by the store layer
//! - Feature-gate decisions and denial reasons
//!
//! Domain types for notes themselves (documents, blocks, rich text)
//! live in the editor core, not here.

mod decision;
mod info;
mod state;

pub use decision::{DenialReason, FeatureDecision};
pub use info::{LicenseInfo, LicenseType};
pub use state::{TrialState, UsageState};
