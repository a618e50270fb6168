//! Developer tooling: read-only simulation inspection.
//!
//! # Invariants
//! - Inspection never mutates simulation state.

pub mod inspector;

pub use inspector::{BodyInfo, SimInspector, SimSummary};

pub fn crate_info() -> &'static str {
    "tempo-tools v0.1.0"
}
