//! Time controls: host surfaces mapped to shared actions.
//!
//! # Invariants
//! - Every host surface (CLI flags, key bindings, panels) produces the same
//!   actions; the simulation and clock never see raw input events.

pub mod action;

pub use action::{TIME_SCALE_FACTOR, TimeAction};

pub fn crate_info() -> &'static str {
    "tempo-control v0.1.0"
}
