//! Scene policies: the per-step rules a simulation runs with.
//!
//! # Invariants
//! - Policies own all scene randomness through a seeded generator; a given
//!   seed replays the same trajectories.
//! - Policies never touch the accumulator or blend factor; they see bodies
//!   once per fixed step.

pub mod coast;
pub mod fountain;

pub use coast::Coast;
pub use fountain::{Fountain, FountainConfig};

pub fn crate_info() -> &'static str {
    "tempo-scene v0.1.0"
}
