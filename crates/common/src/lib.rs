//! Shared vocabulary: body and asset identifiers, pose snapshots, seeded randomness.
//!
//! # Invariants
//! - Identifiers are plain values; nothing in this crate owns simulation state.
//! - `SeedRng` sequences depend only on the seed, never on ambient entropy.

pub mod rng;
pub mod types;

pub use rng::SeedRng;
pub use types::{BodyId, MaterialId, Pose, ShapeId};
