//! Simulation core: bodies, fixed-timestep stepping, interpolation, collision.
//!
//! # Invariants
//! - Trajectories depend only on cumulative delivered time, not on how the
//!   host batches its frame calls.
//! - `|time_accumulator| < dt` holds after every `step` call.
//! - Rendering consumes blended transforms only; physics state is never
//!   derived from a drawn transform.

pub mod body;
pub mod collide;
pub mod simulation;

pub use body::{Body, RotationBlend};
pub use collide::{UNIT_SPHERE_LEEWAY_SQ, colliding_pairs};
pub use simulation::{ConfigError, Simulation, SimulationConfig, StepPolicy};
