//! Host frame driving: wall-clock deltas and per-frame statistics.
//!
//! # Invariants
//! - A paused clock yields no deltas; paused wall time never reaches the
//!   simulation.
//! - Statistics are diagnostics only; nothing here feeds back into stepping.

mod frame;

pub use frame::{FrameClock, FrameSample, FrameStats};

pub fn crate_info() -> &'static str {
    "tempo-clock v0.1.0"
}
