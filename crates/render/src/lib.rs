//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - A renderer never mutates simulation state.
//! - Renderers consume the blended drawn transform and the shape/material
//!   handles, nothing else from a body.
//!
//! # Workaround
//! Ships a debug text renderer in place of a graphical backend. The trait is
//! the stable seam; a GPU implementation slots in without changing consumers.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "tempo-render v0.1.0"
}
