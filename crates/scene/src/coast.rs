use tempo_kernel::{Body, StepPolicy};

/// No forces, no spawning, no culling: bodies drift on their initial
/// velocities. Useful as a neutral policy for tests and demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coast;

impl StepPolicy for Coast {
    fn update(&mut self, _dt: f32, _bodies: &mut Vec<Body>) {}
}
