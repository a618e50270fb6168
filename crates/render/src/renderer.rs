use glam::Vec3;
use tempo_kernel::Body;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-5.0, 10.0, 30.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads each body's drawn transform and handles plus a view
/// configuration, then produces output. It never mutates simulation state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given bodies and view.
    fn render(&self, bodies: &[Body], view: &RenderView) -> Self::Output;
}

/// Debug text renderer, standing in for a graphical backend.
///
/// Produces a human-readable listing of every body's drawn position and
/// handles. Useful for CLI output, logging, and testing the render seam.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, bodies: &[Body], view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Drawn Bodies ({}) ===\n", bodies.len()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for body in bodies {
            let p = body.drawn_location().w_axis.truncate();
            out.push_str(&format!(
                "  [{:.8}] pos=({:.2}, {:.2}, {:.2}) shape={} material={}\n",
                &body.id.0.to_string()[..8],
                p.x,
                p.y,
                p.z,
                &format!("{:016x}", body.shape.0)[..8],
                &format!("{:016x}", body.material.0)[..8],
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use tempo_common::{MaterialId, ShapeId};

    fn body_at(center: Vec3) -> Body {
        Body::new(ShapeId(0xabcd), MaterialId(0x1234), Vec3::ONE).emplace(
            Mat4::from_translation(center),
            Vec3::ZERO,
            0.0,
            Vec3::Z,
        )
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&[], &RenderView::default());

        assert!(output.contains("Drawn Bodies (0)"));
        assert!(output.contains("Camera:"));
    }

    #[test]
    fn debug_renderer_lists_drawn_positions() {
        let bodies = vec![body_at(Vec3::ZERO), body_at(Vec3::new(1.0, 2.0, 3.0))];
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&bodies, &RenderView::default());

        assert!(output.contains("Drawn Bodies (2)"));
        assert!(output.contains("pos=(1.00, 2.00, 3.00)"));
        assert!(output.contains("shape="));
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 45.0);
        assert_eq!(view.target, Vec3::ZERO);
    }
}
