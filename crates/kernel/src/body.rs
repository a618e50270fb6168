use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tempo_common::{BodyId, MaterialId, Pose, ShapeId};

/// How `blend` interpolates between the previous and current rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationBlend {
    /// Component-wise matrix lerp. Exact at the endpoints, but the in-between
    /// matrices are not pure rotations: a large per-step rotation delta
    /// shears the drawn shape. Default, for parity with renderers tuned
    /// against it.
    #[default]
    Linear,
    /// Quaternion slerp. Stays on the rotation manifold at every alpha.
    Spherical,
}

/// One simulated rigid body.
///
/// Physics state is `center`/`rotation` plus velocities; `previous` is the
/// pose exactly one fixed step older, kept for interpolation. The only
/// render-facing output is the drawn transform, recomputed by `blend` every
/// frame and never read back into physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub shape: ShapeId,
    pub material: MaterialId,
    /// Per-axis extents applied as the final scale of the drawn transform.
    pub size: Vec3,
    pub center: Vec3,
    /// Current orientation. Pure rotation; scale lives in `size`.
    pub rotation: Mat3,
    /// Pose at the start of the current fixed step.
    pub previous: Pose,
    pub linear_velocity: Vec3,
    /// Signed rotation rate in radians per second about `spin_axis`.
    pub angular_velocity: f32,
    /// Unit axis the body spins about, in world space.
    pub spin_axis: Vec3,
    pub rotation_blend: RotationBlend,
    drawn_location: Mat4,
}

impl Body {
    /// Create a body at the origin with identity orientation and no motion.
    pub fn new(shape: ShapeId, material: MaterialId, size: Vec3) -> Self {
        Self {
            id: BodyId::new(),
            shape,
            material,
            size,
            center: Vec3::ZERO,
            rotation: Mat3::IDENTITY,
            previous: Pose::default(),
            linear_velocity: Vec3::ZERO,
            angular_velocity: 0.0,
            spin_axis: Vec3::Z,
            rotation_blend: RotationBlend::default(),
            drawn_location: Mat4::from_scale(size),
        }
    }

    /// Place the body and give it its motion. Consumes and returns `self` so
    /// placement chains off `new`.
    ///
    /// `location` must be rigid (rotation plus translation): its translation
    /// becomes `center`, its upper 3x3 becomes `rotation`, and any scale
    /// belongs in `size` instead. `previous` starts equal to the placed pose
    /// so the first blend is well-defined.
    pub fn emplace(
        mut self,
        location: Mat4,
        linear_velocity: Vec3,
        angular_velocity: f32,
        spin_axis: Vec3,
    ) -> Self {
        self.center = location.w_axis.truncate();
        self.rotation = Mat3::from_mat4(location);
        self.previous = Pose {
            center: self.center,
            rotation: self.rotation,
        };
        self.linear_velocity = linear_velocity;
        self.angular_velocity = angular_velocity;
        self.spin_axis = spin_axis.try_normalize().unwrap_or(Vec3::Z);
        self.drawn_location = location * Mat4::from_scale(self.size);
        self
    }

    /// Advance one fixed step: forward Euler on the center, an incremental
    /// world-space rotation about `spin_axis` pre-multiplied onto the
    /// orientation.
    ///
    /// Snapshots the pre-step pose into `previous` first, so `previous` is
    /// always exactly one step older than the current state.
    pub fn advance(&mut self, dt: f32) {
        self.previous = Pose {
            center: self.center,
            rotation: self.rotation,
        };
        self.center += self.linear_velocity * dt;
        self.rotation =
            Mat3::from_axis_angle(self.spin_axis, self.angular_velocity * dt) * self.rotation;
    }

    /// Recompute the drawn transform for a render frame.
    ///
    /// `alpha` is the fraction of a fixed step not yet simulated: 0 draws
    /// `previous`, 1 draws the current pose, values between draw an
    /// interpolated pose. The result is translation, then blended rotation,
    /// then scale by `size`.
    pub fn blend(&mut self, alpha: f32) {
        let center = self.previous.center.lerp(self.center, alpha);
        let rotation = self.blend_rotation(alpha);
        self.drawn_location = Mat4::from_translation(center)
            * Mat4::from_mat3(rotation)
            * Mat4::from_scale(self.size);
    }

    /// Interpolated rotation according to the body's `rotation_blend` mode.
    pub fn blend_rotation(&self, alpha: f32) -> Mat3 {
        match self.rotation_blend {
            RotationBlend::Linear => {
                self.previous.rotation * (1.0 - alpha) + self.rotation * alpha
            }
            RotationBlend::Spherical => {
                let from = Quat::from_mat3(&self.previous.rotation);
                let to = Quat::from_mat3(&self.rotation);
                Mat3::from_quat(from.slerp(to, alpha))
            }
        }
    }

    /// The render-ready transform produced by the most recent `blend` (or by
    /// placement, before the first frame).
    pub fn drawn_location(&self) -> Mat4 {
        self.drawn_location
    }

    /// Current speed in units per second.
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }
}
