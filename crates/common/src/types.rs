use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub Uuid);

impl BodyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BodyId {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered shape sample cloud.
///
/// The simulation core never looks inside a shape; it carries the handle for
/// the renderer and the collision query to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// Handle to a registered material definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u64);

/// A captured body pose: center plus pure rotation, no scale baked in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub center: Vec3,
    pub rotation: Mat3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            rotation: Mat3::IDENTITY,
        }
    }
}
