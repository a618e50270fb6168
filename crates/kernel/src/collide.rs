use glam::{Mat4, Vec3};
use tempo_common::BodyId;

use crate::Body;

/// Squared-distance threshold of the overlap test: unit-sphere radius with
/// 10% leeway.
pub const UNIT_SPHERE_LEEWAY_SQ: f32 = 1.1;

impl Body {
    /// Inverse of the drawn transform, computed once and reused when testing
    /// this body against many others.
    pub fn drawn_inverse(&self) -> Mat4 {
        self.drawn_location().inverse()
    }

    /// Sampled overlap test against `other`.
    ///
    /// Maps `other`'s drawn transform into this body's local unit-sphere
    /// space and reports a collision as soon as any sample point lands within
    /// the leeway radius. Approximate by construction: a sparse sample cloud
    /// can miss a shallow overlap, and that is accepted behavior, not a bug.
    /// A body never collides with itself.
    pub fn check_if_colliding(&self, other: &Body, self_inverse: &Mat4, samples: &[Vec3]) -> bool {
        if self.id == other.id {
            return false;
        }
        let to_local = *self_inverse * other.drawn_location();
        samples
            .iter()
            .any(|&p| to_local.transform_point3(p).length_squared() < UNIT_SPHERE_LEEWAY_SQ)
    }
}

/// All colliding pairs among `bodies`, testing each unordered pair once in
/// collection order. Each body's inverse transform is computed once up front.
pub fn colliding_pairs(bodies: &[Body], samples: &[Vec3]) -> Vec<(BodyId, BodyId)> {
    let inverses: Vec<Mat4> = bodies.iter().map(Body::drawn_inverse).collect();
    let mut pairs = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if a.check_if_colliding(b, &inverses[i], samples) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}
