use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tempo_common::{MaterialId, SeedRng, ShapeId};
use tempo_kernel::{Body, RotationBlend, StepPolicy};

/// Emission scene tuning. The defaults mirror the classic fireworks demo:
/// bodies rain from a high corner, bounce off a floor plane, and vanish once
/// they are both far away and slow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FountainConfig {
    /// Population the spawner tops the scene up to at the start of each step.
    pub population: usize,
    /// Center of the spawn region.
    pub spawn_center: Vec3,
    /// Per-component jitter around `spawn_center`.
    pub spawn_jitter: f32,
    /// Base launch direction, jittered then normalized per body.
    pub launch_direction: Vec3,
    /// Per-component jitter applied to the launch direction.
    pub launch_jitter: f32,
    /// Speed each launch is scaled to.
    pub launch_speed: f32,
    /// Acceleration applied along Z every step. Negative pulls down.
    pub gravity: f32,
    /// Height of the floor plane.
    pub floor_z: f32,
    /// Fraction of vertical speed kept when bouncing off the floor.
    pub restitution: f32,
    /// Bodies at least this far from the origin are culled.
    pub cull_distance: f32,
    /// Bodies at or below this speed are culled.
    pub min_speed: f32,
    /// Interpolation mode stamped on every spawned body.
    pub rotation_blend: RotationBlend,
}

impl Default for FountainConfig {
    fn default() -> Self {
        Self {
            population: 80,
            spawn_center: Vec3::new(20.0, 20.0, 20.0),
            spawn_jitter: 2.0,
            launch_direction: Vec3::new(0.0, 0.0, -1.0),
            launch_jitter: 2.0,
            launch_speed: 3.0,
            gravity: -9.8,
            floor_z: -8.0,
            restitution: 0.8,
            cull_distance: 45.0,
            min_speed: 2.0,
            rotation_blend: RotationBlend::Linear,
        }
    }
}

/// Continuous emission under gravity.
///
/// Each step tops the population up with freshly launched bodies, applies
/// gravity, reverses and damps the vertical velocity of anything about to
/// fall through the floor, and culls bodies that have strayed far and
/// slowed down.
#[derive(Debug, Clone)]
pub struct Fountain {
    config: FountainConfig,
    shape: ShapeId,
    material: MaterialId,
    rng: SeedRng,
}

impl Fountain {
    pub fn new(config: FountainConfig, shape: ShapeId, material: MaterialId, seed: u64) -> Self {
        Self {
            config,
            shape,
            material,
            rng: SeedRng::new(seed),
        }
    }

    pub fn config(&self) -> &FountainConfig {
        &self.config
    }

    fn spawn_body(&mut self) -> Body {
        // Slightly random vertical extent, like the demo's stretched shapes.
        let size = Vec3::new(1.0, 1.0 + self.rng.next_f32(), 1.0);
        let center = self.config.spawn_center + self.rng.jitter_vec3(self.config.spawn_jitter);
        let velocity = (self.config.launch_direction
            + self.rng.jitter_vec3(self.config.launch_jitter))
        .normalize_or_zero()
            * self.config.launch_speed;
        let angular_velocity = self.rng.next_f32();
        let spin_axis = self.rng.unit_vec3();

        let mut body = Body::new(self.shape, self.material, size).emplace(
            Mat4::from_translation(center),
            velocity,
            angular_velocity,
            spin_axis,
        );
        body.rotation_blend = self.config.rotation_blend;
        tracing::trace!(id = ?body.id, ?center, "spawned body");
        body
    }
}

impl StepPolicy for Fountain {
    fn update(&mut self, dt: f32, bodies: &mut Vec<Body>) {
        let before = bodies.len();
        while bodies.len() < self.config.population {
            let body = self.spawn_body();
            bodies.push(body);
        }
        if bodies.len() > before {
            tracing::debug!(spawned = bodies.len() - before, "topped up population");
        }

        for b in bodies.iter_mut() {
            b.linear_velocity.z += dt * self.config.gravity;
            if b.center.z < self.config.floor_z && b.linear_velocity.z < 0.0 {
                b.linear_velocity.z *= -self.config.restitution;
            }
        }
    }

    fn retain(&self, body: &Body) -> bool {
        body.center.length() < self.config.cull_distance && body.speed() > self.config.min_speed
    }
}
