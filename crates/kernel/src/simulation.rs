use serde::{Deserialize, Serialize};
use thiserror::Error;
use tempo_common::BodyId;

use crate::Body;

/// Fixed-timestep configuration. Explicit fields, no ambient state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed step size in seconds. Constant for the life of the run.
    pub dt: f64,
    /// Upper bound on the magnitude of scaled frame time accepted per
    /// `step` call. Bounds catch-up work after a stall to a fixed number
    /// of steps instead of an unbounded backlog.
    pub max_frame_time: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 20.0,
            max_frame_time: 0.1,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidDt(self.dt));
        }
        if !(self.max_frame_time.is_finite() && self.max_frame_time > 0.0) {
            return Err(ConfigError::InvalidMaxFrameTime(self.max_frame_time));
        }
        Ok(())
    }
}

/// Rejected simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dt must be positive and finite, got {0}")]
    InvalidDt(f64),
    #[error("max_frame_time must be positive and finite, got {0}")]
    InvalidMaxFrameTime(f64),
}

/// Scene-supplied rules applied once per fixed step.
///
/// `update` runs before the bodies integrate and may mutate velocities or
/// push new bodies; `retain` runs after they integrate and decides which
/// bodies survive the step. A simulation cannot be constructed without a
/// policy, so the per-step hook can never silently be absent.
pub trait StepPolicy {
    /// Per-step rules: forces, spawning. Runs before bodies advance.
    fn update(&mut self, dt: f32, bodies: &mut Vec<Body>);

    /// Membership predicate, applied at the end of each step. Default keeps
    /// everything.
    fn retain(&self, _body: &Body) -> bool {
        true
    }
}

/// Fixed-timestep simulation driver.
///
/// Converts variable frame time into zero or more fixed `dt` steps and
/// leaves the fraction of a step not yet simulated in the accumulator, which
/// becomes the blend factor for rendering. Trajectories depend only on
/// cumulative delivered time (up to the `max_frame_time` clamp), never on
/// how render calls were batched.
///
/// # Invariants
/// - `|time_accumulator| < dt` after every `step` call.
/// - Every body's `previous` pose is exactly one step older than its current
///   pose.
/// - Membership changes apply between steps, never mid-iteration.
#[derive(Debug)]
pub struct Simulation<P: StepPolicy> {
    config: SimulationConfig,
    policy: P,
    bodies: Vec<Body>,
    time_scale: f64,
    time_accumulator: f64,
    t: f64,
    steps_taken: u64,
}

impl<P: StepPolicy> Simulation<P> {
    pub fn new(config: SimulationConfig, policy: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            policy,
            bodies: Vec::new(),
            time_scale: 1.0,
            time_accumulator: 0.0,
            t: 0.0,
            steps_taken: 0,
        })
    }

    /// Total simulated time in seconds, signed.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Fixed step size in seconds.
    pub fn dt(&self) -> f64 {
        self.config.dt
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Multiplier applied to incoming frame time. Negative runs the clock
    /// backward; zero freezes it.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.time_scale = time_scale;
    }

    /// Leftover time not yet simulated, in seconds.
    pub fn time_accumulator(&self) -> f64 {
        self.time_accumulator
    }

    /// Fraction of a step not yet simulated; the blend factor the last
    /// `step` call applied.
    pub fn alpha(&self) -> f64 {
        self.time_accumulator / self.config.dt
    }

    /// Total fixed steps taken over the life of the run.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut Vec<Body> {
        &mut self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Take ownership of a body. Returns its id for later lookup.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = body.id;
        self.bodies.push(body);
        id
    }

    /// Remove a body by id. Returns it if present.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(index))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Consume `frame_time` seconds of wall-clock time.
    ///
    /// The input is scaled by `time_scale` and clamped to `max_frame_time`
    /// in magnitude before entering the accumulator. Whole steps of `dt`
    /// are then simulated until less than one step of backlog remains; each
    /// step runs the policy's `update`, advances every body, and applies the
    /// policy's `retain` filter. The remaining fraction becomes the blend
    /// factor applied to every body.
    ///
    /// Returns the number of fixed steps taken by this call.
    pub fn step(&mut self, frame_time: f64) -> u32 {
        let scaled = frame_time * self.time_scale;
        let clamped = scaled.clamp(-self.config.max_frame_time, self.config.max_frame_time);
        if clamped != scaled {
            tracing::debug!(scaled, clamped, "frame time clamped");
        }
        self.time_accumulator += clamped;

        // Step direction follows the accumulator's sign. Draining toward
        // zero terminates even when time_scale flipped sign between frames
        // and left an opposite-signed remainder behind.
        let dt = self.config.dt;
        let signed_dt = if self.time_accumulator < 0.0 { -dt } else { dt };

        let mut steps_this_call = 0u32;
        while self.time_accumulator.abs() >= dt {
            self.policy.update(dt as f32, &mut self.bodies);
            for body in &mut self.bodies {
                body.advance(dt as f32);
            }
            self.t += signed_dt;
            self.time_accumulator -= signed_dt;
            self.steps_taken += 1;
            steps_this_call += 1;

            let policy = &self.policy;
            self.bodies.retain(|b| policy.retain(b));
        }

        if steps_this_call > 0 {
            tracing::trace!(
                steps = steps_this_call,
                t = self.t,
                bodies = self.bodies.len(),
                "fixed steps simulated"
            );
        }

        let alpha = self.alpha() as f32;
        for body in &mut self.bodies {
            body.blend(alpha);
        }
        steps_this_call
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use tempo_common::{MaterialId, ShapeId};

    /// Policy with no forces and no culling.
    struct Still;

    impl StepPolicy for Still {
        fn update(&mut self, _dt: f32, _bodies: &mut Vec<Body>) {}
    }

    fn moving_body(velocity: Vec3) -> Body {
        Body::new(ShapeId(1), MaterialId(1), Vec3::ONE).emplace(
            Mat4::IDENTITY,
            velocity,
            0.0,
            Vec3::Z,
        )
    }

    fn sim(dt: f64) -> Simulation<Still> {
        Simulation::new(
            SimulationConfig {
                dt,
                ..SimulationConfig::default()
            },
            Still,
        )
        .unwrap()
    }

    #[test]
    fn single_step_example() {
        let mut s = sim(0.05);
        let id = s.add_body(moving_body(Vec3::new(1.0, 0.0, 0.0)));

        let steps = s.step(0.05);

        assert_eq!(steps, 1);
        assert_eq!(s.steps_taken(), 1);
        assert!(s.time_accumulator().abs() < 1e-12);
        let body = s.body(id).unwrap();
        assert!(body.center.abs_diff_eq(Vec3::new(0.05, 0.0, 0.0), 1e-6));
        let drawn = body.drawn_location().w_axis.truncate();
        assert!(drawn.abs_diff_eq(body.center, 1e-6));
    }

    #[test]
    fn accumulator_stays_below_dt() {
        let mut s = sim(1.0 / 32.0);
        s.add_body(moving_body(Vec3::X));
        for frame in [0.016, 0.033, 0.07, 0.001, 0.099, 0.05] {
            s.step(frame);
            assert!(s.time_accumulator().abs() < s.dt());
        }
    }

    #[test]
    fn clamp_bounds_catch_up_work() {
        let mut s = sim(0.05);
        let steps = s.step(1000.0);

        // 0.1s of backlog at dt = 0.05 is exactly two steps.
        assert_eq!(steps, 2);
        assert_eq!(s.steps_taken(), 2);
        assert!((s.t() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn trajectories_independent_of_call_batching() {
        // Frame sizes are exact binary fractions below the clamp so the two
        // schedules deliver bit-identical accumulator arithmetic.
        let dt = 1.0 / 32.0;
        let mut a = sim(dt);
        let mut b = sim(dt);
        a.add_body(moving_body(Vec3::new(1.0, 2.0, -0.5)));
        b.add_body(a.bodies()[0].clone());

        for _ in 0..8 {
            a.step(1.0 / 32.0);
        }
        for _ in 0..4 {
            b.step(1.0 / 16.0);
        }

        assert_eq!(a.steps_taken(), b.steps_taken());
        assert_eq!(a.t(), b.t());
        assert_eq!(a.bodies()[0].center, b.bodies()[0].center);
        assert_eq!(a.bodies()[0].rotation, b.bodies()[0].rotation);
    }

    #[test]
    fn uneven_batching_still_agrees() {
        let dt = 1.0 / 32.0;
        let mut a = sim(dt);
        let mut b = sim(dt);
        a.add_body(moving_body(Vec3::X));
        b.add_body(a.bodies()[0].clone());

        // 3/32 then 1/32 versus four calls of 1/32.
        a.step(3.0 / 32.0);
        a.step(1.0 / 32.0);
        for _ in 0..4 {
            b.step(1.0 / 32.0);
        }

        assert_eq!(a.steps_taken(), b.steps_taken());
        assert_eq!(a.bodies()[0].center, b.bodies()[0].center);
    }

    #[test]
    fn zero_time_scale_freezes() {
        let mut s = sim(0.05);
        s.add_body(moving_body(Vec3::X));
        s.set_time_scale(0.0);

        let steps = s.step(1000.0);

        assert_eq!(steps, 0);
        assert_eq!(s.steps_taken(), 0);
        assert_eq!(s.t(), 0.0);
        assert_eq!(s.bodies()[0].center, Vec3::ZERO);
    }

    #[test]
    fn negative_time_scale_reverses_t() {
        let dt = 1.0 / 32.0;
        let mut s = sim(dt);
        let id = s.add_body(moving_body(Vec3::X));
        s.set_time_scale(-1.0);

        s.step(1.0 / 32.0);

        assert_eq!(s.steps_taken(), 1);
        assert_eq!(s.t(), -dt);
        // Bodies still integrate forward; reversing their motion is the
        // policy's business.
        let body = s.body(id).unwrap();
        assert!(body.center.x > 0.0);
    }

    #[test]
    fn time_scale_multiplies_delivered_time() {
        let dt = 1.0 / 32.0;
        let mut s = sim(dt);
        s.set_time_scale(2.0);

        let steps = s.step(1.0 / 32.0);

        assert_eq!(steps, 2);
        assert_eq!(s.t(), 2.0 * dt);
    }

    #[test]
    fn flipping_time_scale_with_leftover_terminates() {
        let dt = 0.05;
        let mut s = sim(dt);
        s.step(0.08); // one step, 0.03 leftover
        assert_eq!(s.steps_taken(), 1);

        s.set_time_scale(-1.0);
        let steps = s.step(0.1); // accumulator now 0.03 - 0.1 = -0.07

        assert_eq!(steps, 1);
        assert!(s.time_accumulator().abs() < dt);
        assert!(s.t() < dt);
    }

    #[test]
    fn update_runs_before_advance() {
        /// Gives every body a known velocity; bodies start inert.
        struct Kick;
        impl StepPolicy for Kick {
            fn update(&mut self, _dt: f32, bodies: &mut Vec<Body>) {
                for b in bodies {
                    b.linear_velocity = Vec3::X;
                }
            }
        }

        let mut s = Simulation::new(
            SimulationConfig {
                dt: 0.05,
                ..Default::default()
            },
            Kick,
        )
        .unwrap();
        let id = s.add_body(moving_body(Vec3::ZERO));
        s.step(0.05);

        // The kick applied this step already moved the body.
        assert!((s.body(id).unwrap().center.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn retain_filters_at_end_of_each_step() {
        /// Culls anything past x = 0.06.
        struct Cull;
        impl StepPolicy for Cull {
            fn update(&mut self, _dt: f32, _bodies: &mut Vec<Body>) {}
            fn retain(&self, body: &Body) -> bool {
                body.center.x < 0.06
            }
        }

        let mut s = Simulation::new(
            SimulationConfig {
                dt: 0.05,
                ..Default::default()
            },
            Cull,
        )
        .unwrap();
        s.add_body(moving_body(Vec3::X));

        s.step(0.05); // x = 0.05, retained
        assert_eq!(s.body_count(), 1);

        s.step(0.05); // x = 0.10, culled at end of step
        assert_eq!(s.body_count(), 0);
        assert_eq!(s.steps_taken(), 2);
    }

    #[test]
    fn spawned_body_failing_retain_never_survives() {
        /// Spawns far-away bodies that its own retain predicate rejects.
        struct SpawnDoomed;
        impl StepPolicy for SpawnDoomed {
            fn update(&mut self, _dt: f32, bodies: &mut Vec<Body>) {
                bodies.push(
                    Body::new(ShapeId(1), MaterialId(1), Vec3::ONE).emplace(
                        Mat4::from_translation(Vec3::new(100.0, 0.0, 0.0)),
                        Vec3::ZERO,
                        0.0,
                        Vec3::Z,
                    ),
                );
            }
            fn retain(&self, body: &Body) -> bool {
                body.center.length() < 50.0
            }
        }

        let mut s = Simulation::new(SimulationConfig::default(), SpawnDoomed).unwrap();
        s.step(0.1);
        assert!(s.steps_taken() > 0);
        assert_eq!(s.body_count(), 0);
    }

    #[test]
    fn remove_body_by_id() {
        let mut s = sim(0.05);
        let id = s.add_body(moving_body(Vec3::X));
        assert!(s.body(id).is_some());
        let removed = s.remove_body(id);
        assert!(removed.is_some());
        assert_eq!(s.body_count(), 0);
        assert!(s.remove_body(id).is_none());
    }

    #[test]
    fn config_rejects_bad_dt() {
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig {
                dt,
                ..SimulationConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidDt(_))));
        }
    }

    #[test]
    fn config_rejects_bad_max_frame_time() {
        let config = SimulationConfig {
            max_frame_time: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxFrameTime(_))
        ));
    }

    #[test]
    fn alpha_is_leftover_fraction_and_drives_blend() {
        let dt = 1.0 / 32.0;
        let mut s = sim(dt);
        let id = s.add_body(moving_body(Vec3::X));

        s.step(3.0 / 64.0); // 1.5 steps: one taken, half a step leftover

        assert_eq!(s.steps_taken(), 1);
        assert!((s.alpha() - 0.5).abs() < 1e-12);
        let drawn = s.body(id).unwrap().drawn_location().w_axis.truncate();
        // Halfway between the previous center (origin) and the stepped one.
        assert!(drawn.abs_diff_eq(Vec3::new((dt as f32) / 2.0, 0.0, 0.0), 1e-6));
    }
}
