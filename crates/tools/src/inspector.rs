use tempo_common::BodyId;
use tempo_kernel::{Simulation, StepPolicy};

/// Simulation inspector for developer tooling.
///
/// Read-only queries against a running simulation for debugging and
/// diagnostic display: the live readouts a host surface shows next to the
/// scene.
pub struct SimInspector;

impl SimInspector {
    /// Produce a summary of the simulation state.
    pub fn summary<P: StepPolicy>(sim: &Simulation<P>) -> SimSummary {
        SimSummary {
            t: sim.t(),
            dt: sim.dt(),
            time_scale: sim.time_scale(),
            steps_taken: sim.steps_taken(),
            alpha: sim.alpha(),
            body_count: sim.body_count(),
        }
    }

    /// Report on a specific body, if present.
    pub fn inspect_body<P: StepPolicy>(sim: &Simulation<P>, id: BodyId) -> Option<BodyInfo> {
        sim.body(id).map(|body| {
            let c = body.center;
            let d = body.drawn_location().w_axis.truncate();
            let s = body.size;
            BodyInfo {
                id,
                center: [c.x, c.y, c.z],
                drawn_position: [d.x, d.y, d.z],
                size: [s.x, s.y, s.z],
                speed: body.speed(),
                angular_velocity: body.angular_velocity,
            }
        })
    }

    /// List all body ids, in collection order.
    pub fn list_bodies<P: StepPolicy>(sim: &Simulation<P>) -> Vec<BodyId> {
        sim.bodies().iter().map(|b| b.id).collect()
    }
}

/// Summary of simulation state for the inspector.
#[derive(Debug, Clone)]
pub struct SimSummary {
    pub t: f64,
    pub dt: f64,
    pub time_scale: f64,
    pub steps_taken: u64,
    pub alpha: f64,
    pub body_count: usize,
}

impl std::fmt::Display for SimSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Simulation: t={:.3}s dt={:.3}s scale={} steps={} alpha={:.2} bodies={}",
            self.t, self.dt, self.time_scale, self.steps_taken, self.alpha, self.body_count
        )
    }
}

/// Detailed report on a single body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub id: BodyId,
    pub center: [f32; 3],
    pub drawn_position: [f32; 3],
    pub size: [f32; 3],
    pub speed: f32,
    pub angular_velocity: f32,
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Body [{:.8}] center=({:.2}, {:.2}, {:.2}) drawn=({:.2}, {:.2}, {:.2}) speed={:.2} spin={:.2}/s",
            &self.id.0.to_string()[..8],
            self.center[0],
            self.center[1],
            self.center[2],
            self.drawn_position[0],
            self.drawn_position[1],
            self.drawn_position[2],
            self.speed,
            self.angular_velocity,
        )
    }
}
