use tempo_clock::FrameClock;
use tempo_kernel::{Simulation, StepPolicy};

/// Factor the speed controls multiply or divide the time scale by.
pub const TIME_SCALE_FACTOR: f64 = 5.0;

/// A high-level time control that any host surface can produce.
///
/// The simulation and clock consume actions, never raw input events, so a
/// CLI flag, a key binding, and a panel button all behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAction {
    /// Multiply the time scale by the speed factor.
    SpeedUpTime,
    /// Divide the time scale by the speed factor.
    SlowDownTime,
    /// Negate the time scale, running simulated time backward.
    ReverseTime,
    /// Pause or resume the frame clock.
    TogglePause,
    /// No-op (for input mappings that haven't been bound yet).
    Noop,
}

impl TimeAction {
    /// Apply this action to a simulation and its frame clock.
    pub fn apply<P: StepPolicy>(self, sim: &mut Simulation<P>, clock: &mut FrameClock) {
        match self {
            TimeAction::SpeedUpTime => {
                let scale = sim.time_scale() * TIME_SCALE_FACTOR;
                sim.set_time_scale(scale);
                tracing::debug!(scale, "time scale changed");
            }
            TimeAction::SlowDownTime => {
                let scale = sim.time_scale() / TIME_SCALE_FACTOR;
                sim.set_time_scale(scale);
                tracing::debug!(scale, "time scale changed");
            }
            TimeAction::ReverseTime => {
                let scale = -sim.time_scale();
                sim.set_time_scale(scale);
                tracing::debug!(scale, "time scale reversed");
            }
            TimeAction::TogglePause => clock.toggle_pause(),
            TimeAction::Noop => {}
        }
    }
}
