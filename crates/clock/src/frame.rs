use std::time::{Duration, Instant};

/// Wall-clock frame delta source for a simulation host.
///
/// `tick` yields the seconds elapsed since the previous tick. While paused,
/// and on the arming tick after construction or resume, it yields `None`:
/// the host simply omits its step call, and paused wall time is never
/// delivered.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick, or `None` when there is nothing to
    /// deliver.
    pub fn tick(&mut self) -> Option<f64> {
        if self.paused {
            return None;
        }
        let now = Instant::now();
        let delta = self.last_frame.map(|prev| (now - prev).as_secs_f64());
        self.last_frame = Some(now);
        delta
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.last_frame = None;
        tracing::debug!("frame clock paused");
    }

    pub fn resume(&mut self) {
        self.paused = false;
        tracing::debug!("frame clock resumed");
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// One recorded frame: wall-clock duration and fixed steps consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSample {
    pub wall: Duration,
    pub steps: u32,
}

/// Fixed-capacity ring of recent frame samples, for diagnostics.
#[derive(Debug)]
pub struct FrameStats {
    history: Vec<FrameSample>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: vec![FrameSample::default(); capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, wall: Duration, steps: u32) {
        self.history[self.index] = FrameSample { wall, steps };
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.filled { self.capacity } else { self.index }
    }

    pub fn average_wall(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        let total: Duration = self.history[..count].iter().map(|s| s.wall).sum();
        total / count as u32
    }

    pub fn max_wall(&self) -> Duration {
        self.history[..self.count()]
            .iter()
            .map(|s| s.wall)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Largest number of fixed steps any recorded frame needed. Catch-up
    /// bursts after a stall show up here.
    pub fn max_steps(&self) -> u32 {
        self.history[..self.count()]
            .iter()
            .map(|s| s.steps)
            .max()
            .unwrap_or(0)
    }

    /// Steps consumed across the recorded window.
    pub fn total_steps(&self) -> u64 {
        self.history[..self.count()]
            .iter()
            .map(|s| s.steps as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_arms_then_measures() {
        let mut clock = FrameClock::new();
        assert!(clock.tick().is_none());

        std::thread::sleep(Duration::from_millis(5));
        let delta = clock.tick().expect("second tick has a delta");
        assert!(delta >= 0.005);
    }

    #[test]
    fn paused_clock_yields_nothing() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.pause();
        assert!(clock.is_paused());
        assert!(clock.tick().is_none());
        assert!(clock.tick().is_none());
    }

    #[test]
    fn resume_rearms_instead_of_flooding() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.pause();
        std::thread::sleep(Duration::from_millis(5));
        clock.resume();

        // First post-resume tick arms; the pause gap is swallowed.
        assert!(clock.tick().is_none());
        assert!(clock.tick().is_some());
    }

    #[test]
    fn toggle_flips_pause_state() {
        let mut clock = FrameClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn stats_track_history() {
        let mut stats = FrameStats::new(3);
        stats.record(Duration::from_millis(10), 1);
        stats.record(Duration::from_millis(20), 2);
        stats.record(Duration::from_millis(30), 6);

        assert_eq!(stats.count(), 3);
        assert_eq!(stats.average_wall(), Duration::from_millis(20));
        assert_eq!(stats.max_wall(), Duration::from_millis(30));
        assert_eq!(stats.max_steps(), 6);
        assert_eq!(stats.total_steps(), 9);
    }

    #[test]
    fn stats_wrap_around() {
        let mut stats = FrameStats::new(2);
        stats.record(Duration::from_millis(10), 1);
        stats.record(Duration::from_millis(20), 1);
        stats.record(Duration::from_millis(30), 3); // overwrites the first

        assert_eq!(stats.count(), 2);
        assert_eq!(stats.average_wall(), Duration::from_millis(25));
        assert_eq!(stats.max_steps(), 3);
    }
}
