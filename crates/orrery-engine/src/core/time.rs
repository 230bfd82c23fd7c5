/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of simulation ticks so the
/// per-tick smoothing in the camera behaves the same at 30, 60 or 144 Hz.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Upper bound on ticks per frame (spiral-of-death guard).
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Elapsed simulation time.
///
/// Stored as f64: orbit angles are `speed * t`, and an f32 clock loses
/// sub-frame precision after a few hours of uptime.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    elapsed: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at a given timestamp (restart/replay).
    pub fn starting_at(elapsed: f64) -> Self {
        Self { elapsed }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0) as f64;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Repeating timer driven by tick deltas rather than a background thread.
/// Firing only reports how many periods elapsed; the caller applies the effect
/// inside the same tick.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: f32,
    elapsed: f32,
    cancelled: bool,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            cancelled: false,
        }
    }

    /// Advance by `dt`. Returns how many times the timer fired.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.cancelled || self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt.max(0.0);
        let fires = (self.elapsed / self.interval) as u32;
        self.elapsed -= fires as f32 * self.interval;
        fires
    }

    /// Stop the timer for good. Pending partial periods are discarded.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_max_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), FixedTimestep::MAX_STEPS);
    }

    #[test]
    fn clock_ignores_negative_deltas() {
        let mut clock = SimClock::starting_at(10.0);
        clock.advance(-1.0);
        clock.advance(0.5);
        assert!((clock.elapsed() - 10.5).abs() < 1e-9);
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let mut timer = IntervalTimer::new(0.5);
        assert_eq!(timer.advance(0.3), 0);
        assert_eq!(timer.advance(0.3), 1);
        assert_eq!(timer.advance(1.0), 2);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = IntervalTimer::new(0.5);
        timer.advance(0.4);
        timer.cancel();
        assert_eq!(timer.advance(10.0), 0);
        assert!(timer.is_cancelled());
    }
}
