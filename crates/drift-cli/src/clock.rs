//! Fixed-timestep clock pacing `drift watch`

use std::time::{Duration, Instant};

/// Accumulates wall-clock time and releases it in fixed simulation steps
pub struct FrameClock {
    /// Seconds per simulation step
    pub step_interval: f64,
    /// Accumulated time not yet consumed by steps
    accumulator: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl FrameClock {
    /// Clamp on a single frame's elapsed time, so a stall does not trigger a
    /// long burst of catch-up steps
    const MAX_FRAME: f64 = 0.25;

    pub fn with_rate(hz: f64) -> Self {
        Self {
            step_interval: 1.0 / hz.max(1e-3),
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }

    /// Advance the clock. Call once per loop iteration.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            // Release one step immediately so the first frame is drawn
            self.accumulator = self.step_interval;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.accumulator += elapsed.min(Self::MAX_FRAME);
    }

    /// Returns true if there's enough accumulated time for a step
    pub fn should_step(&self) -> bool {
        self.accumulator >= self.step_interval
    }

    /// Consume one step from the accumulator
    pub fn consume_step(&mut self) {
        self.accumulator -= self.step_interval;
    }

    /// Time left until the next step is due
    pub fn until_next_step(&self) -> Duration {
        Duration::from_secs_f64((self.step_interval - self.accumulator).max(0.0))
    }
}
