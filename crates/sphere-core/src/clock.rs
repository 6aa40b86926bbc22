use crate::constants::{TIME_STEP_PER_TICK, WALL_CLOCK_TIME_SCALE};
use instant::Instant;
use std::time::Duration;

/// How the noise time term advances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockMode {
    /// Fixed increment per animation tick.
    FixedStep { step: f64 },
    /// Elapsed host seconds times `scale`.
    WallClock { scale: f64 },
}

impl Default for ClockMode {
    fn default() -> Self {
        ClockMode::FixedStep {
            step: TIME_STEP_PER_TICK,
        }
    }
}

impl ClockMode {
    pub fn wall_clock() -> Self {
        ClockMode::WallClock {
            scale: WALL_CLOCK_TIME_SCALE,
        }
    }
}

/// Monotonic noise time fed to the surface updater.
#[derive(Clone, Copy, Debug)]
pub struct NoiseClock {
    mode: ClockMode,
    t: f64,
}

impl NoiseClock {
    pub fn new(mode: ClockMode) -> Self {
        Self { mode, t: 0.0 }
    }

    /// Advance for one tick observed at host time `now`; never goes backwards.
    pub fn advance(&mut self, now: Duration) -> f64 {
        let next = match self.mode {
            ClockMode::FixedStep { step } => self.t + step.abs(),
            ClockMode::WallClock { scale } => now.as_secs_f64() * scale.abs(),
        };
        if next.is_finite() && next > self.t {
            self.t = next;
        }
        self.t
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }
}

/// Wall-clock origin for hosts; hands out elapsed time for `tick`.
#[derive(Clone, Copy, Debug)]
pub struct HostClock {
    origin: Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}
