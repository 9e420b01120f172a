//! Fixed-step clock
//!
//! Turns variable wall-clock frame deltas into a deterministic number of
//! discrete ticks. The same total elapsed time always yields the same number
//! of ticks, up to the sub-interval remainder carried between calls.

use log::warn;

use crate::error::EngineError;

/// Default upper bound on a single frame delta, in seconds
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 1.0;

/// Fixed-step accumulator with a play/pause gate
///
/// While paused the accumulator still drains one interval at a time, but the
/// ticks are dropped rather than queued for later.
#[derive(Clone, Debug)]
pub struct FixedStepClock {
    tick_interval: f64,
    budget: f64,
    max_frame_delta: f64,
    running: bool,
    step_count: u64,
    dropped_count: u64,
}

impl FixedStepClock {
    /// Create a running clock at `ticks_per_second`
    pub fn new(ticks_per_second: f32) -> Result<Self, EngineError> {
        let mut clock = Self {
            tick_interval: 1.0,
            budget: 0.0,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA as f64,
            running: true,
            step_count: 0,
            dropped_count: 0,
        };
        clock.set_rate(ticks_per_second)?;
        Ok(clock)
    }

    /// Change the tick rate without touching the accumulated budget
    pub fn set_rate(&mut self, ticks_per_second: f32) -> Result<(), EngineError> {
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(EngineError::InvalidSpeed(ticks_per_second));
        }
        self.tick_interval = 1.0 / ticks_per_second as f64;
        Ok(())
    }

    /// Change the clamp applied to each frame delta
    pub fn set_max_frame_delta(&mut self, seconds: f32) -> Result<(), EngineError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(EngineError::InvalidFrameDelta(seconds));
        }
        self.max_frame_delta = seconds as f64;
        Ok(())
    }

    /// Add a frame delta and return how many ticks should run now
    ///
    /// Negative or non-finite deltas count as zero; deltas longer than the
    /// clamp are cut down so a stall cannot trigger a burst of catch-up ticks.
    pub fn advance(&mut self, delta_seconds: f32) -> u32 {
        let mut dt = delta_seconds as f64;
        if !dt.is_finite() || dt < 0.0 {
            dt = 0.0;
        }
        if dt > self.max_frame_delta {
            warn!(
                "Frame delta {:.3}s clamped to {:.3}s",
                dt, self.max_frame_delta
            );
            dt = self.max_frame_delta;
        }

        self.budget += dt;

        let mut ticks = 0;
        while self.budget >= self.tick_interval {
            self.budget -= self.tick_interval;
            if self.running {
                ticks += 1;
            } else {
                self.dropped_count += 1;
            }
        }
        self.step_count += ticks as u64;
        ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Seconds per tick
    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    pub fn ticks_per_second(&self) -> f64 {
        1.0 / self.tick_interval
    }

    /// Unspent time carried into the next call
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Ticks handed out since creation
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Ticks discarded while paused
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count
    }
}
