//! Accumulator-based fixed-step scheduler
//!
//! Decouples simulation rate from presentation rate: wall-clock time is
//! banked and spent in whole ticks.

use crate::consts::{MAX_FRAME_SECS, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Wall-clock seconds per tick
    step_secs: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    /// `tick_rate_hz` is clamped to at least 1 tick per second
    pub fn new(tick_rate_hz: f32, max_substeps: u32) -> Self {
        Self {
            step_secs: 1.0 / tick_rate_hz.max(1.0),
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn step_secs(&self) -> f32 {
        self.step_secs
    }

    /// Bank `elapsed_secs` and return how many ticks to run now.
    ///
    /// Long frames are clamped and any backlog beyond `max_substeps` is
    /// dropped so a stall cannot snowball.
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        self.accumulator += elapsed_secs.clamp(0.0, MAX_FRAME_SECS);

        let mut steps = 0;
        while self.accumulator >= self.step_secs && steps < self.max_substeps {
            self.accumulator -= self.step_secs;
            steps += 1;
        }
        if steps == self.max_substeps && self.accumulator >= self.step_secs {
            log::trace!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator %= self.step_secs;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_TICK_RATE_HZ, MAX_SUBSTEPS)
    }
}
