//! Dwell-time guard
//!
//! "Waiting" in this engine is a decision staying false until
//! time-in-state crosses a threshold, re-checked every tick. The
//! randomized form re-rolls its threshold on every state entry so a
//! group of NPCs sharing a graph doesn't move in lockstep.

use crate::brain::{Decision, TickContext};
use crate::core::error::Result;
use rand::Rng;

/// True once the owning state has been current for the threshold duration
#[derive(Debug, Clone)]
pub struct ElapsedInState {
    min: f32,
    max: f32,
    threshold: f32,
}

impl ElapsedInState {
    /// Fixed wait
    pub fn new(seconds: f32) -> Self {
        Self {
            min: seconds,
            max: seconds,
            threshold: seconds,
        }
    }

    /// Wait re-rolled uniformly in `[min, max]` on every state entry
    pub fn randomized(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            threshold: min,
        }
    }
}

impl Decision for ElapsedInState {
    fn name(&self) -> &'static str {
        "elapsed_in_state"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool> {
        Ok(ctx.blackboard.time_in_state >= self.threshold)
    }

    fn on_enter(&mut self, ctx: &mut TickContext<'_>) {
        self.threshold = if self.max > self.min {
            ctx.rng.gen_range(self.min..=self.max)
        } else {
            self.min
        };
    }
}
