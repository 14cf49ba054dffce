//! Own-health threshold guard

use crate::brain::{Decision, TickContext};
use crate::core::error::Result;

/// True while the character's health fraction is at or below the threshold
#[derive(Debug, Clone)]
pub struct LowHealth {
    fraction: f32,
}

impl LowHealth {
    pub fn new(fraction: f32) -> Self {
        Self { fraction }
    }
}

impl Decision for LowHealth {
    fn name(&self) -> &'static str {
        "low_health"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool> {
        Ok(ctx.body.health_fraction() <= self.fraction)
    }
}
