//! Idling actions: standing still and aimless wandering

use crate::brain::{Action, InitContext, TickContext};
use crate::core::error::{AiError, Result};
use glam::Vec2;
use rand::Rng;

/// Keep the body still
///
/// Issues a stop every tick rather than once: some earlier state may
/// have left a movement command behind, and recomputing the command is
/// cheaper than trusting it.
#[derive(Debug, Clone, Default)]
pub struct HoldPosition;

impl HoldPosition {
    pub fn new() -> Self {
        Self
    }
}

impl Action for HoldPosition {
    fn name(&self) -> &'static str {
        "hold_position"
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        if let Some(locomotion) = ctx.abilities.locomotion_mut() {
            locomotion.stop();
        }
        Ok(())
    }
}

/// Drift in a random heading, re-rolled at a randomized cadence
#[derive(Debug, Clone)]
pub struct Wander {
    heading: Vec2,
    until_reroll: f32,
}

impl Wander {
    pub fn new() -> Self {
        Self {
            heading: Vec2::ZERO,
            until_reroll: 0.0,
        }
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for Wander {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> Result<()> {
        if !ctx.abilities.has_locomotion() {
            return Err(AiError::MissingAbility {
                strategy: "wander",
                ability: "locomotion",
            });
        }
        Ok(())
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        self.until_reroll -= ctx.dt;
        if self.until_reroll <= 0.0 {
            let angle = ctx.rng.gen_range(0.0..std::f32::consts::TAU);
            self.heading = Vec2::from_angle(angle);
            let (lo, hi) = ctx.config.wander_interval;
            self.until_reroll = if hi > lo { ctx.rng.gen_range(lo..=hi) } else { lo };
        }
        let heading = self.heading;
        if let Some(locomotion) = ctx.abilities.locomotion_mut() {
            locomotion.move_towards(heading);
        }
        Ok(())
    }

    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {
        // Force a fresh heading on the first tick of the activation
        self.until_reroll = 0.0;
    }

    fn on_exit(&mut self, ctx: &mut TickContext<'_>) {
        if let Some(locomotion) = ctx.abilities.locomotion_mut() {
            locomotion.stop();
        }
    }
}
