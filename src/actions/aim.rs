//! Aiming at the current target

use crate::brain::{Action, InitContext, TickContext};
use crate::core::error::{AiError, Result};

/// Keep the aim point on the target every tick
///
/// Tracks the live position while the target exists, the last known one
/// after it is lost. The aim point is a held command: this action clears
/// it in its own exit hook, the engine won't.
#[derive(Debug, Clone, Default)]
pub struct AimAtTarget;

impl AimAtTarget {
    pub fn new() -> Self {
        Self
    }
}

impl Action for AimAtTarget {
    fn name(&self) -> &'static str {
        "aim_at_target"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> Result<()> {
        if !ctx.abilities.has_aim() {
            return Err(AiError::MissingAbility {
                strategy: "aim_at_target",
                ability: "aim",
            });
        }
        Ok(())
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        let point = ctx.tracked_target_position();
        let Some(aim) = ctx.abilities.aim_mut() else {
            return Ok(());
        };
        match point {
            Some(point) => aim.aim_at(point),
            None => aim.clear(),
        }
        Ok(())
    }

    fn on_exit(&mut self, ctx: &mut TickContext<'_>) {
        if let Some(aim) = ctx.abilities.aim_mut() {
            aim.clear();
        }
    }
}
