//! Continuous weapon fire

use crate::brain::{Action, InitContext, TickContext};
use crate::core::error::{AiError, Result};

/// Hold the trigger while a live target is inside weapon range
///
/// One activation brackets one burst of sustained fire: the trigger
/// state is recomputed every tick (target gone or out of range releases
/// it) and released unconditionally in the exit hook. Leaving the state
/// without that release would keep the weapon firing forever - held
/// commands are the action's responsibility, not the engine's.
#[derive(Debug, Clone, Default)]
pub struct FireAtTarget;

impl FireAtTarget {
    pub fn new() -> Self {
        Self
    }
}

impl Action for FireAtTarget {
    fn name(&self) -> &'static str {
        "fire_at_target"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> Result<()> {
        if !ctx.abilities.has_weapon() {
            return Err(AiError::MissingAbility {
                strategy: "fire_at_target",
                ability: "weapon",
            });
        }
        Ok(())
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        let target = ctx.target_position();
        let position = ctx.body.position;
        let Some(weapon) = ctx.abilities.weapon_mut() else {
            return Ok(());
        };
        match target {
            Some(target) if position.distance(target) <= weapon.range => {
                weapon.hold_trigger();
            }
            _ => weapon.release_trigger(),
        }
        Ok(())
    }

    fn on_exit(&mut self, ctx: &mut TickContext<'_>) {
        if let Some(weapon) = ctx.abilities.weapon_mut() {
            weapon.release_trigger();
        }
    }
}
