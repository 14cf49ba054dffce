//! Magazine reload

use crate::brain::{Action, InitContext, TickContext};
use crate::core::error::{AiError, Result};

/// Request one reload per activation when the magazine runs dry
///
/// The ran-once flag resets on every state entry, so re-entering the
/// state after a fight allows another reload, but a single activation
/// never spams requests while the reload is in progress.
#[derive(Debug, Clone, Default)]
pub struct ReloadIfEmpty {
    requested_this_activation: bool,
}

impl ReloadIfEmpty {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Action for ReloadIfEmpty {
    fn name(&self) -> &'static str {
        "reload_if_empty"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> Result<()> {
        if !ctx.abilities.has_weapon() {
            return Err(AiError::MissingAbility {
                strategy: "reload_if_empty",
                ability: "weapon",
            });
        }
        Ok(())
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        if self.requested_this_activation {
            return Ok(());
        }
        if let Some(weapon) = ctx.abilities.weapon_mut() {
            if weapon.rounds_loaded == 0 {
                weapon.request_reload();
                self.requested_this_activation = true;
            }
        }
        Ok(())
    }

    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {
        self.requested_this_activation = false;
    }
}
