//! Guards over the blackboard target slot
//!
//! The engine never nulls the target on its own; these decisions own the
//! clearing policy.

use crate::brain::{Decision, TickContext};
use crate::core::error::Result;

/// True when no target is held
///
/// Typically wired with a false branch: "while there is no target stay
/// put, otherwise go fight".
#[derive(Debug, Clone, Default)]
pub struct TargetIsNull;

impl TargetIsNull {
    pub fn new() -> Self {
        Self
    }
}

impl Decision for TargetIsNull {
    fn name(&self) -> &'static str {
        "target_is_null"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool> {
        Ok(ctx.blackboard.target.is_none())
    }
}

/// True when the held target is dead or gone from the world
///
/// With `clear_on_true` the stale reference is nulled as a side effect,
/// so downstream states start clean. No target held means false - there
/// is nothing to be down.
#[derive(Debug, Clone)]
pub struct TargetDown {
    clear_on_true: bool,
}

impl TargetDown {
    pub fn new() -> Self {
        Self {
            clear_on_true: false,
        }
    }

    pub fn clearing(mut self) -> Self {
        self.clear_on_true = true;
        self
    }
}

impl Default for TargetDown {
    fn default() -> Self {
        Self::new()
    }
}

impl Decision for TargetDown {
    fn name(&self) -> &'static str {
        "target_down"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool> {
        let Some(id) = ctx.blackboard.target else {
            return Ok(false);
        };
        let down = !ctx.world.is_alive(id);
        if down && self.clear_on_true {
            ctx.blackboard.clear_target();
        }
        Ok(down)
    }
}
