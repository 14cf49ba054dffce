//! The Action contract: per-tick effects
//!
//! An action runs every tick its owning state is current. Entry/exit
//! hooks bracket one continuous activation: start or stop a sustained
//! effect, reset ran-once flags, release a held command. The engine does
//! NOT auto-clear continuous commands (movement, aim, trigger) on state
//! exit - an action that issued one must explicitly zero it in its own
//! `on_exit`, otherwise the command persists with its last value.

use crate::brain::context::{InitContext, TickContext};
use crate::core::error::Result;

/// Per-tick effect strategy
///
/// `perform` must be safe to call every tick: recompute the desired
/// command instead of assuming anything persisted from the previous call.
pub trait Action {
    /// Stable name for logs and debugging
    fn name(&self) -> &'static str;

    /// One-time setup when the brain initializes or resets
    ///
    /// Return an error if a required ability is missing; the engine logs
    /// it and permanently disables this action rather than halting the
    /// brain.
    fn init(&mut self, _ctx: &mut InitContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Execute one tick of the effect
    ///
    /// Errors are isolated by the engine: logged, then execution
    /// continues with the next action in the list.
    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()>;

    /// The owning state became current: reset activation-scoped flags,
    /// start sustained effects
    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {}

    /// The owning state stopped being current: release held commands,
    /// stop sustained effects
    fn on_exit(&mut self, _ctx: &mut TickContext<'_>) {}
}
