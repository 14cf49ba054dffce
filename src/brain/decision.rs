//! The Decision contract: transition guards
//!
//! A decision is a boolean predicate evaluated while its owning state is
//! current. Decisions are deliberately dual-purpose sensors: many both
//! *test* and *mutate* the blackboard (a detection scan assigns the
//! closest qualifying candidate as the target as a side effect of
//! returning true). Callers relying only on the boolean still get the
//! mutation - that coupling is part of the contract, and several actions
//! depend on the write having happened earlier in the same tick.

use crate::brain::context::{InitContext, TickContext};
use crate::core::error::Result;

/// Transition guard strategy
///
/// Implementations may keep per-instance counters and timers; the engine
/// resets them through the lifecycle hooks, not through reconstruction.
pub trait Decision {
    /// Stable name for logs and debugging
    fn name(&self) -> &'static str;

    /// One-time setup when the brain initializes or resets
    ///
    /// Return an error if a required ability is missing; the engine logs
    /// it and permanently disables this guard rather than halting the
    /// brain.
    fn init(&mut self, _ctx: &mut InitContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Evaluate the guard for this tick
    ///
    /// Errors are isolated by the engine: logged, treated as `false`,
    /// and evaluation continues with the next transition.
    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool>;

    /// The owning state became current
    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {}

    /// The owning state stopped being current
    fn on_exit(&mut self, _ctx: &mut TickContext<'_>) {}
}
