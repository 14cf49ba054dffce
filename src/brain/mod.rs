//! The Brain: per-character FSM controller and tick driver
//!
//! A brain owns its states, the shared blackboard, and the current-state
//! pointer. Each tick it evaluates the current state's transitions in
//! declared order (first satisfied branch wins), applies exit/enter hooks
//! on a change, then runs every action of the (possibly new) current
//! state in order. Strategy failures are isolated per call: logged,
//! degraded, never allowed to break the exit/enter pairing or block the
//! rest of the tick.

pub mod action;
pub mod blackboard;
pub mod builder;
pub mod context;
pub mod decision;
pub mod state;

pub use action::Action;
pub use blackboard::Blackboard;
pub use builder::{BrainBuilder, StateDef, TransitionDef};
pub use context::{Host, InitContext, TickContext};
pub use decision::Decision;
pub use state::{Branch, State, StateId};

/// Per-character FSM controller
///
/// Lifecycle: `BrainBuilder::build` -> `init` -> `activate` -> `tick`
/// every frame -> `deactivate` on death/swap. `reset` returns the brain
/// to its initial state (respawn), `set_active(false)` suspends ticking
/// without hooks (possession).
pub struct Brain {
    name: String,
    states: Vec<State>,
    initial: StateId,
    current: StateId,
    blackboard: Blackboard,
    active: bool,
}

/// Borrow a strategy-call context out of a host loan plus the blackboard
fn strategy_ctx<'b>(
    host: &'b mut Host<'_>,
    blackboard: &'b mut Blackboard,
    dt: f32,
) -> TickContext<'b> {
    TickContext {
        body: &mut *host.body,
        abilities: &mut *host.abilities,
        world: host.world,
        blackboard,
        rng: &mut *host.rng,
        config: host.config,
        dt,
    }
}

impl Brain {
    pub(crate) fn from_parts(name: String, states: Vec<State>, initial: StateId) -> Self {
        Self {
            name,
            current: initial,
            initial,
            states,
            blackboard: Blackboard::default(),
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn current_state_name(&self) -> &str {
        self.states[self.current.0].name()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    /// Mutable blackboard access for external collaborators
    /// (forced target swaps, debug tooling)
    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Bare activity toggle without lifecycle hooks
    ///
    /// Used when a human takes manual control of the body: ticking stops
    /// dead, commands the strategies already issued stay as they are.
    /// Prefer `activate`/`deactivate` when hooks should run.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// One-time setup: point at the initial state, clear the blackboard,
    /// and run `init` once on every decision and action of every state
    ///
    /// A strategy whose init fails (typically a missing ability) is
    /// logged and permanently disabled; the brain itself never fails to
    /// initialize. A brain full of disabled strategies simply stands
    /// still.
    pub fn init(&mut self, ctx: &mut InitContext<'_>) {
        self.current = self.initial;
        self.blackboard.clear();

        let Brain { name, states, .. } = self;
        for state in states.iter_mut() {
            let State {
                name: state_name,
                transitions,
                actions,
            } = state;
            for slot in transitions.iter_mut() {
                slot.enabled = match slot.decision.init(ctx) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(
                            brain = %name,
                            state = %state_name,
                            decision = slot.decision.name(),
                            error = %e,
                            "decision disabled"
                        );
                        false
                    }
                };
            }
            for slot in actions.iter_mut() {
                slot.enabled = match slot.action.init(ctx) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(
                            brain = %name,
                            state = %state_name,
                            action = slot.action.name(),
                            error = %e,
                            "action disabled"
                        );
                        false
                    }
                };
            }
        }
    }

    /// Force the brain back to its initial state and re-run strategy
    /// initialization (respawn, controller swap)
    pub fn reset(&mut self, ctx: &mut InitContext<'_>) {
        tracing::debug!(brain = %self.name, "brain reset");
        self.init(ctx);
    }

    /// Whole-controller enter handshake: run enter hooks on the current
    /// state's strategies and start ticking
    pub fn activate(&mut self, host: &mut Host<'_>) {
        if self.active {
            return;
        }
        self.active = true;
        let Brain {
            states,
            current,
            blackboard,
            ..
        } = self;
        let state = &mut states[current.0];
        let mut ctx = strategy_ctx(host, blackboard, 0.0);
        for slot in state.transitions.iter_mut() {
            if slot.enabled {
                slot.decision.on_enter(&mut ctx);
            }
        }
        for slot in state.actions.iter_mut() {
            if slot.enabled {
                slot.action.on_enter(&mut ctx);
            }
        }
    }

    /// Whole-controller exit handshake: run exit hooks on the current
    /// state's strategies and stop ticking
    ///
    /// Mirrors the per-state hooks at controller granularity so held
    /// commands (trigger, movement) get released before a swap.
    pub fn deactivate(&mut self, host: &mut Host<'_>) {
        if !self.active {
            return;
        }
        let Brain {
            states,
            current,
            blackboard,
            ..
        } = self;
        let state = &mut states[current.0];
        let mut ctx = strategy_ctx(host, blackboard, 0.0);
        for slot in state.transitions.iter_mut() {
            if slot.enabled {
                slot.decision.on_exit(&mut ctx);
            }
        }
        for slot in state.actions.iter_mut() {
            if slot.enabled {
                slot.action.on_exit(&mut ctx);
            }
        }
        self.active = false;
    }

    /// One frame of AI: transitions, hooks, actions, clock
    ///
    /// Full no-op while inactive - current state and time_in_state stay
    /// exactly as they are.
    pub fn tick(&mut self, host: &mut Host<'_>, dt: f32) {
        if !self.active {
            return;
        }

        if let Some(next) = self.select_transition(host, dt) {
            if next != self.current {
                self.change_state(next, host, dt);
            }
        }
        self.run_actions(host, dt);
        self.blackboard.time_in_state += dt;
    }

    /// Evaluate the current state's transitions in declared order
    ///
    /// The first branch that names a state wins. A failing decision is
    /// logged and read as false, so its false branch still applies.
    fn select_transition(&mut self, host: &mut Host<'_>, dt: f32) -> Option<StateId> {
        let Brain {
            name,
            states,
            current,
            blackboard,
            ..
        } = self;
        let State {
            name: state_name,
            transitions,
            ..
        } = &mut states[current.0];
        let mut ctx = strategy_ctx(host, blackboard, dt);

        for slot in transitions.iter_mut() {
            if !slot.enabled {
                continue;
            }
            let verdict = match slot.decision.decide(&mut ctx) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(
                        brain = %name,
                        state = %state_name,
                        decision = slot.decision.name(),
                        error = %e,
                        "decision failed, reading as false"
                    );
                    false
                }
            };
            let branch = if verdict { slot.on_true } else { slot.on_false };
            if let Branch::To(id) = branch {
                return Some(id);
            }
        }
        None
    }

    /// Exit the outgoing state, switch, enter the incoming one
    ///
    /// Exit hooks of the outgoing state always complete before any enter
    /// hook of the incoming state runs; decisions are hooked before
    /// actions on both sides.
    fn change_state(&mut self, next: StateId, host: &mut Host<'_>, dt: f32) {
        let Brain {
            name,
            states,
            current,
            blackboard,
            ..
        } = self;
        tracing::debug!(
            brain = %name,
            from = states[current.0].name(),
            to = states[next.0].name(),
            "state transition"
        );

        {
            let state = &mut states[current.0];
            let mut ctx = strategy_ctx(host, blackboard, dt);
            for slot in state.transitions.iter_mut() {
                if slot.enabled {
                    slot.decision.on_exit(&mut ctx);
                }
            }
            for slot in state.actions.iter_mut() {
                if slot.enabled {
                    slot.action.on_exit(&mut ctx);
                }
            }
        }

        *current = next;
        blackboard.time_in_state = 0.0;

        {
            let state = &mut states[current.0];
            let mut ctx = strategy_ctx(host, blackboard, dt);
            for slot in state.transitions.iter_mut() {
                if slot.enabled {
                    slot.decision.on_enter(&mut ctx);
                }
            }
            for slot in state.actions.iter_mut() {
                if slot.enabled {
                    slot.action.on_enter(&mut ctx);
                }
            }
        }
    }

    /// Run every enabled action of the current state in declared order
    fn run_actions(&mut self, host: &mut Host<'_>, dt: f32) {
        let Brain {
            name,
            states,
            current,
            blackboard,
            ..
        } = self;
        let State {
            name: state_name,
            actions,
            ..
        } = &mut states[current.0];
        let mut ctx = strategy_ctx(host, blackboard, dt);

        for slot in actions.iter_mut() {
            if !slot.enabled {
                continue;
            }
            if let Err(e) = slot.action.perform(&mut ctx) {
                tracing::warn!(
                    brain = %name,
                    state = %state_name,
                    action = slot.action.name(),
                    error = %e,
                    "action failed"
                );
            }
        }
    }
}

impl std::fmt::Debug for Brain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Brain")
            .field("name", &self.name)
            .field("current", &self.current_state_name())
            .field("states", &self.states.len())
            .field("active", &self.active)
            .finish()
    }
}
