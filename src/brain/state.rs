//! FSM states: ordered transitions plus ordered actions

use crate::brain::action::Action;
use crate::brain::decision::Decision;

/// Index of a state inside its brain, resolved from names at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Where a transition branch leads
///
/// Every transition carries two branches - one taken when its decision
/// returns true, one when it returns false. `Remain` means "this branch
/// does not transition": evaluation moves on to the next transition in
/// the list. The first branch that names a state wins; if every evaluated
/// branch remains, the current state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Remain,
    To(StateId),
}

/// One transition: a guard decision and its two branches
pub(crate) struct TransitionSlot {
    pub decision: Box<dyn Decision>,
    pub on_true: Branch,
    pub on_false: Branch,
    /// Cleared when init fails; a disabled guard is never evaluated
    pub enabled: bool,
}

/// One action slot
pub(crate) struct ActionSlot {
    pub action: Box<dyn Action>,
    /// Cleared when init fails; a disabled action is never performed
    pub enabled: bool,
}

/// A named FSM node holding ordered transitions and actions
///
/// Authored once via the builder; owned and driven by a Brain.
pub struct State {
    pub(crate) name: String,
    pub(crate) transitions: Vec<TransitionSlot>,
    pub(crate) actions: Vec<ActionSlot>,
}

impl State {
    pub(crate) fn new(
        name: String,
        transitions: Vec<TransitionSlot>,
        actions: Vec<ActionSlot>,
    ) -> Self {
        Self {
            name,
            transitions,
            actions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("transitions", &self.transitions.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}
