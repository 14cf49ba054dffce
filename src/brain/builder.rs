//! Declarative authoring surface for brain graphs
//!
//! States, transitions, and actions are assembled by name before runtime;
//! the builder resolves names to `StateId` indices and validates the
//! graph shape. The engine consumes the already-resolved graph - the only
//! runtime graph mutation supported is whole-brain hot-swap.

use crate::brain::action::Action;
use crate::brain::decision::Decision;
use crate::brain::state::{ActionSlot, Branch, State, StateId, TransitionSlot};
use crate::brain::Brain;
use crate::core::error::{AiError, Result};
use ahash::AHashMap;

/// A transition under construction: guard plus branch targets by name
///
/// An unset branch means `Remain` - that outcome does not transition.
pub struct TransitionDef {
    decision: Box<dyn Decision>,
    on_true: Option<String>,
    on_false: Option<String>,
}

impl TransitionDef {
    /// Start a transition guarded by `decision`
    pub fn on(decision: impl Decision + 'static) -> Self {
        Self {
            decision: Box::new(decision),
            on_true: None,
            on_false: None,
        }
    }

    /// State entered when the guard returns true
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.on_true = Some(state.into());
        self
    }

    /// State entered when the guard returns false
    pub fn otherwise(mut self, state: impl Into<String>) -> Self {
        self.on_false = Some(state.into());
        self
    }
}

/// A state under construction
pub struct StateDef {
    name: String,
    transitions: Vec<TransitionDef>,
    actions: Vec<Box<dyn Action>>,
}

impl StateDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Append a transition (evaluation order = declaration order)
    pub fn transition(mut self, def: TransitionDef) -> Self {
        self.transitions.push(def);
        self
    }

    /// Shorthand for the common true-branch-only transition
    pub fn when(self, decision: impl Decision + 'static, target: &str) -> Self {
        self.transition(TransitionDef::on(decision).to(target))
    }

    /// Append an action (execution order = declaration order)
    pub fn action(mut self, action: impl Action + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }
}

/// Builder for a complete brain graph
pub struct BrainBuilder {
    name: String,
    states: Vec<StateDef>,
    initial: Option<String>,
}

impl BrainBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            initial: None,
        }
    }

    pub fn state(mut self, def: StateDef) -> Self {
        self.states.push(def);
        self
    }

    /// Declare the initial state; defaults to the first declared state
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Resolve names and produce an inactive, uninitialized brain
    ///
    /// The returned brain still needs `init` (and `activate`) from the
    /// host before it ticks.
    pub fn build(self) -> Result<Brain> {
        if self.states.is_empty() {
            return Err(AiError::EmptyBrain);
        }

        let mut indices: AHashMap<String, StateId> = AHashMap::new();
        for (i, def) in self.states.iter().enumerate() {
            if indices.insert(def.name.clone(), StateId(i)).is_some() {
                return Err(AiError::DuplicateState(def.name.clone()));
            }
        }

        let resolve = |name: &Option<String>| -> Result<Branch> {
            match name {
                None => Ok(Branch::Remain),
                Some(n) => indices
                    .get(n.as_str())
                    .map(|id| Branch::To(*id))
                    .ok_or_else(|| AiError::UnknownState(n.clone())),
            }
        };

        let initial = match &self.initial {
            None => StateId(0),
            Some(n) => *indices
                .get(n.as_str())
                .ok_or_else(|| AiError::UnknownState(n.clone()))?,
        };

        let mut states = Vec::with_capacity(self.states.len());
        for def in self.states {
            let mut transitions = Vec::with_capacity(def.transitions.len());
            for t in def.transitions {
                transitions.push(TransitionSlot {
                    decision: t.decision,
                    on_true: resolve(&t.on_true)?,
                    on_false: resolve(&t.on_false)?,
                    enabled: true,
                });
            }
            let actions = def
                .actions
                .into_iter()
                .map(|action| ActionSlot {
                    action,
                    enabled: true,
                })
                .collect();
            states.push(State::new(def.name, transitions, actions));
        }

        Ok(Brain::from_parts(self.name, states, initial))
    }
}
