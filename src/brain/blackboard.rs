//! Shared mutable state coordinating a brain's strategies
//!
//! The blackboard is the one piece of state decisions and actions
//! communicate through: the current target slot, where that target was
//! last seen, and how long the brain has sat in its current state.
//! Single writer per tick, no locking - the engine is single-threaded
//! and every strategy call receives the blackboard through an explicit
//! context borrow.

use crate::core::types::EntityId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Per-brain shared slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Blackboard {
    /// Current pursuit/attack target, if any
    ///
    /// The engine never nulls this on its own; clearing policy belongs
    /// to decisions (a failed scan with clear-on-miss, a target-down
    /// check, a reset).
    pub target: Option<EntityId>,
    /// Where the target was last perceived
    ///
    /// Survives losing the target so movement actions can head for the
    /// last known position.
    pub last_known_target_pos: Option<Vec2>,
    /// Seconds since the last state change
    pub time_in_state: f32,
}

impl Blackboard {
    /// Acquire a target and record where it was seen
    pub fn set_target(&mut self, id: EntityId, position: Vec2) {
        self.target = Some(id);
        self.last_known_target_pos = Some(position);
    }

    /// Drop the target reference, keeping the last known position
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Full reset: target, memory, and state timer
    pub fn clear(&mut self) {
        self.target = None;
        self.last_known_target_pos = None;
        self.time_in_state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_target_keeps_last_known_position() {
        let mut blackboard = Blackboard::default();
        blackboard.set_target(EntityId::new(), Vec2::new(3.0, 4.0));

        blackboard.clear_target();
        assert!(blackboard.target.is_none());
        assert_eq!(blackboard.last_known_target_pos, Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut blackboard = Blackboard::default();
        blackboard.set_target(EntityId::new(), Vec2::ONE);
        blackboard.time_in_state = 7.5;

        blackboard.clear();
        assert!(blackboard.target.is_none());
        assert!(blackboard.last_known_target_pos.is_none());
        assert_eq!(blackboard.time_in_state, 0.0);
    }
}
