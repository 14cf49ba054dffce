//! Explicit context objects passed to every strategy call
//!
//! Strategies never hold references to the character or the world between
//! ticks; everything they may read or command is borrowed in for the
//! duration of one call. This makes the within-tick write-then-read
//! ordering on the blackboard explicit: a decision that acquires a target
//! during transition evaluation hands it to the actions that run later in
//! the same tick.

use crate::agent::{Abilities, Body};
use crate::brain::blackboard::Blackboard;
use crate::core::config::AiConfig;
use crate::world::{World, WorldEntity};
use glam::Vec2;
use rand::RngCore;

/// Everything the host lends a brain for one call
///
/// The host builds one of these per NPC per tick and hands it to
/// `Brain::tick`. The blackboard is *not* here - the brain owns it.
pub struct Host<'a> {
    pub body: &'a mut Body,
    pub abilities: &'a mut Abilities,
    pub world: &'a World,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a AiConfig,
}

/// Context for one-time strategy initialization
///
/// Read-only view: init checks that required abilities exist and sizes
/// internal buffers; it must not command anything.
pub struct InitContext<'a> {
    pub body: &'a Body,
    pub abilities: &'a Abilities,
    pub config: &'a AiConfig,
}

impl<'a> InitContext<'a> {
    pub fn from_host(host: &'a Host<'_>) -> Self {
        Self {
            body: host.body,
            abilities: host.abilities,
            config: host.config,
        }
    }
}

/// Context for decide/perform/enter/exit calls
pub struct TickContext<'a> {
    pub body: &'a mut Body,
    pub abilities: &'a mut Abilities,
    pub world: &'a World,
    pub blackboard: &'a mut Blackboard,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a AiConfig,
    /// Seconds of simulated time this tick covers
    pub dt: f32,
}

impl<'a> TickContext<'a> {
    /// The blackboard target as a live world entity, if it still exists
    pub fn target_entity(&self) -> Option<&WorldEntity> {
        self.blackboard
            .target
            .and_then(|id| self.world.entity(id))
    }

    /// Live position of the target, or None if it is gone from the world
    pub fn target_position(&self) -> Option<Vec2> {
        self.target_entity().map(|e| e.position)
    }

    /// Live position if available, otherwise the last known one
    ///
    /// Refreshes the blackboard memory as a side effect when the target
    /// is live, so "last known" is always the most recent sighting.
    pub fn tracked_target_position(&mut self) -> Option<Vec2> {
        if let Some(position) = self.target_position() {
            self.blackboard.last_known_target_pos = Some(position);
            return Some(position);
        }
        self.blackboard.last_known_target_pos
    }
}
