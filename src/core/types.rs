//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for world entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form - the first uuid group is enough to tell NPCs apart in logs
        let s = self.0.to_string();
        write!(f, "{}", &s[..8])
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Faction alignment for perception and weapon fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Wardens,
    Raiders,
    Neutral,
}

impl Faction {
    /// Whether entities of this faction treat `other` as a valid target
    pub fn hostile_to(&self, other: Faction) -> bool {
        match (self, other) {
            (Faction::Neutral, _) | (_, Faction::Neutral) => false,
            (a, b) => *a != b,
        }
    }
}
