//! Physical state of an AI-controlled character
//!
//! The body is what the world sees: position, facing, health. Brains read
//! it, abilities move it, the host simulation integrates it.

use crate::core::types::{EntityId, Faction};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Coarse liveness sub-state, derived from health and stun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vitality {
    Alive,
    Stunned,
    Down,
}

/// Physical state component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub faction: Faction,
    pub position: Vec2,
    /// Unit vector the character is looking along
    pub facing: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Where this character respawns
    pub spawn_point: Vec2,
    /// Seconds of stun left; 0.0 when not stunned
    pub stun_remaining: f32,
}

impl Body {
    pub fn new(faction: Faction, position: Vec2, max_health: f32) -> Self {
        Self {
            id: EntityId::new(),
            faction,
            position,
            facing: Vec2::X,
            health: max_health,
            max_health,
            spawn_point: position,
            stun_remaining: 0.0,
        }
    }

    pub fn vitality(&self) -> Vitality {
        if self.health <= 0.0 {
            Vitality::Down
        } else if self.stun_remaining > 0.0 {
            Vitality::Stunned
        } else {
            Vitality::Alive
        }
    }

    pub fn is_down(&self) -> bool {
        self.vitality() == Vitality::Down
    }

    /// Current health as a fraction of max (0.0 to 1.0)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Apply damage (clamped at 0)
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Restore the body to its spawn state
    pub fn respawn(&mut self) {
        self.position = self.spawn_point;
        self.health = self.max_health;
        self.stun_remaining = 0.0;
        self.facing = Vec2::X;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitality_transitions() {
        let mut body = Body::new(Faction::Wardens, Vec2::ZERO, 100.0);
        assert_eq!(body.vitality(), Vitality::Alive);

        body.stun_remaining = 0.5;
        assert_eq!(body.vitality(), Vitality::Stunned);

        body.apply_damage(150.0);
        // Down wins over stunned
        assert_eq!(body.vitality(), Vitality::Down);
        assert_eq!(body.health, 0.0);
    }

    #[test]
    fn test_health_fraction() {
        let mut body = Body::new(Faction::Wardens, Vec2::ZERO, 200.0);
        body.apply_damage(50.0);
        assert!((body.health_fraction() - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_respawn_restores_spawn_state() {
        let mut body = Body::new(Faction::Raiders, Vec2::new(3.0, 4.0), 100.0);
        body.position = Vec2::new(50.0, 60.0);
        body.apply_damage(100.0);

        body.respawn();
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert_eq!(body.health, 100.0);
        assert_eq!(body.vitality(), Vitality::Alive);
    }
}
