//! Shared fixtures for strategy unit tests

use crate::agent::{Abilities, AimControl, Body, Locomotion, WeaponMount};
use crate::brain::{Blackboard, InitContext, TickContext};
use crate::core::config::AiConfig;
use crate::core::types::Faction;
use crate::world::World;
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A fully-equipped character plus empty world, seeded rng, and default
/// config - everything a strategy call needs
pub(crate) struct Fixture {
    pub body: Body,
    pub abilities: Abilities,
    pub world: World,
    pub blackboard: Blackboard,
    pub rng: ChaCha8Rng,
    pub config: AiConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            body: Body::new(Faction::Wardens, Vec2::ZERO, 100.0),
            abilities: Abilities {
                locomotion: Some(Locomotion::new(5.0)),
                weapon: Some(WeaponMount::new(8, 0.2, 30.0, 10.0)),
                aim: Some(AimControl::default()),
            },
            world: World::new(),
            blackboard: Blackboard::default(),
            rng: ChaCha8Rng::seed_from_u64(42),
            config: AiConfig::default(),
        }
    }

    /// Borrow a strategy-call context over this fixture
    pub fn ctx(&mut self, dt: f32) -> TickContext<'_> {
        TickContext {
            body: &mut self.body,
            abilities: &mut self.abilities,
            world: &self.world,
            blackboard: &mut self.blackboard,
            rng: &mut self.rng,
            config: &self.config,
            dt,
        }
    }

    pub fn init_ctx(&self) -> InitContext<'_> {
        InitContext {
            body: &self.body,
            abilities: &self.abilities,
            config: &self.config,
        }
    }
}
