//! Target-relative movement actions

use crate::brain::{Action, InitContext, TickContext};
use crate::core::error::{AiError, Result};

/// Move toward the target, holding off at a stop distance
///
/// Follows the live target position while it exists and falls back to
/// the last known position after losing sight, so a chase naturally ends
/// at the spot the target was last seen.
#[derive(Debug, Clone)]
pub struct ChaseTarget {
    stop_distance: f32,
}

impl ChaseTarget {
    pub fn new(stop_distance: f32) -> Self {
        Self { stop_distance }
    }
}

impl Action for ChaseTarget {
    fn name(&self) -> &'static str {
        "chase_target"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> Result<()> {
        if !ctx.abilities.has_locomotion() {
            return Err(AiError::MissingAbility {
                strategy: "chase_target",
                ability: "locomotion",
            });
        }
        Ok(())
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        let destination = ctx.tracked_target_position();
        let position = ctx.body.position;
        let Some(locomotion) = ctx.abilities.locomotion_mut() else {
            return Ok(());
        };
        match destination {
            Some(destination) if position.distance(destination) > self.stop_distance => {
                locomotion.move_towards(destination - position);
            }
            _ => locomotion.stop(),
        }
        Ok(())
    }

    fn on_exit(&mut self, ctx: &mut TickContext<'_>) {
        // Commands persist unless zeroed here
        if let Some(locomotion) = ctx.abilities.locomotion_mut() {
            locomotion.stop();
        }
    }
}

/// Move directly away from the target (or its last known position)
#[derive(Debug, Clone, Default)]
pub struct FleeFromTarget;

impl FleeFromTarget {
    pub fn new() -> Self {
        Self
    }
}

impl Action for FleeFromTarget {
    fn name(&self) -> &'static str {
        "flee_from_target"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> Result<()> {
        if !ctx.abilities.has_locomotion() {
            return Err(AiError::MissingAbility {
                strategy: "flee_from_target",
                ability: "locomotion",
            });
        }
        Ok(())
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        let threat = ctx.tracked_target_position();
        let position = ctx.body.position;
        let Some(locomotion) = ctx.abilities.locomotion_mut() else {
            return Ok(());
        };
        match threat {
            Some(threat) => locomotion.move_towards(position - threat),
            None => locomotion.stop(),
        }
        Ok(())
    }

    fn on_exit(&mut self, ctx: &mut TickContext<'_>) {
        if let Some(locomotion) = ctx.abilities.locomotion_mut() {
            locomotion.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Abilities;
    use crate::core::types::{EntityId, Faction};
    use crate::testutil::Fixture;
    use crate::world::WorldEntity;
    use glam::Vec2;

    fn fixture_with_target_at(position: Vec2) -> Fixture {
        let mut fixture = Fixture::new();
        let target = WorldEntity {
            id: EntityId::new(),
            position,
            faction: Faction::Raiders,
            alive: true,
        };
        fixture.world.upsert_entity(target);
        fixture.blackboard.set_target(target.id, position);
        fixture
    }

    #[test]
    fn test_chase_moves_toward_target() {
        let mut fixture = fixture_with_target_at(Vec2::new(20.0, 0.0));
        let mut action = ChaseTarget::new(2.0);
        action.perform(&mut fixture.ctx(0.1)).unwrap();

        let velocity = fixture.abilities.locomotion.as_ref().unwrap().desired_velocity;
        assert!(velocity.x > 0.0);
        assert!(velocity.y.abs() < 1e-5);
    }

    #[test]
    fn test_chase_holds_at_stop_distance() {
        let mut fixture = fixture_with_target_at(Vec2::new(1.5, 0.0));
        let mut action = ChaseTarget::new(2.0);
        action.perform(&mut fixture.ctx(0.1)).unwrap();

        let velocity = fixture.abilities.locomotion.as_ref().unwrap().desired_velocity;
        assert_eq!(velocity, Vec2::ZERO);
    }

    #[test]
    fn test_chase_falls_back_to_last_known_position() {
        let mut fixture = fixture_with_target_at(Vec2::new(20.0, 0.0));
        let id = fixture.blackboard.target.unwrap();
        fixture.world.remove_entity(id);

        let mut action = ChaseTarget::new(2.0);
        action.perform(&mut fixture.ctx(0.1)).unwrap();

        let velocity = fixture.abilities.locomotion.as_ref().unwrap().desired_velocity;
        assert!(velocity.x > 0.0, "still heads for the last sighting");
    }

    #[test]
    fn test_exit_zeroes_movement_command() {
        let mut fixture = fixture_with_target_at(Vec2::new(20.0, 0.0));
        let mut action = ChaseTarget::new(2.0);
        action.perform(&mut fixture.ctx(0.1)).unwrap();
        action.on_exit(&mut fixture.ctx(0.1));

        let velocity = fixture.abilities.locomotion.as_ref().unwrap().desired_velocity;
        assert_eq!(velocity, Vec2::ZERO);
    }

    #[test]
    fn test_flee_moves_away() {
        let mut fixture = fixture_with_target_at(Vec2::new(10.0, 0.0));
        let mut action = FleeFromTarget::new();
        action.perform(&mut fixture.ctx(0.1)).unwrap();

        let velocity = fixture.abilities.locomotion.as_ref().unwrap().desired_velocity;
        assert!(velocity.x < 0.0);
    }

    #[test]
    fn test_init_fails_without_locomotion() {
        let mut fixture = Fixture::new();
        fixture.abilities = Abilities::default();
        let err = ChaseTarget::new(2.0).init(&mut fixture.init_ctx()).unwrap_err();
        assert!(matches!(err, AiError::MissingAbility { .. }));
    }
}
