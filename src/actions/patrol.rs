//! Waypoint patrol

use crate::brain::{Action, InitContext, TickContext};
use crate::core::error::{AiError, Result};
use glam::Vec2;

/// Walk a closed loop of waypoints
///
/// On entry the patrol resumes from the nearest waypoint rather than
/// waypoint zero, so an interrupted round doesn't snap back across the
/// map.
#[derive(Debug, Clone)]
pub struct Patrol {
    waypoints: Vec<Vec2>,
    current: usize,
}

impl Patrol {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            current: 0,
        }
    }
}

impl Action for Patrol {
    fn name(&self) -> &'static str {
        "patrol"
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> Result<()> {
        if !ctx.abilities.has_locomotion() {
            return Err(AiError::MissingAbility {
                strategy: "patrol",
                ability: "locomotion",
            });
        }
        if self.waypoints.is_empty() {
            return Err(AiError::InvalidConfig("patrol needs at least one waypoint".into()));
        }
        self.current = 0;
        Ok(())
    }

    fn perform(&mut self, ctx: &mut TickContext<'_>) -> Result<()> {
        let position = ctx.body.position;
        let waypoint = self.waypoints[self.current];
        if position.distance(waypoint) <= ctx.config.patrol_arrive_radius {
            self.current = (self.current + 1) % self.waypoints.len();
        }
        let waypoint = self.waypoints[self.current];
        if let Some(locomotion) = ctx.abilities.locomotion_mut() {
            locomotion.move_towards(waypoint - position);
        }
        Ok(())
    }

    fn on_enter(&mut self, ctx: &mut TickContext<'_>) {
        // Resume from the closest leg of the round
        let position = ctx.body.position;
        if let Some((index, _)) = self
            .waypoints
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                position
                    .distance_squared(**a)
                    .total_cmp(&position.distance_squared(**b))
            })
        {
            self.current = index;
        }
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
    use crate::testutil::Fixture;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_advances_on_arrival_and_wraps() {
        let mut fixture = Fixture::new();
        let mut patrol = Patrol::new(square());

        // Standing on waypoint 0: advance to 1 and head there
        patrol.perform(&mut fixture.ctx(0.1)).unwrap();
        assert_eq!(patrol.current, 1);
        let velocity = fixture.abilities.locomotion.as_ref().unwrap().desired_velocity;
        assert!(velocity.x > 0.0);

        // Walk the whole round
        for waypoint in [2usize, 3, 0] {
            fixture.body.position = patrol.waypoints[patrol.current];
            patrol.perform(&mut fixture.ctx(0.1)).unwrap();
            assert_eq!(patrol.current, waypoint);
        }
    }

    #[test]
    fn test_enter_resumes_from_nearest_waypoint() {
        let mut fixture = Fixture::new();
        fixture.body.position = Vec2::new(9.0, 9.0);
        let mut patrol = Patrol::new(square());

        patrol.on_enter(&mut fixture.ctx(0.1));
        assert_eq!(patrol.current, 2);
    }

    #[test]
    fn test_empty_waypoints_rejected_at_init() {
        let fixture = Fixture::new();
        let err = Patrol::new(vec![]).init(&mut fixture.init_ctx()).unwrap_err();
        assert!(matches!(err, AiError::InvalidConfig(_)));
    }

    #[test]
    fn test_exit_stops_movement() {
        let mut fixture = Fixture::new();
        let mut patrol = Patrol::new(square());
        patrol.perform(&mut fixture.ctx(0.1)).unwrap();
        patrol.on_exit(&mut fixture.ctx(0.1));

        let velocity = fixture.abilities.locomotion.as_ref().unwrap().desired_velocity;
        assert_eq!(velocity, Vec2::ZERO);
    }
}
