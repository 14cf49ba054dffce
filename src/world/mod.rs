//! Shared world state the brains perceive
//!
//! A deliberately small collaborator surface: an entity index (position,
//! faction, liveness) refreshed by the host each tick, static circle
//! obstacles, and the synchronous queries perception decisions consume -
//! radius overlap, view-cone filtering, and line-of-sight raycasts.

use crate::core::types::{EntityId, Faction};
use ahash::AHashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Snapshot of one entity as seen by perception
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldEntity {
    pub id: EntityId,
    pub position: Vec2,
    pub faction: Faction,
    pub alive: bool,
}

/// Static circular obstacle blocking sight and shots
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Vec2,
    pub radius: f32,
}

/// A perception query hit: an entity plus its distance from the query origin
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: WorldEntity,
    pub distance: f32,
}

/// The perceivable world
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: AHashMap<EntityId, WorldEntity>,
    obstacles: Vec<Obstacle>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_obstacle(&mut self, center: Vec2, radius: f32) {
        self.obstacles.push(Obstacle { center, radius });
    }

    /// Insert or refresh an entity snapshot (called by the host every tick)
    pub fn upsert_entity(&mut self, entity: WorldEntity) {
        self.entities.insert(entity.id, entity);
    }

    pub fn remove_entity(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }

    pub fn entity(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.get(&id)
    }

    /// Whether the id refers to a live entity
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.get(&id).map(|e| e.alive).unwrap_or(false)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// All entities within `radius` of `center`, excluding `exclude`,
    /// with their distances
    pub fn candidates_within(&self, center: Vec2, radius: f32, exclude: EntityId) -> Vec<Candidate> {
        self.entities
            .values()
            .filter(|e| e.id != exclude)
            .filter_map(|e| {
                let distance = e.position.distance(center);
                (distance <= radius).then_some(Candidate {
                    entity: *e,
                    distance,
                })
            })
            .collect()
    }

    /// Whether any obstacle blocks the segment from `from` to `to`
    pub fn line_blocked(&self, from: Vec2, to: Vec2) -> bool {
        self.obstacles
            .iter()
            .any(|o| segment_hits_circle(from, to, o.center, o.radius))
    }

    /// Whether `point` lies inside the view cone at `origin` looking along
    /// `facing` with the given half-angle (radians)
    pub fn in_view_cone(origin: Vec2, facing: Vec2, half_angle: f32, point: Vec2) -> bool {
        let to_point = point - origin;
        if to_point.length_squared() < 1e-6 {
            // Standing on top of the observer counts as seen
            return true;
        }
        let facing = facing.normalize_or_zero();
        if facing == Vec2::ZERO {
            return false;
        }
        let cos_angle = facing.dot(to_point.normalize());
        cos_angle >= half_angle.cos()
    }
}

/// Closest-point test of a segment against a circle
fn segment_hits_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq < 1e-9 {
        0.0
    } else {
        ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    };
    let closest = a + ab * t;
    center.distance_squared(closest) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_at(position: Vec2, faction: Faction) -> WorldEntity {
        WorldEntity {
            id: EntityId::new(),
            position,
            faction,
            alive: true,
        }
    }

    #[test]
    fn test_candidates_within_excludes_self_and_far() {
        let mut world = World::new();
        let me = entity_at(Vec2::ZERO, Faction::Wardens);
        world.upsert_entity(me);
        world.upsert_entity(entity_at(Vec2::new(5.0, 0.0), Faction::Raiders));
        world.upsert_entity(entity_at(Vec2::new(100.0, 0.0), Faction::Raiders));

        let candidates = world.candidates_within(Vec2::ZERO, 10.0, me.id);
        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].distance - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_line_blocked_by_obstacle_between() {
        let mut world = World::new();
        world.add_obstacle(Vec2::new(5.0, 0.0), 1.0);

        assert!(world.line_blocked(Vec2::ZERO, Vec2::new(10.0, 0.0)));
        // Parallel segment passing well clear of the circle
        assert!(!world.line_blocked(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0)));
        // Obstacle behind the segment end does not block
        assert!(!world.line_blocked(Vec2::ZERO, Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_view_cone_filtering() {
        let half_angle = 45f32.to_radians();
        // Looking along +X
        assert!(World::in_view_cone(
            Vec2::ZERO,
            Vec2::X,
            half_angle,
            Vec2::new(10.0, 1.0)
        ));
        assert!(!World::in_view_cone(
            Vec2::ZERO,
            Vec2::X,
            half_angle,
            Vec2::new(-10.0, 0.0)
        ));
        // Exactly on the boundary counts as inside
        assert!(World::in_view_cone(
            Vec2::ZERO,
            Vec2::X,
            90f32.to_radians(),
            Vec2::new(0.0, 5.0)
        ));
    }

    #[test]
    fn test_is_alive_unknown_id_is_false() {
        let world = World::new();
        assert!(!world.is_alive(EntityId::new()));
    }
}
