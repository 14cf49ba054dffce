//! Stock brain graphs
//!
//! Declarative assembly of the shipped NPC controllers. Transition order
//! within each state is load-bearing: the first satisfied guard wins, so
//! survival checks sit above engagement checks.

use crate::actions::{
    AimAtTarget, ChaseTarget, FireAtTarget, FleeFromTarget, HoldPosition, Patrol, ReloadIfEmpty,
    Wander,
};
use crate::brain::{Brain, BrainBuilder, StateDef};
use crate::core::config::AiConfig;
use crate::core::error::Result;
use crate::decisions::{
    Chance, Comparison, ElapsedInState, LowHealth, ScanForTarget, TargetDown, TargetWithinDistance,
};
use glam::Vec2;

/// Warden guard: patrol -> chase -> attack, falling back when hurt
///
/// Guards scan inside a view cone with line of sight; losing the target
/// mid-chase ends at the last known position, and a dead target routes
/// back to patrol with the slate wiped.
pub fn guard_brain(config: &AiConfig, waypoints: Vec<Vec2>) -> Result<Brain> {
    BrainBuilder::new("guard")
        .state(
            StateDef::new("patrol")
                .when(ScanForTarget::from_config(config), "chase")
                .action(Patrol::new(waypoints)),
        )
        .state(
            StateDef::new("chase")
                .when(TargetDown::new().clearing(), "patrol")
                .when(
                    TargetWithinDistance::new(config.attack_range, Comparison::LowerThan),
                    "attack",
                )
                .action(ChaseTarget::new(config.chase_stop_distance)),
        )
        .state(
            StateDef::new("attack")
                .when(LowHealth::new(config.fallback_health_fraction), "fallback")
                .when(TargetDown::new().clearing(), "patrol")
                .when(
                    TargetWithinDistance::new(
                        config.disengage_range,
                        Comparison::StrictlyGreaterThan,
                    ),
                    "chase",
                )
                .action(HoldPosition::new())
                .action(AimAtTarget::new())
                .action(FireAtTarget::new())
                .action(ReloadIfEmpty::new()),
        )
        .state(
            StateDef::new("fallback")
                .when(
                    ElapsedInState::randomized(
                        config.fallback_duration.0,
                        config.fallback_duration.1,
                    ),
                    "patrol",
                )
                .action(FleeFromTarget::new()),
        )
        .initial("patrol")
        .build()
}

/// Raider: prowl around, occasionally lurk, rush anything spotted
///
/// Raiders scan all-around (no cone) - they are hunting, not guarding a
/// facing. The lurk pause keys off a per-tick chance draw plus a
/// randomized dwell so packs drift out of sync.
pub fn raider_brain(config: &AiConfig) -> Result<Brain> {
    let scan = || {
        ScanForTarget::new(config.perception_radius)
            .require_los()
            .clear_on_miss()
            .throttled(config.scan_interval)
    };
    BrainBuilder::new("raider")
        .state(
            StateDef::new("prowl")
                .when(scan(), "chase")
                .when(Chance::one_in(200), "lurk")
                .action(Wander::new()),
        )
        .state(
            StateDef::new("lurk")
                .when(scan(), "chase")
                .when(ElapsedInState::randomized(1.0, 2.5), "prowl")
                .action(HoldPosition::new()),
        )
        .state(
            StateDef::new("chase")
                .when(TargetDown::new().clearing(), "prowl")
                .when(
                    TargetWithinDistance::new(config.attack_range, Comparison::LowerThan),
                    "attack",
                )
                .action(ChaseTarget::new(config.chase_stop_distance)),
        )
        .state(
            StateDef::new("attack")
                .when(TargetDown::new().clearing(), "prowl")
                .when(
                    TargetWithinDistance::new(
                        config.disengage_range,
                        Comparison::StrictlyGreaterThan,
                    ),
                    "chase",
                )
                .action(AimAtTarget::new())
                .action(FireAtTarget::new())
                .action(ReloadIfEmpty::new()),
        )
        .initial("prowl")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_brain_builds() {
        let brain = guard_brain(&AiConfig::default(), vec![Vec2::ZERO]).unwrap();
        assert_eq!(brain.state_count(), 4);
        assert_eq!(brain.current_state_name(), "patrol");
        assert!(!brain.is_active());
    }

    #[test]
    fn test_raider_brain_builds() {
        let brain = raider_brain(&AiConfig::default()).unwrap();
        assert_eq!(brain.state_count(), 4);
        assert_eq!(brain.current_state_name(), "prowl");
    }
}
