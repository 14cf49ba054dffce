//! Capability-typed abilities a character may carry
//!
//! Abilities are narrow command surfaces: actions issue fire-and-forget
//! commands (set a movement vector, hold the trigger, request a reload)
//! and the host simulation integrates them. An ability owns its internal
//! state; strategies never wait on command completion.
//!
//! A character is not required to carry every ability. Strategies declare
//! what they need at init time and are disabled, with a warning, when the
//! character lacks it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement command surface
///
/// Holds the last commanded velocity until someone commands otherwise.
/// The engine never clears it on state exit - actions that move the body
/// are responsible for issuing `stop()` in their own exit hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locomotion {
    /// Last commanded velocity (world units / second)
    pub desired_velocity: Vec2,
    pub max_speed: f32,
}

impl Locomotion {
    pub fn new(max_speed: f32) -> Self {
        Self {
            desired_velocity: Vec2::ZERO,
            max_speed,
        }
    }

    /// Command a velocity, clamped to max_speed
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.desired_velocity = velocity.clamp_length_max(self.max_speed);
    }

    /// Command movement along a direction at full speed
    pub fn move_towards(&mut self, direction: Vec2) {
        if direction.length_squared() > 1e-6 {
            self.desired_velocity = direction.normalize() * self.max_speed;
        } else {
            self.desired_velocity = Vec2::ZERO;
        }
    }

    pub fn stop(&mut self) {
        self.desired_velocity = Vec2::ZERO;
    }
}

/// Ranged weapon command surface
///
/// `trigger_held` models continuous fire: the weapon keeps shooting at its
/// own cadence while the trigger is held. Releasing the trigger is an
/// explicit command - exiting an attack state does not release it for you.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponMount {
    pub trigger_held: bool,
    pub rounds_loaded: u32,
    pub magazine_size: u32,
    /// Seconds between shots while the trigger is held
    pub fire_interval: f32,
    /// Seconds until the next shot may fire
    pub cooldown: f32,
    pub reload_duration: f32,
    /// Seconds left on an in-progress reload; 0.0 when not reloading
    pub reload_remaining: f32,
    pub range: f32,
    pub damage: f32,
}

impl WeaponMount {
    pub fn new(magazine_size: u32, fire_interval: f32, range: f32, damage: f32) -> Self {
        Self {
            trigger_held: false,
            rounds_loaded: magazine_size,
            magazine_size,
            fire_interval,
            cooldown: 0.0,
            reload_duration: 1.5,
            reload_remaining: 0.0,
            range,
            damage,
        }
    }

    pub fn hold_trigger(&mut self) {
        self.trigger_held = true;
    }

    pub fn release_trigger(&mut self) {
        self.trigger_held = false;
    }

    /// Request a reload; no-op if already reloading or already full
    pub fn request_reload(&mut self) {
        if self.reload_remaining <= 0.0 && self.rounds_loaded < self.magazine_size {
            self.reload_remaining = self.reload_duration;
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining > 0.0
    }

    /// Whether a shot would leave the barrel right now
    pub fn can_fire(&self) -> bool {
        self.trigger_held && self.rounds_loaded > 0 && self.cooldown <= 0.0 && !self.is_reloading()
    }
}

/// Aim command surface
///
/// Actions set a world-space aim point; the host turns the body's facing
/// toward it. Cleared explicitly by the aiming action's exit hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimControl {
    pub aim_point: Option<Vec2>,
}

impl AimControl {
    pub fn aim_at(&mut self, point: Vec2) {
        self.aim_point = Some(point);
    }

    pub fn clear(&mut self) {
        self.aim_point = None;
    }
}

/// The set of abilities a character carries
///
/// Lookup is capability-typed: a strategy asks for the ability it needs
/// and gets None when the character lacks it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abilities {
    pub locomotion: Option<Locomotion>,
    pub weapon: Option<WeaponMount>,
    pub aim: Option<AimControl>,
}

impl Abilities {
    pub fn locomotion_mut(&mut self) -> Option<&mut Locomotion> {
        self.locomotion.as_mut()
    }

    pub fn weapon_mut(&mut self) -> Option<&mut WeaponMount> {
        self.weapon.as_mut()
    }

    pub fn aim_mut(&mut self) -> Option<&mut AimControl> {
        self.aim.as_mut()
    }

    pub fn has_locomotion(&self) -> bool {
        self.locomotion.is_some()
    }

    pub fn has_weapon(&self) -> bool {
        self.weapon.is_some()
    }

    pub fn has_aim(&self) -> bool {
        self.aim.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locomotion_clamps_to_max_speed() {
        let mut locomotion = Locomotion::new(5.0);
        locomotion.set_velocity(Vec2::new(30.0, 40.0));
        assert!((locomotion.desired_velocity.length() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_move_towards_zero_direction_stops() {
        let mut locomotion = Locomotion::new(5.0);
        locomotion.move_towards(Vec2::X);
        locomotion.move_towards(Vec2::ZERO);
        assert_eq!(locomotion.desired_velocity, Vec2::ZERO);
    }

    #[test]
    fn test_weapon_cannot_fire_while_reloading() {
        let mut weapon = WeaponMount::new(8, 0.2, 30.0, 10.0);
        weapon.hold_trigger();
        assert!(weapon.can_fire());

        weapon.rounds_loaded = 4;
        weapon.request_reload();
        assert!(weapon.is_reloading());
        assert!(!weapon.can_fire());
    }

    #[test]
    fn test_reload_request_when_full_is_noop() {
        let mut weapon = WeaponMount::new(8, 0.2, 30.0, 10.0);
        weapon.request_reload();
        assert!(!weapon.is_reloading());
    }
}
