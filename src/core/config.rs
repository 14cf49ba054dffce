//! AI tuning configuration with documented constants
//!
//! All magic numbers used by the stock decisions, actions, and the host
//! simulation are collected here with explanations of their purpose and
//! how they interact with each other. Values can be overridden from a
//! TOML file for per-scenario tuning.

use crate::core::error::{AiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning values for the stock brains and the host simulation
///
/// These defaults were tuned against the skirmish sim to produce
/// readable guard behavior. Changing them shifts pacing and lethality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    // === PERCEPTION ===
    /// How far NPCs can detect hostiles (world units)
    ///
    /// Scans pick the closest unobstructed candidate inside this radius.
    /// Larger values make guards react sooner but cost more candidates
    /// per scan.
    pub perception_radius: f32,

    /// Half-angle of the view cone, in degrees
    ///
    /// Candidates outside the cone around the NPC's facing are invisible
    /// even inside perception_radius. 180 disables the cone entirely.
    pub view_cone_degrees: f32,

    /// Seconds between detection scans
    ///
    /// Scans are the most expensive decisions (radius query + one raycast
    /// per candidate), so they self-throttle to this interval and reuse
    /// the last verdict between scans. 0.0 scans every tick.
    pub scan_interval: f32,

    // === ENGAGEMENT ===
    /// Range at which chasing switches to attacking (world units)
    ///
    /// Should stay comfortably below weapon_range or attackers stall
    /// outside their own reach.
    pub attack_range: f32,

    /// Distance at which an attacker breaks off back into a chase
    ///
    /// Kept above attack_range so the boundary doesn't oscillate when a
    /// target strafes on the threshold.
    pub disengage_range: f32,

    /// Chase keeps this much distance from the target (world units)
    pub chase_stop_distance: f32,

    /// Health fraction below which guards fall back (0.0 to 1.0)
    pub fallback_health_fraction: f32,

    /// Seconds spent falling back before rejoining the fight, min..max
    ///
    /// The threshold is re-rolled on every entry into the fallback state
    /// so groups don't peel away and return in lockstep.
    pub fallback_duration: (f32, f32),

    // === MOVEMENT ===
    /// Radius within which a patrol waypoint counts as reached
    pub patrol_arrive_radius: f32,

    /// Seconds between wander heading changes, min..max
    pub wander_interval: (f32, f32),

    // === NUMERICS ===
    /// Tolerance for the Equals distance comparison (world units)
    ///
    /// Exact float equality is useless for positions moving in dt-sized
    /// steps; two distances within this tolerance compare equal.
    pub distance_epsilon: f32,

    // === HOST / RESPAWN ===
    /// Seconds a downed NPC waits before respawning at its spawn point
    pub respawn_delay: f32,

    /// Perpendicular distance within which a hitscan shot connects
    pub shot_hit_radius: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            // Perception (scan_interval matches a 10 Hz sensor tick)
            perception_radius: 40.0,
            view_cone_degrees: 70.0,
            scan_interval: 0.1,

            // Engagement (disengage > attack to avoid boundary flicker)
            attack_range: 12.0,
            disengage_range: 16.0,
            chase_stop_distance: 8.0,
            fallback_health_fraction: 0.25,
            fallback_duration: (2.5, 5.0),

            // Movement
            patrol_arrive_radius: 1.0,
            wander_interval: (2.0, 6.0),

            // Numerics
            distance_epsilon: 0.01,

            // Host
            respawn_delay: 8.0,
            shot_hit_radius: 0.6,
        }
    }
}

impl AiConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for
    /// any field the file omits
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.perception_radius <= 0.0 {
            return Err(AiError::InvalidConfig(
                "perception_radius must be positive".into(),
            ));
        }

        // Attack boundary must sit inside perception or guards never engage
        if self.attack_range > self.perception_radius {
            return Err(AiError::InvalidConfig(format!(
                "attack_range ({}) should be <= perception_radius ({})",
                self.attack_range, self.perception_radius
            )));
        }

        // Hysteresis gap keeps the attack/chase boundary from oscillating
        if self.disengage_range <= self.attack_range {
            return Err(AiError::InvalidConfig(format!(
                "disengage_range ({}) should be > attack_range ({})",
                self.disengage_range, self.attack_range
            )));
        }

        if !(0.0..=1.0).contains(&self.fallback_health_fraction) {
            return Err(AiError::InvalidConfig(
                "fallback_health_fraction must be in 0.0..=1.0".into(),
            ));
        }

        for (name, (lo, hi)) in [
            ("fallback_duration", self.fallback_duration),
            ("wander_interval", self.wander_interval),
        ] {
            if lo < 0.0 || hi < lo {
                return Err(AiError::InvalidConfig(format!(
                    "{} range ({}, {}) must satisfy 0 <= min <= max",
                    name, lo, hi
                )));
            }
        }

        Ok(())
    }
}
