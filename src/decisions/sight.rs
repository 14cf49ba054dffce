//! Detection scan: the dual-purpose sensor guard
//!
//! Among every qualifying candidate (inside the radius, inside the view
//! cone, hostile, alive, unobstructed) the scan picks the closest one and
//! assigns it to the blackboard target as a side effect of returning
//! true. Callers using only the boolean still get the assignment - that
//! is the contract, and movement/attack actions later in the same tick
//! depend on it.
//!
//! Scans are the most expensive guards (radius query plus one raycast per
//! candidate), so they can self-throttle to a fixed interval and replay
//! the last verdict between scans.

use crate::brain::{Decision, TickContext};
use crate::core::config::AiConfig;
use crate::core::error::Result;
use crate::world::World;
use ordered_float::OrderedFloat;

/// Cone/radius/line-of-sight hostile detection
#[derive(Debug, Clone)]
pub struct ScanForTarget {
    radius: f32,
    /// View-cone half-angle in radians; None scans all around
    cone_half_angle: Option<f32>,
    require_los: bool,
    clear_on_miss: bool,
    /// Seconds between real scans; 0.0 scans every tick
    scan_interval: f32,
    since_scan: f32,
    last_verdict: bool,
}

impl ScanForTarget {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            cone_half_angle: None,
            require_los: false,
            clear_on_miss: false,
            scan_interval: 0.0,
            since_scan: f32::MAX,
            last_verdict: false,
        }
    }

    /// Standard guard sensor: config radius/cone/interval, line of sight
    /// required, stale targets cleared on a miss
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.perception_radius)
            .with_cone(config.view_cone_degrees)
            .require_los()
            .clear_on_miss()
            .throttled(config.scan_interval)
    }

    /// Restrict to a view cone with the given half-angle in degrees
    pub fn with_cone(mut self, half_angle_degrees: f32) -> Self {
        self.cone_half_angle = Some(half_angle_degrees.to_radians());
        self
    }

    /// Only accept candidates with an unobstructed line of sight
    pub fn require_los(mut self) -> Self {
        self.require_los = true;
        self
    }

    /// Null the target on a failed scan instead of leaving a stale one
    pub fn clear_on_miss(mut self) -> Self {
        self.clear_on_miss = true;
        self
    }

    /// Re-scan at most every `interval` seconds
    pub fn throttled(mut self, interval: f32) -> Self {
        self.scan_interval = interval;
        self
    }

    fn scan(&self, ctx: &mut TickContext<'_>) -> bool {
        let origin = ctx.body.position;
        let facing = ctx.body.facing;
        let hit = ctx
            .world
            .candidates_within(origin, self.radius, ctx.body.id)
            .into_iter()
            .filter(|c| c.entity.alive)
            .filter(|c| ctx.body.faction.hostile_to(c.entity.faction))
            .filter(|c| match self.cone_half_angle {
                Some(half_angle) => {
                    World::in_view_cone(origin, facing, half_angle, c.entity.position)
                }
                None => true,
            })
            .filter(|c| !self.require_los || !ctx.world.line_blocked(origin, c.entity.position))
            .min_by_key(|c| OrderedFloat(c.distance));

        match hit {
            Some(c) => {
                ctx.blackboard.set_target(c.entity.id, c.entity.position);
                true
            }
            None => {
                if self.clear_on_miss {
                    ctx.blackboard.clear_target();
                }
                false
            }
        }
    }
}

impl Decision for ScanForTarget {
    fn name(&self) -> &'static str {
        "scan_for_target"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool> {
        if self.scan_interval > 0.0 {
            self.since_scan += ctx.dt;
            if self.since_scan < self.scan_interval {
                return Ok(self.last_verdict);
            }
            self.since_scan = 0.0;
        }
        let verdict = self.scan(ctx);
        self.last_verdict = verdict;
        Ok(verdict)
    }

    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {
        // Scan immediately on the first tick of a fresh activation
        self.since_scan = f32::MAX;
        self.last_verdict = false;
    }
}
