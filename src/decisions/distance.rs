//! Distance-to-target comparison guard

use crate::brain::{Decision, TickContext};
use crate::core::error::Result;

/// Five-way comparison with explicit boundary semantics
///
/// At a value exactly equal to the threshold, the inclusive variants
/// (`LowerThan`, `GreaterThan`) are true and the strict variants are
/// false. `Equals` uses the configured distance epsilon - exact float
/// equality is useless for positions moving in dt-sized steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    StrictlyLowerThan,
    LowerThan,
    Equals,
    GreaterThan,
    StrictlyGreaterThan,
}

impl Comparison {
    pub fn compare(&self, value: f32, threshold: f32, epsilon: f32) -> bool {
        match self {
            Comparison::StrictlyLowerThan => value < threshold,
            Comparison::LowerThan => value <= threshold,
            Comparison::Equals => (value - threshold).abs() <= epsilon,
            Comparison::GreaterThan => value >= threshold,
            Comparison::StrictlyGreaterThan => value > threshold,
        }
    }
}

/// True when the distance to the live target satisfies the comparison
///
/// A missing or despawned target is an ordinary miss (false), not an
/// error.
#[derive(Debug, Clone)]
pub struct TargetWithinDistance {
    threshold: f32,
    comparison: Comparison,
}

impl TargetWithinDistance {
    pub fn new(threshold: f32, comparison: Comparison) -> Self {
        Self {
            threshold,
            comparison,
        }
    }
}

impl Decision for TargetWithinDistance {
    fn name(&self) -> &'static str {
        "target_within_distance"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool> {
        let Some(target_pos) = ctx.target_position() else {
            return Ok(false);
        };
        let distance = ctx.body.position.distance(target_pos);
        Ok(self
            .comparison
            .compare(distance, self.threshold, ctx.config.distance_epsilon))
    }
}
