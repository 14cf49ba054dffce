//! Random-odds guard

use crate::brain::{Decision, TickContext};
use crate::core::error::Result;
use rand::Rng;

/// True with probability odds/total, re-rolled fresh every tick
///
/// One uniform integer is drawn in `[1, total]`; the guard is true iff
/// the draw is `<= odds`. Never memoized: the same tick's verdict is
/// never reused on the next one. `odds = 0` is never true, `odds =
/// total` always is.
#[derive(Debug, Clone)]
pub struct Chance {
    odds: u32,
    total: u32,
}

impl Chance {
    pub fn new(odds: u32, total: u32) -> Self {
        Self { odds, total }
    }

    /// Convenience for "1 in n" style odds
    pub fn one_in(n: u32) -> Self {
        Self { odds: 1, total: n }
    }
}

impl Decision for Chance {
    fn name(&self) -> &'static str {
        "chance"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> Result<bool> {
        if self.total == 0 {
            return Ok(false);
        }
        let draw = ctx.rng.gen_range(1..=self.total);
        Ok(draw <= self.odds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Fixture;

    #[test]
    fn test_full_odds_always_true() {
        let mut fixture = Fixture::new();
        let mut decision = Chance::new(10, 10);
        for _ in 0..100 {
            assert!(decision.decide(&mut fixture.ctx(0.1)).unwrap());
        }
    }

    #[test]
    fn test_zero_odds_never_true() {
        let mut fixture = Fixture::new();
        let mut decision = Chance::new(0, 10);
        for _ in 0..100 {
            assert!(!decision.decide(&mut fixture.ctx(0.1)).unwrap());
        }
    }

    #[test]
    fn test_partial_odds_lands_near_expectation() {
        let mut fixture = Fixture::new();
        let mut decision = Chance::new(1, 4);
        let hits = (0..4000)
            .filter(|_| decision.decide(&mut fixture.ctx(0.1)).unwrap())
            .count();
        // Seeded rng; generous band around the expected 1000
        assert!((700..1300).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_degenerate_total_zero_is_false() {
        let mut fixture = Fixture::new();
        let mut decision = Chance::new(0, 0);
        assert!(!decision.decide(&mut fixture.ctx(0.1)).unwrap());
    }
}
