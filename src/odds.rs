//! Odds-ratio combination of batter and pitcher probabilities against a
//! league anchor.
//!
//! This is the single most load-bearing piece of math in the crate: naively
//! averaging `(b + p) / 2` flattens skill differences and is wrong in a way
//! that passes casual inspection. The odds-ratio form keeps elite/weak
//! matchups pulling further from league average than a naive average would.

use crate::baselines::EventRates;
use crate::error::{SimError, SimResult};

fn odds(p: f64) -> f64 {
    p / (1.0 - p)
}

/// Combine a single event's batter probability `b`, pitcher-allowed
/// probability `p`, and league probability `l` into a matchup probability.
///
/// `l` must be strictly in `(0, 1)`. `b` and `p` must be in `[0, 1]`.
/// Handles `b` or `p` at the boundary (0 or 1) without dividing by zero:
/// `combine(0, p, l) == 0`, `combine(1, p, l) == 1` (symmetric in `b`/`p`).
pub fn combine(b: f64, p: f64, l: f64) -> SimResult<f64> {
    if !(0.0..=1.0).contains(&b) {
        return Err(SimError::InvalidProbabilityInput {
            field: "b",
            value: b,
            expected: "in [0, 1]",
        });
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::InvalidProbabilityInput {
            field: "p",
            value: p,
            expected: "in [0, 1]",
        });
    }
    if !(0.0 < l && l < 1.0) {
        return Err(SimError::InvalidProbabilityInput {
            field: "l",
            value: l,
            expected: "strictly in (0, 1)",
        });
    }

    if b == 0.0 || p == 0.0 {
        return Ok(0.0);
    }
    if b == 1.0 || p == 1.0 {
        return Ok(1.0);
    }

    // matchup_odds = b_odds * p_odds / l_odds, done in probability space
    // (rather than via `odds()` on all three terms) so it stays numerically
    // well-behaved near the b/p boundaries we've already special-cased.
    let numerator = b * p * (1.0 - l);
    let denominator = numerator + (1.0 - b) * (1.0 - p) * l;
    Ok(numerator / denominator)
}

/// Apply [`combine`] event-by-event across the closed event set, returning
/// an unnormalized [`EventRates`]. The residual `1 - sum` is "in-play out"
/// mass; normalizing here would silently inflate every hit rate and is
/// forbidden by the resolver's chained-binomial decomposition.
pub fn combine_matchup(batter: EventRates, pitcher: EventRates, league: EventRates) -> SimResult<EventRates> {
    Ok(EventRates {
        strikeout: combine(batter.strikeout, pitcher.strikeout, league.strikeout)?,
        walk: combine(batter.walk, pitcher.walk, league.walk)?,
        hit_by_pitch: combine(batter.hit_by_pitch, pitcher.hit_by_pitch, league.hit_by_pitch)?,
        single: combine(batter.single, pitcher.single, league.single)?,
        double: combine(batter.double, pitcher.double, league.double)?,
        triple: combine(batter.triple, pitcher.triple, league.triple)?,
        home_run: combine(batter.home_run, pitcher.home_run, league.home_run)?,
    })
}
