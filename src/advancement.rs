//! Base-state-conditioned runner advancement.
//!
//! Hits that can plausibly go more than one way (does the runner on second
//! score on a single, or hold at third?) are resolved by a weighted draw
//! against a fixed probability table keyed by the prior base state. Hits
//! and forces with only one sane outcome (a home run clears the bases; a
//! bases-loaded walk forces in a run) are computed directly instead of
//! being dressed up as a one-row table.

use std::collections::HashMap;

use crate::base_state::BaseState;
use crate::error::{SimError, SimResult};
use crate::outcome::AtBatOutcome;
use crate::rng::RandomSource;

const EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AdvancementResult {
    pub new_state: BaseState,
    pub runs_scored: u8,
    pub out_delta: u8,
}

/// One (base state -> possible results) row of a hit-type's matrix.
type MatrixRow = (Vec<AdvancementResult>, Vec<f64>);

pub struct AdvancementEngine {
    single: HashMap<BaseState, MatrixRow>,
    double: HashMap<BaseState, MatrixRow>,
    triple: HashMap<BaseState, MatrixRow>,
}

impl AdvancementEngine {
    pub fn new() -> SimResult<AdvancementEngine> {
        let engine = AdvancementEngine {
            single: build_single_matrix(),
            double: build_double_matrix(),
            triple: build_triple_matrix(),
        };
        engine.validate("single", &engine.single)?;
        engine.validate("double", &engine.double)?;
        engine.validate("triple", &engine.triple)?;
        Ok(engine)
    }

    fn validate(&self, outcome: &'static str, matrix: &HashMap<BaseState, MatrixRow>) -> SimResult<()> {
        for state in BaseState::all() {
            let (_, weights) = matrix.get(&state).expect("matrix covers all eight base states");
            let sum: f64 = weights.iter().sum();
            if (sum - 1.0).abs() > EPSILON {
                return Err(SimError::InvalidAdvancementMatrix {
                    outcome,
                    base_state: format!("{:?}", state.as_tuple()),
                    sum,
                    epsilon: EPSILON,
                });
            }
        }
        Ok(())
    }

    pub fn advance(
        &self,
        outcome: AtBatOutcome,
        prior_state: BaseState,
        rng: &mut RandomSource,
    ) -> SimResult<AdvancementResult> {
        match outcome {
            AtBatOutcome::SingleOutfield | AtBatOutcome::SingleInfield | AtBatOutcome::ReachedOnError => {
                self.sample(&self.single, prior_state, rng, "single")
            }
            AtBatOutcome::Double => self.sample(&self.double, prior_state, rng, "double"),
            AtBatOutcome::Triple => self.sample(&self.triple, prior_state, rng, "triple"),
            AtBatOutcome::HomeRun => Ok(AdvancementResult {
                new_state: BaseState::empty(),
                runs_scored: 1 + prior_state.count(),
                out_delta: 0,
            }),
            AtBatOutcome::Walk | AtBatOutcome::HitByPitch => Ok(force_advance(prior_state)),
            AtBatOutcome::GroundIntoDoublePlay => Ok(AdvancementResult {
                new_state: prior_state.with_first(false),
                runs_scored: 0,
                out_delta: outcome.out_delta(),
            }),
            AtBatOutcome::SacrificeFly => Ok(AdvancementResult {
                new_state: prior_state.with_third(false),
                runs_scored: u8::from(prior_state.third()),
                out_delta: outcome.out_delta(),
            }),
            _ => Ok(AdvancementResult {
                new_state: prior_state,
                runs_scored: 0,
                out_delta: outcome.out_delta(),
            }),
        }
    }

    fn sample(
        &self,
        matrix: &HashMap<BaseState, MatrixRow>,
        prior_state: BaseState,
        rng: &mut RandomSource,
        context: &str,
    ) -> SimResult<AdvancementResult> {
        let (results, weights) = matrix.get(&prior_state).expect("matrix covers all eight base states");
        rng.weighted_choice_with_context(results, weights, Some(context))
    }
}

/// Force-only advancement for a walk or hit-by-pitch: the batter takes
/// first, and any runner directly behind an occupied base ahead of them is
/// pushed forward. A runner with an open base ahead never moves.
fn force_advance(prior: BaseState) -> AdvancementResult {
    let new_third = prior.third() || (prior.second() && prior.first());
    let new_second = prior.second() || prior.first();
    let runs_scored = u8::from(prior.third() && prior.second() && prior.first());
    AdvancementResult {
        new_state: BaseState::new(true, new_second, new_third),
        runs_scored,
        out_delta: 0,
    }
}

fn result(first: bool, second: bool, third: bool, runs: u8) -> AdvancementResult {
    AdvancementResult {
        new_state: BaseState::new(first, second, third),
        runs_scored: runs,
        out_delta: 0,
    }
}

fn row(entries: Vec<(AdvancementResult, f64)>) -> MatrixRow {
    let (results, weights) = entries.into_iter().unzip();
    (results, weights)
}

/// The probability a runner on second scores on a single rather than
/// holding at third, and its complement.
const SCORE_FROM_SECOND_ON_SINGLE: f64 = 0.576;
const HOLD_AT_THIRD_ON_SINGLE: f64 = 1.0 - SCORE_FROM_SECOND_ON_SINGLE;

/// The probability a forced runner on first takes third rather than second
/// on a single, when the path to third is open.
const FIRST_TO_THIRD_ON_SINGLE: f64 = 0.264;
const FIRST_TO_SECOND_ON_SINGLE: f64 = 1.0 - FIRST_TO_THIRD_ON_SINGLE;

/// The probability a runner on first scores from a double rather than
/// stopping at third.
const SCORE_FROM_FIRST_ON_DOUBLE: f64 = 0.45;
const THIRD_FROM_FIRST_ON_DOUBLE: f64 = 1.0 - SCORE_FROM_FIRST_ON_DOUBLE;

fn build_single_matrix() -> HashMap<BaseState, MatrixRow> {
    let mut matrix = HashMap::new();

    matrix.insert(
        BaseState::new(false, false, false),
        row(vec![(result(true, false, false, 0), 1.0)]),
    );
    matrix.insert(
        BaseState::new(true, false, false),
        row(vec![
            (result(true, true, false, 0), FIRST_TO_SECOND_ON_SINGLE),
            (result(true, false, true, 0), FIRST_TO_THIRD_ON_SINGLE),
        ]),
    );
    matrix.insert(
        BaseState::new(false, true, false),
        row(vec![
            (result(true, false, false, 1), SCORE_FROM_SECOND_ON_SINGLE),
            (result(true, false, true, 0), HOLD_AT_THIRD_ON_SINGLE),
        ]),
    );
    matrix.insert(
        BaseState::new(false, false, true),
        row(vec![(result(true, false, false, 1), 1.0)]),
    );
    matrix.insert(
        BaseState::new(true, true, false),
        row(vec![
            (
                result(true, true, false, 1),
                SCORE_FROM_SECOND_ON_SINGLE * FIRST_TO_SECOND_ON_SINGLE,
            ),
            (
                result(true, false, true, 1),
                SCORE_FROM_SECOND_ON_SINGLE * FIRST_TO_THIRD_ON_SINGLE,
            ),
            (result(true, true, true, 0), HOLD_AT_THIRD_ON_SINGLE),
        ]),
    );
    matrix.insert(
        BaseState::new(true, false, true),
        row(vec![
            (result(true, true, true, 1), FIRST_TO_SECOND_ON_SINGLE),
            (result(true, false, true, 1), FIRST_TO_THIRD_ON_SINGLE),
        ]),
    );
    matrix.insert(
        BaseState::new(false, true, true),
        row(vec![
            (result(true, false, false, 2), SCORE_FROM_SECOND_ON_SINGLE),
            (result(true, false, true, 1), HOLD_AT_THIRD_ON_SINGLE),
        ]),
    );
    matrix.insert(
        BaseState::new(true, true, true),
        row(vec![
            (
                result(true, true, false, 2),
                SCORE_FROM_SECOND_ON_SINGLE * FIRST_TO_SECOND_ON_SINGLE,
            ),
            (
                result(true, false, true, 2),
                SCORE_FROM_SECOND_ON_SINGLE * FIRST_TO_THIRD_ON_SINGLE,
            ),
            (result(true, true, true, 1), HOLD_AT_THIRD_ON_SINGLE),
        ]),
    );

    matrix
}

fn build_double_matrix() -> HashMap<BaseState, MatrixRow> {
    let mut matrix = HashMap::new();

    matrix.insert(
        BaseState::new(false, false, false),
        row(vec![(result(false, true, false, 0), 1.0)]),
    );
    matrix.insert(
        BaseState::new(true, false, false),
        row(vec![
            (result(false, true, false, 1), SCORE_FROM_FIRST_ON_DOUBLE),
            (result(false, true, true, 0), THIRD_FROM_FIRST_ON_DOUBLE),
        ]),
    );
    matrix.insert(
        BaseState::new(false, true, false),
        row(vec![(result(false, true, false, 1), 1.0)]),
    );
    matrix.insert(
        BaseState::new(false, false, true),
        row(vec![(result(false, true, false, 1), 1.0)]),
    );
    matrix.insert(
        BaseState::new(true, true, false),
        row(vec![
            (result(false, true, false, 2), SCORE_FROM_FIRST_ON_DOUBLE),
            (result(false, true, true, 1), THIRD_FROM_FIRST_ON_DOUBLE),
        ]),
    );
    matrix.insert(
        BaseState::new(true, false, true),
        row(vec![
            (result(false, true, false, 2), SCORE_FROM_FIRST_ON_DOUBLE),
            (result(false, true, true, 1), THIRD_FROM_FIRST_ON_DOUBLE),
        ]),
    );
    matrix.insert(
        BaseState::new(false, true, true),
        row(vec![(result(false, true, false, 2), 1.0)]),
    );
    matrix.insert(
        BaseState::new(true, true, true),
        row(vec![
            (result(false, true, false, 3), SCORE_FROM_FIRST_ON_DOUBLE),
            (result(false, true, true, 2), THIRD_FROM_FIRST_ON_DOUBLE),
        ]),
    );

    matrix
}

fn build_triple_matrix() -> HashMap<BaseState, MatrixRow> {
    let mut matrix = HashMap::new();
    for state in BaseState::all() {
        let runs = state.count();
        matrix.insert(state, row(vec![(result(false, false, true, runs), 1.0)]));
    }
    matrix
}
