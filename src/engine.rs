//! The facade that wires projector, combiner, resolver, and advancement
//! into a single plate appearance.

use tracing::instrument;

use crate::advancement::{AdvancementEngine, AdvancementResult};
use crate::base_state::BaseState;
use crate::baselines::{EventRates, LeagueBaselines};
use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::ids::Season;
use crate::odds::combine_matchup;
use crate::outcome::AtBatOutcome;
use crate::projector::ProbabilityProjector;
use crate::resolver;
use crate::rng::{DrawRecord, RandomSource};
use crate::stats::{BattingStatLine, PitchingStatLine};

/// Everything about one resolved plate appearance, including the matchup
/// probabilities that produced it and the slice of RNG history consumed
/// while resolving it, for post-hoc audit.
#[derive(Clone, Debug)]
pub struct PlateAppearanceResult {
    pub outcome: AtBatOutcome,
    pub advancement: AdvancementResult,
    pub matchup_rates: EventRates,
    pub audit: Vec<DrawRecord>,
}

pub struct SimulationEngine {
    rng: RandomSource,
    baselines: LeagueBaselines,
    config: SimulationConfig,
    advancement: AdvancementEngine,
}

impl SimulationEngine {
    pub fn new(rng: RandomSource, baselines: LeagueBaselines, config: SimulationConfig) -> SimResult<SimulationEngine> {
        config.validate()?;
        Ok(SimulationEngine {
            rng,
            baselines,
            config,
            advancement: AdvancementEngine::new()?,
        })
    }

    pub fn rng(&self) -> &RandomSource {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[instrument(name = "SimulationEngine::simulate_plate_appearance", skip(self, batter, pitcher))]
    pub fn simulate_plate_appearance(
        &mut self,
        batter: &BattingStatLine,
        pitcher: &PitchingStatLine,
        season: Season,
        prior_base_state: BaseState,
        prior_outs: u8,
    ) -> SimResult<PlateAppearanceResult> {
        // Every validation below must happen before the first RNG draw so a
        // rejected call never pollutes the audit history.
        batter.validate()?;
        pitcher.validate()?;
        self.config.validate()?;

        let projector = ProbabilityProjector::new(&self.baselines, self.config.min_plate_appearances_for_direct_rates, self.config.park_factor);
        let batter_projection = projector.project_batter(batter)?;
        let pitcher_projection = projector.project_pitcher(pitcher)?;
        let league = self.baselines.baseline(season);
        let matchup_rates = combine_matchup(batter_projection.rates, pitcher_projection.rates, league)?;

        tracing::debug!(
            strikeout = matchup_rates.strikeout,
            walk = matchup_rates.walk,
            home_run = matchup_rates.home_run,
            "matchup rates computed"
        );

        let mark = self.rng.mark();
        let outcome = resolver::resolve(&matchup_rates, &mut self.rng, prior_base_state, prior_outs, &self.config)?;
        let advancement = self.advancement.advance(outcome, prior_base_state, &mut self.rng)?;
        let audit = self.rng.history().since(mark).to_vec();

        tracing::trace!(?outcome, runs = advancement.runs_scored, "plate appearance resolved");

        Ok(PlateAppearanceResult {
            outcome,
            advancement,
            matchup_rates,
            audit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;

    fn batter() -> BattingStatLine {
        BattingStatLine {
            player_id: PlayerId::new("b1"),
            season: Season(2005),
            at_bats: 600,
            walks: 60,
            hit_by_pitch: 5,
            sacrifice_flies: 5,
            hits: 170,
            doubles: 30,
            triples: 3,
            home_runs: 25,
            strikeouts: 110,
        }
    }

    fn pitcher() -> PitchingStatLine {
        PitchingStatLine {
            player_id: PlayerId::new("p1"),
            season: Season(2005),
            batters_faced: 800,
            hits_allowed: 160,
            extra_base_hits_allowed: None,
            home_runs_allowed: 18,
            walks_allowed: 60,
            strikeouts: 180,
            hit_by_pitch_allowed: 6,
        }
    }

    fn engine(seed: u64) -> SimulationEngine {
        SimulationEngine::new(
            RandomSource::seeded(seed),
            LeagueBaselines::new().unwrap(),
            SimulationConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn reproducible_given_the_same_seed() {
        let mut a = engine(42);
        let mut b = engine(42);
        for _ in 0..50 {
            let result_a = a
                .simulate_plate_appearance(&batter(), &pitcher(), Season(2005), BaseState::empty(), 0)
                .unwrap();
            let result_b = b
                .simulate_plate_appearance(&batter(), &pitcher(), Season(2005), BaseState::empty(), 0)
                .unwrap();
            assert_eq!(result_a.outcome, result_b.outcome);
            assert_eq!(result_a.advancement, result_b.advancement);
        }
    }

    #[test]
    fn audit_slice_contains_only_draws_from_this_plate_appearance() {
        let mut engine = engine(7);
        let result = engine
            .simulate_plate_appearance(&batter(), &pitcher(), Season(2005), BaseState::empty(), 0)
            .unwrap();
        assert!(!result.audit.is_empty());
        assert_eq!(result.audit.len(), engine.rng().history().len());
    }

    #[test]
    fn rejects_invalid_stat_line_before_touching_the_rng() {
        let mut engine = engine(7);
        let mut bad_batter = batter();
        bad_batter.hits = 1; // fewer than doubles+triples+home_runs
        let history_len_before = engine.rng().history().len();
        let err = engine
            .simulate_plate_appearance(&bad_batter, &pitcher(), Season(2005), BaseState::empty(), 0)
            .unwrap_err();
        assert!(matches!(err, crate::error::SimError::InvalidStatLine { .. }));
        assert_eq!(engine.rng().history().len(), history_len_before);
    }

    #[test]
    fn s1_empty_bases_single_puts_batter_on_first() {
        let mut engine = engine(1);
        let forced_batter = BattingStatLine {
            hits: 1000,
            doubles: 0,
            triples: 0,
            home_runs: 0,
            at_bats: 1000,
            walks: 0,
            hit_by_pitch: 0,
            sacrifice_flies: 0,
            strikeouts: 0,
            ..batter()
        };
        let result = engine
            .simulate_plate_appearance(&forced_batter, &pitcher(), Season(2005), BaseState::empty(), 0)
            .unwrap();
        if result.outcome.is_hit() && result.outcome.bases_gained() == 1 {
            assert!(result.advancement.new_state.first());
        }
    }
}
