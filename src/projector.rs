//! Converts raw seasonal counts into per-plate-appearance event rates,
//! applying park factor and falling back to league baselines when data is
//! missing or thin.

use crate::baselines::{EventRates, LeagueBaselines};
use crate::error::SimResult;
use crate::stats::{BattingStatLine, PitchingStatLine};

/// An `EventRates` projection plus whether it fell back to the league
/// baseline (either wholesale, for a thin sample, or partially, for a
/// pitching line missing an extra-base breakdown).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub rates: EventRates,
    pub used_fallback: bool,
}

pub struct ProbabilityProjector<'a> {
    baselines: &'a LeagueBaselines,
    min_plate_appearances: u32,
    park_factor: u16,
}

impl<'a> ProbabilityProjector<'a> {
    pub fn new(
        baselines: &'a LeagueBaselines,
        min_plate_appearances: u32,
        park_factor: u16,
    ) -> ProbabilityProjector<'a> {
        ProbabilityProjector {
            baselines,
            min_plate_appearances,
            park_factor,
        }
    }

    pub fn project_batter(&self, line: &BattingStatLine) -> SimResult<Projection> {
        line.validate()?;
        let pa = line.plate_appearances();
        let league = self.baselines.baseline(line.season);

        if pa == 0 || pa < self.min_plate_appearances {
            return Ok(Projection {
                rates: self.apply_park_factor(league),
                used_fallback: true,
            });
        }

        let denom = f64::from(pa);
        let rates = EventRates {
            strikeout: f64::from(line.strikeouts) / denom,
            walk: f64::from(line.walks) / denom,
            hit_by_pitch: f64::from(line.hit_by_pitch) / denom,
            single: f64::from(line.singles()) / denom,
            double: f64::from(line.doubles) / denom,
            triple: f64::from(line.triples) / denom,
            home_run: f64::from(line.home_runs) / denom,
        };
        Ok(Projection {
            rates: self.apply_park_factor(rates),
            used_fallback: false,
        })
    }

    pub fn project_pitcher(&self, line: &PitchingStatLine) -> SimResult<Projection> {
        line.validate()?;
        let bf = line.batters_faced;
        let league = self.baselines.baseline(line.season);

        if bf == 0 || bf < self.min_plate_appearances {
            return Ok(Projection {
                rates: self.apply_park_factor(league),
                used_fallback: true,
            });
        }

        let denom = f64::from(bf);
        let non_hr_hits = f64::from(line.hits_allowed.saturating_sub(line.home_runs_allowed));
        let (singles, doubles, triples, used_fallback) = match line.extra_base_hits_allowed {
            Some(extra) => {
                let doubles = f64::from(extra.doubles);
                let triples = f64::from(extra.triples);
                let singles = (non_hr_hits - doubles - triples).max(0.0);
                (singles, doubles, triples, false)
            }
            None => {
                // Distribute by league-baseline extra-base proportions.
                let total_ratio = league.single + league.double + league.triple;
                if total_ratio <= 0.0 {
                    (non_hr_hits, 0.0, 0.0, true)
                } else {
                    let singles = non_hr_hits * league.single / total_ratio;
                    let doubles = non_hr_hits * league.double / total_ratio;
                    let triples = non_hr_hits * league.triple / total_ratio;
                    (singles, doubles, triples, true)
                }
            }
        };

        let rates = EventRates {
            strikeout: f64::from(line.strikeouts) / denom,
            walk: f64::from(line.walks_allowed) / denom,
            hit_by_pitch: f64::from(line.hit_by_pitch_allowed) / denom,
            single: singles / denom,
            double: doubles / denom,
            triple: triples / denom,
            home_run: f64::from(line.home_runs_allowed) / denom,
        };
        Ok(Projection {
            rates: self.apply_park_factor(rates),
            used_fallback,
        })
    }

    /// Scale hit-type rates by `1 + (park_factor - 100) / 200` (half
    /// strength, since half a season is on the road). Strikeouts, walks,
    /// and hit-by-pitch are left untouched.
    fn apply_park_factor(&self, rates: EventRates) -> EventRates {
        let multiplier = 1.0 + (f64::from(self.park_factor) - 100.0) / 200.0;
        EventRates {
            strikeout: rates.strikeout,
            walk: rates.walk,
            hit_by_pitch: rates.hit_by_pitch,
            single: rates.single * multiplier,
            double: rates.double * multiplier,
            triple: rates.triple * multiplier,
            home_run: rates.home_run * multiplier,
        }
    }
}
