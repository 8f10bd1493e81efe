//! Era-partitioned league-average event rates.

use crate::error::{SimError, SimResult};
use crate::ids::Season;

/// The closed event set `E` that a matchup, a baseline, or a projection can
/// assign probability to. Always unnormalized: `1 - sum(E)` is the implicit
/// "in-play out" mass and must never be folded back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EventRates {
    pub strikeout: f64,
    pub walk: f64,
    pub hit_by_pitch: f64,
    pub single: f64,
    pub double: f64,
    pub triple: f64,
    pub home_run: f64,
}

impl EventRates {
    pub fn sum(&self) -> f64 {
        self.strikeout
            + self.walk
            + self.hit_by_pitch
            + self.single
            + self.double
            + self.triple
            + self.home_run
    }

    /// The implicit "in-play out" mass: `1 - sum(E)`.
    pub fn residual(&self) -> f64 {
        1.0 - self.sum()
    }

    pub fn total_hit_rate(&self) -> f64 {
        self.single + self.double + self.triple + self.home_run
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Era {
    Deadball,
    Liveball,
    Modern,
}

impl Era {
    pub fn name(self) -> &'static str {
        match self {
            Era::Deadball => "deadball",
            Era::Liveball => "liveball",
            Era::Modern => "modern",
        }
    }
}

/// Hardcoded, process-wide era-average event rates, selected by season year.
///
/// Era boundaries: deadball (< 1920), liveball (1920..=1960), modern (>= 1961).
#[derive(Debug, Clone)]
pub struct LeagueBaselines {
    deadball: EventRates,
    liveball: EventRates,
    modern: EventRates,
}

impl LeagueBaselines {
    /// Construct with the default glossary values, validating that every
    /// probability (and the implicit out residual) is strictly in (0, 1).
    pub fn new() -> SimResult<LeagueBaselines> {
        let baselines = LeagueBaselines {
            deadball: EventRates {
                strikeout: 0.10,
                walk: 0.08,
                hit_by_pitch: 0.01,
                single: 0.18,
                double: 0.04,
                triple: 0.02,
                home_run: 0.005,
            },
            liveball: EventRates {
                strikeout: 0.12,
                walk: 0.09,
                hit_by_pitch: 0.01,
                single: 0.17,
                double: 0.04,
                triple: 0.015,
                home_run: 0.02,
            },
            modern: EventRates {
                strikeout: 0.20,
                walk: 0.08,
                hit_by_pitch: 0.01,
                single: 0.15,
                double: 0.045,
                triple: 0.005,
                home_run: 0.03,
            },
        };
        for era in [Era::Deadball, Era::Liveball, Era::Modern] {
            baselines.validate_era(era)?;
        }
        Ok(baselines)
    }

    /// Construct from caller-supplied rates (e.g. for future validation
    /// tuning), validated the same way as the built-in defaults.
    pub fn from_rates(
        deadball: EventRates,
        liveball: EventRates,
        modern: EventRates,
    ) -> SimResult<LeagueBaselines> {
        let baselines = LeagueBaselines {
            deadball,
            liveball,
            modern,
        };
        for era in [Era::Deadball, Era::Liveball, Era::Modern] {
            baselines.validate_era(era)?;
        }
        Ok(baselines)
    }

    fn validate_era(&self, era: Era) -> SimResult<()> {
        let rates = self.baseline_for(era);
        let fields: [(&'static str, f64); 7] = [
            ("strikeout", rates.strikeout),
            ("walk", rates.walk),
            ("hit_by_pitch", rates.hit_by_pitch),
            ("single", rates.single),
            ("double", rates.double),
            ("triple", rates.triple),
            ("home_run", rates.home_run),
        ];
        for (field, value) in fields {
            if !(0.0 < value && value < 1.0) {
                return Err(SimError::InvalidLeagueBaseline {
                    era: era.name(),
                    field,
                    value,
                });
            }
        }
        let residual = rates.residual();
        if !(0.0 < residual && residual < 1.0) {
            return Err(SimError::InvalidLeagueBaseline {
                era: era.name(),
                field: "residual (in-play out rate)",
                value: residual,
            });
        }
        Ok(())
    }

    pub fn era_of(season: Season) -> Era {
        match season.year() {
            y if y < 1920 => Era::Deadball,
            1920..=1960 => Era::Liveball,
            _ => Era::Modern,
        }
    }

    fn baseline_for(&self, era: Era) -> EventRates {
        match era {
            Era::Deadball => self.deadball,
            Era::Liveball => self.liveball,
            Era::Modern => self.modern,
        }
    }

    pub fn baseline(&self, season: Season) -> EventRates {
        self.baseline_for(Self::era_of(season))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_boundaries() {
        assert_eq!(LeagueBaselines::era_of(Season(1919)), Era::Deadball);
        assert_eq!(LeagueBaselines::era_of(Season(1920)), Era::Liveball);
        assert_eq!(LeagueBaselines::era_of(Season(1960)), Era::Liveball);
        assert_eq!(LeagueBaselines::era_of(Season(1961)), Era::Modern);
        assert_eq!(LeagueBaselines::era_of(Season(2024)), Era::Modern);
    }

    #[test]
    fn default_baselines_validate() {
        LeagueBaselines::new().unwrap();
    }

    #[test]
    fn all_eras_have_positive_residual() {
        let baselines = LeagueBaselines::new().unwrap();
        for season in [Season(1900), Season(1940), Season(2000)] {
            let rates = baselines.baseline(season);
            assert!(rates.residual() > 0.0 && rates.residual() < 1.0);
        }
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let mut bad = EventRates::default();
        bad.strikeout = 1.5;
        let err = LeagueBaselines::from_rates(bad, EventRates::default(), EventRates::default());
        assert!(err.is_err());
    }
}
