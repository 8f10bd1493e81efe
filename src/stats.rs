//! Seasonal batting and pitching stat lines.
//!
//! Field names follow the Retrosheet box-score convention (at-bats, hits,
//! doubles/triples/home runs broken out of hits, walks, hit-by-pitch,
//! sacrifice flies, strikeouts) rather than any particular source format.

use crate::error::{SimError, SimResult};
use crate::ids::{PlayerId, Season};

/// Seasonal counts for one player-year, from the batter's side.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct BattingStatLine {
    pub player_id: PlayerId,
    pub season: Season,
    pub at_bats: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub sacrifice_flies: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub strikeouts: u32,
}

impl BattingStatLine {
    /// Singles are derived, never stored directly: `hits - (doubles +
    /// triples + home_runs)`.
    pub fn singles(&self) -> u32 {
        self.hits
            .saturating_sub(self.doubles + self.triples + self.home_runs)
    }

    pub fn plate_appearances(&self) -> u32 {
        self.at_bats + self.walks + self.hit_by_pitch + self.sacrifice_flies
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.doubles + self.triples + self.home_runs > self.hits {
            return Err(SimError::InvalidStatLine {
                field: "hits",
                value: self.hits.to_string(),
                expected: "hits >= doubles + triples + home_runs",
            });
        }
        Ok(())
    }
}

/// Doubles/triples breakdown of hits allowed, when the source data reports
/// it. When absent, the projector distributes `hits_allowed` according to
/// league-baseline extra-base proportions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ExtraBaseBreakdown {
    pub doubles: u32,
    pub triples: u32,
}

/// Seasonal counts for one pitcher-year, from the pitcher's side (i.e.
/// "allowed" rather than "achieved").
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PitchingStatLine {
    pub player_id: PlayerId,
    pub season: Season,
    pub batters_faced: u32,
    pub hits_allowed: u32,
    pub extra_base_hits_allowed: Option<ExtraBaseBreakdown>,
    pub home_runs_allowed: u32,
    pub walks_allowed: u32,
    pub strikeouts: u32,
    pub hit_by_pitch_allowed: u32,
}

impl PitchingStatLine {
    pub fn validate(&self) -> SimResult<()> {
        if self.home_runs_allowed > self.hits_allowed {
            return Err(SimError::InvalidStatLine {
                field: "hits_allowed",
                value: self.hits_allowed.to_string(),
                expected: "hits_allowed >= home_runs_allowed",
            });
        }
        if let Some(extra) = self.extra_base_hits_allowed {
            if extra.doubles + extra.triples + self.home_runs_allowed > self.hits_allowed {
                return Err(SimError::InvalidStatLine {
                    field: "hits_allowed",
                    value: self.hits_allowed.to_string(),
                    expected: "hits_allowed >= doubles + triples + home_runs_allowed",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batting() -> BattingStatLine {
        BattingStatLine {
            player_id: PlayerId::new("troutmi01"),
            season: Season(2019),
            at_bats: 470,
            walks: 110,
            hit_by_pitch: 11,
            sacrifice_flies: 6,
            hits: 137,
            doubles: 27,
            triples: 2,
            home_runs: 45,
            strikeouts: 120,
        }
    }

    #[test]
    fn singles_is_derived() {
        let line = sample_batting();
        assert_eq!(line.singles(), 137 - 27 - 2 - 45);
    }

    #[test]
    fn plate_appearances_sums_components() {
        let line = sample_batting();
        assert_eq!(line.plate_appearances(), 470 + 110 + 11 + 6);
    }

    #[test]
    fn rejects_hits_less_than_extra_base_sum() {
        let mut line = sample_batting();
        line.hits = 10; // fewer than doubles+triples+home_runs
        assert!(line.validate().is_err());
    }

    #[test]
    fn pitching_line_validates() {
        let line = PitchingStatLine {
            player_id: PlayerId::new("kershcl01"),
            season: Season(2015),
            batters_faced: 800,
            hits_allowed: 150,
            extra_base_hits_allowed: Some(ExtraBaseBreakdown {
                doubles: 20,
                triples: 2,
            }),
            home_runs_allowed: 15,
            walks_allowed: 42,
            strikeouts: 300,
            hit_by_pitch_allowed: 5,
        };
        assert!(line.validate().is_ok());
    }

    #[test]
    fn pitching_line_rejects_impossible_breakdown() {
        let line = PitchingStatLine {
            player_id: PlayerId::new("x"),
            season: Season(2000),
            batters_faced: 100,
            hits_allowed: 5,
            extra_base_hits_allowed: Some(ExtraBaseBreakdown {
                doubles: 4,
                triples: 3,
            }),
            home_runs_allowed: 2,
            walks_allowed: 1,
            strikeouts: 1,
            hit_by_pitch_allowed: 0,
        };
        assert!(line.validate().is_err());
    }
}
