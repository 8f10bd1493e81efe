//! Configuration recognized by the core (see spec §6).
//!
//! The core never reads configuration from disk itself; an embedder loads
//! it (TOML, JSON, whatever) and passes a validated [`SimulationConfig`] to
//! [`crate::engine::SimulationEngine::new`].

use crate::error::{SimError, SimResult};

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SimulationConfig {
    /// Seeds the `RandomSource`. `None` means system entropy.
    pub seed: Option<u64>,
    /// Centered at 100 (neutral); applied at half strength to hit events.
    pub park_factor: u16,
    /// Below this plate-appearance count, league baseline is substituted
    /// for a stat line's direct rates.
    pub min_plate_appearances_for_direct_rates: u32,
    pub strikeout_swinging_share: f64,
    pub infield_single_share: f64,
    /// Groundout, flyout, lineout, popup — must sum to 1.
    pub out_type_distribution: [f64; 4],
    pub error_rate_on_in_play_out: f64,
    pub gidp_rate_on_groundout_when_eligible: f64,
    pub sac_fly_rate_on_flyout_when_eligible: f64,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            seed: None,
            park_factor: 100,
            min_plate_appearances_for_direct_rates: 50,
            strikeout_swinging_share: 0.70,
            infield_single_share: 0.15,
            out_type_distribution: [0.44, 0.28, 0.21, 0.07],
            error_rate_on_in_play_out: 0.02,
            gidp_rate_on_groundout_when_eligible: 0.15,
            sac_fly_rate_on_flyout_when_eligible: 0.20,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> SimResult<()> {
        if !(50..=150).contains(&self.park_factor) {
            return Err(SimError::InvalidConfiguration {
                field: "park_factor",
                value: self.park_factor.to_string(),
                expected: "in 50..=150",
            });
        }
        for (field, value) in [
            ("strikeout_swinging_share", self.strikeout_swinging_share),
            ("infield_single_share", self.infield_single_share),
            ("error_rate_on_in_play_out", self.error_rate_on_in_play_out),
            (
                "gidp_rate_on_groundout_when_eligible",
                self.gidp_rate_on_groundout_when_eligible,
            ),
            (
                "sac_fly_rate_on_flyout_when_eligible",
                self.sac_fly_rate_on_flyout_when_eligible,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfiguration {
                    field,
                    value: value.to_string(),
                    expected: "in [0, 1]",
                });
            }
        }
        let out_type_sum: f64 = self.out_type_distribution.iter().sum();
        if (out_type_sum - 1.0).abs() > 1e-9 {
            return Err(SimError::InvalidConfiguration {
                field: "out_type_distribution",
                value: out_type_sum.to_string(),
                expected: "four probabilities summing to 1",
            });
        }
        if self.out_type_distribution.iter().any(|p| *p < 0.0) {
            return Err(SimError::InvalidConfiguration {
                field: "out_type_distribution",
                value: format!("{:?}", self.out_type_distribution),
                expected: "all components non-negative",
            });
        }
        Ok(())
    }
}
