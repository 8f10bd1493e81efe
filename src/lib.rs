#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

mod advancement;
mod base_state;
mod baselines;
mod config;
mod engine;
mod error;
mod ids;
mod odds;
mod outcome;
mod projector;
mod repository;
mod resolver;
mod rng;
mod stats;

pub use crate::advancement::{AdvancementEngine, AdvancementResult};
pub use crate::base_state::BaseState;
pub use crate::baselines::{Era, EventRates, LeagueBaselines};
pub use crate::config::SimulationConfig;
pub use crate::engine::{PlateAppearanceResult, SimulationEngine};
pub use crate::error::{SimError, SimResult};
pub use crate::ids::{PlayerId, Season, TeamId};
pub use crate::odds::{combine, combine_matchup};
pub use crate::outcome::AtBatOutcome;
pub use crate::projector::{ProbabilityProjector, Projection};
pub use crate::repository::StatsRepository;
pub use crate::rng::{DrawKind, DrawRecord, History, RandomSource};
pub use crate::stats::{BattingStatLine, ExtraBaseBreakdown, PitchingStatLine};
