//! The data-access seam this core expects an embedder to provide.
//!
//! Loading stat lines, rosters, and park factors from wherever they live
//! (a database, flat files, a web API) is explicitly out of scope for this
//! crate; `StatsRepository` exists only so the rest of the core can be
//! written, and tested, against a trait rather than a concrete store.

use crate::error::SimResult;
use crate::ids::{PlayerId, Season, TeamId};
use crate::stats::{BattingStatLine, PitchingStatLine};

pub trait StatsRepository {
    fn get_batter_season(&self, player_id: &PlayerId, season: Season) -> SimResult<Option<BattingStatLine>>;

    fn get_pitcher_season(&self, player_id: &PlayerId, season: Season) -> SimResult<Option<PitchingStatLine>>;

    fn get_team_roster(&self, team_id: &TeamId, season: Season) -> SimResult<Vec<PlayerId>>;

    /// Centered at 100; see the park-factor scaling in
    /// [`crate::projector::ProbabilityProjector`].
    fn get_team_park_factor(&self, team_id: &TeamId, season: Season) -> SimResult<u16>;
}
