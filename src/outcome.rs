//! The closed set of plate-appearance outcomes.

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
pub enum AtBatOutcome {
    StrikeoutSwinging,
    StrikeoutLooking,
    Walk,
    HitByPitch,
    SingleOutfield,
    SingleInfield,
    Double,
    Triple,
    HomeRun,
    Groundout,
    Flyout,
    Lineout,
    Popup,
    ReachedOnError,
    GroundIntoDoublePlay,
    SacrificeFly,
}

impl AtBatOutcome {
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            AtBatOutcome::SingleOutfield
                | AtBatOutcome::SingleInfield
                | AtBatOutcome::Double
                | AtBatOutcome::Triple
                | AtBatOutcome::HomeRun
        )
    }

    /// Whether the batter is on base afterward (a hit, a walk, HBP, or
    /// reaching on error — but not a sacrifice fly, which is an out that
    /// happens to score a run).
    pub fn is_on_base(self) -> bool {
        self.is_hit()
            || matches!(
                self,
                AtBatOutcome::Walk | AtBatOutcome::HitByPitch | AtBatOutcome::ReachedOnError
            )
    }

    pub fn is_out(self) -> bool {
        matches!(
            self,
            AtBatOutcome::StrikeoutSwinging
                | AtBatOutcome::StrikeoutLooking
                | AtBatOutcome::Groundout
                | AtBatOutcome::Flyout
                | AtBatOutcome::Lineout
                | AtBatOutcome::Popup
                | AtBatOutcome::GroundIntoDoublePlay
                | AtBatOutcome::SacrificeFly
        )
    }

    pub fn is_strikeout(self) -> bool {
        matches!(
            self,
            AtBatOutcome::StrikeoutSwinging | AtBatOutcome::StrikeoutLooking
        )
    }

    /// Bases gained by the batter on a clean hit or an error; `0` otherwise
    /// (walks and HBP are handled by the force-advancement rules, not a
    /// flat base count).
    pub fn bases_gained(self) -> u8 {
        match self {
            AtBatOutcome::SingleOutfield
            | AtBatOutcome::SingleInfield
            | AtBatOutcome::ReachedOnError => 1,
            AtBatOutcome::Double => 2,
            AtBatOutcome::Triple => 3,
            AtBatOutcome::HomeRun => 4,
            _ => 0,
        }
    }

    /// Outs charged to the defense by this outcome alone, before any
    /// additional outs recorded by runners (e.g. a caught-stealing on the
    /// same play, which this core does not model).
    pub fn out_delta(self) -> u8 {
        match self {
            AtBatOutcome::GroundIntoDoublePlay => 2,
            AtBatOutcome::Walk
            | AtBatOutcome::HitByPitch
            | AtBatOutcome::SingleOutfield
            | AtBatOutcome::SingleInfield
            | AtBatOutcome::Double
            | AtBatOutcome::Triple
            | AtBatOutcome::HomeRun
            | AtBatOutcome::ReachedOnError => 0,
            _ => 1,
        }
    }
}
