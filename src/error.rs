use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Every variant carries enough structured context (field, value, expected
/// range) for an embedder to handle it programmatically rather than by
/// matching on a formatted message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid stat line: {field} was {value}, expected {expected}")]
    InvalidStatLine {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid league baseline for era {era}: {field} was {value}, expected in (0, 1)")]
    InvalidLeagueBaseline {
        era: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("invalid probability input to odds-ratio combiner: {field} was {value}, expected {expected}")]
    InvalidProbabilityInput {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("invalid configuration: {field} was {value}, expected {expected}")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("weighted_choice called with non-positive total weight ({total})")]
    EmptyWeightedChoice { total: f64 },

    #[error("advancement matrix row for {outcome} / {base_state} summed to {sum}, expected 1.0 +/- {epsilon}")]
    InvalidAdvancementMatrix {
        outcome: &'static str,
        base_state: String,
        sum: f64,
        epsilon: f64,
    },
}

pub type SimResult<T> = Result<T, SimError>;
