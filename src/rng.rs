//! Seeded, auditable pseudo-random source.
//!
//! The pinned algorithm is xorshift128+ (also what V8/Node.js use for
//! `Math.random()`). The two 64-bit words of xorshift state are derived from
//! a single `u64` seed via SplitMix64, so callers only need to remember one
//! number to reproduce a run bit-for-bit, on any platform, forever, as long
//! as nobody changes this file.
//!
//! Every draw — `uniform` or `weighted_choice` — appends one entry to an
//! append-only history so a game can be replayed and audited afterward.

use std::num::Wrapping;

use crate::error::{SimError, SimResult};

/// One recorded draw from a [`RandomSource`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DrawRecord {
    pub kind: DrawKind,
    pub value: f64,
    pub context: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum DrawKind {
    Uniform,
    WeightedChoice { weights: Vec<f64> },
}

/// Append-only record of every draw made by a [`RandomSource`].
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct History(Vec<DrawRecord>);

impl History {
    pub fn as_slice(&self) -> &[DrawRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entries appended since `start`, for packaging into a
    /// `PlateAppearanceResult`'s audit slice.
    pub fn since(&self, start: usize) -> &[DrawRecord] {
        &self.0[start.min(self.0.len())..]
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RandomSource {
    seed: u64,
    state: [Wrapping<u64>; 2],
    history: History,
}

impl RandomSource {
    /// Seed from system entropy. Not reproducible across runs; prefer
    /// [`RandomSource::seeded`] whenever replay matters.
    pub fn from_entropy() -> RandomSource {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf).expect("failed to get random seed");
        RandomSource::seeded(u64::from_le_bytes(buf))
    }

    pub fn seeded(seed: u64) -> RandomSource {
        RandomSource {
            seed,
            state: expand_seed(seed),
            history: History::default(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restore to the initial seed (or a new one) and clear history.
    pub fn reset(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or(self.seed);
        self.seed = seed;
        self.state = expand_seed(seed);
        self.history = History::default();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The current length of history, for marking the start of a slice that
    /// will be packaged into a result later.
    pub fn mark(&self) -> usize {
        self.history.len()
    }

    /// Draw in `[0, 1)`. Never fails.
    pub fn uniform(&mut self) -> f64 {
        self.uniform_with_context(None)
    }

    pub fn uniform_with_context(&mut self, context: Option<&str>) -> f64 {
        let value = self.next_f64();
        self.history.0.push(DrawRecord {
            kind: DrawKind::Uniform,
            value,
            context: context.map(str::to_string),
        });
        value
    }

    /// Weighted choice among `options` using `weights` (same length).
    /// Normalizes `weights` internally via inverse-CDF sampling without
    /// mutating the caller's input; fails if the weights do not sum to a
    /// positive number or contain a negative entry.
    pub fn weighted_choice<T: Clone>(&mut self, options: &[T], weights: &[f64]) -> SimResult<T> {
        self.weighted_choice_with_context(options, weights, None)
    }

    pub fn weighted_choice_with_context<T: Clone>(
        &mut self,
        options: &[T],
        weights: &[f64],
        context: Option<&str>,
    ) -> SimResult<T> {
        assert_eq!(
            options.len(),
            weights.len(),
            "options and weights must have the same length"
        );
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || weights.iter().any(|w| *w < 0.0) {
            return Err(SimError::EmptyWeightedChoice { total });
        }

        let draw = self.next_f64();
        self.history.0.push(DrawRecord {
            kind: DrawKind::WeightedChoice {
                weights: weights.to_vec(),
            },
            value: draw,
            context: context.map(str::to_string),
        });

        // Inverse-CDF: walk the (unnormalized) cumulative weight and find
        // the first bucket the scaled draw falls into.
        let target = draw * total;
        let mut cumulative = 0.0;
        for (option, weight) in options.iter().zip(weights) {
            cumulative += weight;
            if target < cumulative {
                return Ok(option.clone());
            }
        }
        // Rounding can land `target` exactly on `total`; fall back to the
        // last option rather than panicking.
        Ok(options[options.len() - 1].clone())
    }

    fn next_f64(&mut self) -> f64 {
        let bits = next_u64(&mut self.state);
        f64::from_bits((bits >> 12) | 0x3ff0_0000_0000_0000) - 1.0
    }
}

impl Default for RandomSource {
    fn default() -> RandomSource {
        RandomSource::from_entropy()
    }
}

fn expand_seed(seed: u64) -> [Wrapping<u64>; 2] {
    let mut sm = seed;
    let s0 = splitmix64(&mut sm);
    let s1 = splitmix64(&mut sm);
    [Wrapping(s0), Wrapping(s1)]
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn next_u64(state: &mut [Wrapping<u64>; 2]) -> u64 {
    let [mut s1, s0] = *state;
    state[0] = s0;
    s1 ^= s1 << 23;
    s1 ^= s1 >> 17;
    s1 ^= s0;
    s1 ^= s0 >> 26;
    *state = [state[1], s1];
    (s0 + state[1]).0
}
