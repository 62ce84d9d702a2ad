//! # Familiarity-Weighted Sampler
//!
//! Draws words from the notebook so that less familiar words (higher scores) come up
//! more often, while every word keeps a nonzero chance.
//!
//! ## Weighting
//!
//! Each entry's weight is [`WeightCurve::weight`] of its familiarity. Every curve is
//! strictly positive and strictly increasing over 1..=5:
//!
//! | Curve         | Weight       | 1 : 5 ratio |
//! |---------------|--------------|-------------|
//! | `linear`      | `f`          | 1 : 5       |
//! | `quadratic`   | `f²`         | 1 : 25      |
//! | `exponential` | `2^(f-1)`    | 1 : 16      |
//! | `natural`     | `e^f`        | 1 : 54.6    |
//!
//! ## Algorithm
//!
//! Weighted sampling without replacement by exponential keys (Efraimidis & Spirakis):
//! each entry draws `u` uniformly from (0, 1] and gets the key `ln(u) / w`. The `k`
//! largest keys win, returned in descending key order. One pass, one random draw per
//! entry, and the result has the same distribution as repeated draw-and-remove.
//!
//! ## Determinism
//!
//! With a seed, the generator is a `StdRng` seeded from it, so the same notebook (in
//! the same order) and the same seed always give the same sequence. Without one the
//! generator is seeded from the OS.

use crate::error::{Result, VocabError};
use crate::model::{Entry, Familiarity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightCurve {
    #[default]
    Linear,
    Quadratic,
    Exponential,
    Natural,
}

impl WeightCurve {
    pub fn weight(self, familiarity: Familiarity) -> f64 {
        let f = familiarity.value() as f64;
        match self {
            WeightCurve::Linear => f,
            WeightCurve::Quadratic => f * f,
            WeightCurve::Exponential => 2f64.powf(f - 1.0),
            WeightCurve::Natural => f.exp(),
        }
    }
}

impl FromStr for WeightCurve {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(WeightCurve::Linear),
            "quadratic" => Ok(WeightCurve::Quadratic),
            "exponential" => Ok(WeightCurve::Exponential),
            "natural" => Ok(WeightCurve::Natural),
            other => Err(VocabError::Config(format!(
                "Unknown weight curve '{}' (expected linear, quadratic, exponential or natural)",
                other
            ))),
        }
    }
}

impl fmt::Display for WeightCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeightCurve::Linear => "linear",
            WeightCurve::Quadratic => "quadratic",
            WeightCurve::Exponential => "exponential",
            WeightCurve::Natural => "natural",
        };
        f.write_str(name)
    }
}

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    curve: WeightCurve,
}

impl Sampler {
    pub fn new(curve: WeightCurve) -> Self {
        Self { curve }
    }

    /// Draws `k` distinct entries.
    ///
    /// # Errors
    /// - [`VocabError::EmptyNotebook`] when `entries` is empty, whatever `k` is.
    /// - [`VocabError::InsufficientEntries`] when `k` exceeds `entries.len()`.
    pub fn sample<'a>(
        &self,
        entries: &'a [Entry],
        k: usize,
        seed: Option<u64>,
    ) -> Result<Vec<&'a Entry>> {
        let mut rng = make_rng(seed);
        self.sample_with_rng(entries, k, &mut rng)
    }

    pub fn sample_with_rng<'a, R: Rng + ?Sized>(
        &self,
        entries: &'a [Entry],
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<&'a Entry>> {
        let indices = self.sample_indices(entries, k, rng)?;
        Ok(indices.into_iter().map(|i| &entries[i]).collect())
    }

    /// Index form of [`Sampler::sample_with_rng`].
    pub fn sample_indices<R: Rng + ?Sized>(
        &self,
        entries: &[Entry],
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        if entries.is_empty() {
            return Err(VocabError::EmptyNotebook);
        }
        if k > entries.len() {
            return Err(VocabError::InsufficientEntries {
                requested: k,
                available: entries.len(),
            });
        }

        let mut keyed: Vec<(f64, usize)> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                // random() is in [0, 1); flip it so ln never sees zero
                let u: f64 = 1.0 - rng.random::<f64>();
                (u.ln() / self.curve.weight(entry.familiarity), i)
            })
            .collect();

        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(keyed.into_iter().take(k).map(|(_, i)| i).collect())
    }
}
