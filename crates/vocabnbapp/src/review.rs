//! # Review Sessions
//!
//! A review session quizzes the user on a batch of words and lets them re-score each
//! one. This module holds the pure parts: picking the batch and interpreting answers.
//! Prompting lives in the CLI; persisting lives in [`crate::commands::review`].
//!
//! ## Picking the batch
//!
//! - Every familiarity-5 word is always included.
//! - On top of those, `min(N - N5, max(total - N5, min_non5))` other words are drawn
//!   with the weighted [`Sampler`].
//! - The combined batch is shuffled.
//!
//! So `min_non5` guarantees some already-known words come back even when the
//! unfamiliar ones alone exceed `total`.
//!
//! ## Answers
//!
//! | Input | Effect                 |
//! |-------|------------------------|
//! | `.`   | keep the score         |
//! | `-`   | subtract 1 (floor 1)   |
//! | `=`   | add 2 (cap 5)          |
//! | `+`   | set to 5               |
//! | `1-5` | set to that value      |

use crate::error::{Result, VocabError};
use crate::model::{Entry, Familiarity};
use crate::sampler::Sampler;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

pub const ACCEPTED_ACTIONS: &str = ".-=+12345";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamiliarityAction {
    Keep,
    Decrease,
    Bump,
    Max,
    Set(Familiarity),
}

impl FamiliarityAction {
    pub fn apply(self, current: Familiarity) -> Familiarity {
        match self {
            FamiliarityAction::Keep => current,
            FamiliarityAction::Decrease => current.shifted(-1),
            FamiliarityAction::Bump => current.shifted(2),
            FamiliarityAction::Max => Familiarity::MAX,
            FamiliarityAction::Set(f) => f,
        }
    }
}

impl FromStr for FamiliarityAction {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "." => Ok(FamiliarityAction::Keep),
            "-" => Ok(FamiliarityAction::Decrease),
            "=" => Ok(FamiliarityAction::Bump),
            "+" => Ok(FamiliarityAction::Max),
            other => other
                .parse::<i64>()
                .ok()
                .and_then(|v| Familiarity::new(v).ok())
                .map(FamiliarityAction::Set)
                .ok_or_else(|| {
                    VocabError::Api(format!(
                        "Unknown answer '{}', expected one of {}",
                        other, ACCEPTED_ACTIONS
                    ))
                }),
        }
    }
}

impl fmt::Display for FamiliarityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamiliarityAction::Keep => f.write_str("."),
            FamiliarityAction::Decrease => f.write_str("-"),
            FamiliarityAction::Bump => f.write_str("="),
            FamiliarityAction::Max => f.write_str("+"),
            FamiliarityAction::Set(v) => write!(f, "{}", v),
        }
    }
}

/// One answered question of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAnswer {
    pub word: String,
    pub before: Familiarity,
    pub action: FamiliarityAction,
}

impl ReviewAnswer {
    pub fn new(word: impl Into<String>, before: Familiarity, action: FamiliarityAction) -> Self {
        Self {
            word: word.into(),
            before,
            action,
        }
    }

    pub fn after(&self) -> Familiarity {
        self.action.apply(self.before)
    }

    /// Familiar when the word ends at 1 or the user lowered its score.
    pub fn is_familiar(&self) -> bool {
        let after = self.after();
        after == Familiarity::MIN || after < self.before
    }
}

/// Number of non-5 words a session draws, per the rule in the module docs.
pub fn non5_quota(total_words: usize, n5: usize, total: usize, min_non5: usize) -> usize {
    let available = total_words - n5;
    available.min(total.saturating_sub(n5).max(min_non5))
}

/// Picks the words for a session, returned as indices into `entries`.
pub fn plan_review<R: Rng + ?Sized>(
    entries: &[Entry],
    total: usize,
    min_non5: usize,
    sampler: &Sampler,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if entries.is_empty() {
        return Err(VocabError::EmptyNotebook);
    }

    let (unfamiliar, rest): (Vec<usize>, Vec<usize>) =
        (0..entries.len()).partition(|&i| entries[i].familiarity.is_unfamiliar());

    let quota = non5_quota(entries.len(), unfamiliar.len(), total, min_non5);
    let mut plan = unfamiliar;
    if quota > 0 {
        let pool: Vec<Entry> = rest.iter().map(|&i| entries[i].clone()).collect();
        let drawn = sampler.sample_indices(&pool, quota, rng)?;
        plan.extend(drawn.into_iter().map(|j| rest[j]));
    }

    plan.shuffle(rng);
    Ok(plan)
}
