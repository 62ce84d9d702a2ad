//! # Data Model
//!
//! - [`Familiarity`]: a score from 1 (well known) to 5 (unfamiliar).
//! - [`Entry`]: one word record. The `word` is the unique key.
//! - [`Notebook`]: every entry, in insertion order. Loaded whole from the store at the
//!   start of a command and written back whole when the command mutates it.
//! - [`Memo`]: one line of the review log.

use crate::error::{Result, VocabError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How well a word is known. 1 = well known, 5 = unfamiliar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Familiarity(u8);

impl Familiarity {
    pub const MIN: Familiarity = Familiarity(1);
    pub const MAX: Familiarity = Familiarity(5);

    pub fn new(value: i64) -> Result<Self> {
        if (1..=5).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(VocabError::InvalidFamiliarity(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_unfamiliar(self) -> bool {
        self == Self::MAX
    }

    /// Moves the score by `delta`, clamped to the valid range.
    pub fn shifted(self, delta: i8) -> Self {
        let v = (self.0 as i16 + delta as i16).clamp(1, 5);
        Self(v as u8)
    }
}

impl Default for Familiarity {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for Familiarity {
    type Error = VocabError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Familiarity> for i64 {
    fn from(f: Familiarity) -> Self {
        f.0 as i64
    }
}

impl FromStr for Familiarity {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| VocabError::Store(format!("Invalid familiarity: '{}'", trimmed)))?;
        Self::new(value)
    }
}

impl fmt::Display for Familiarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub pronunciation: Option<String>,
    pub familiarity: Familiarity,
}

impl Entry {
    pub fn new(word: impl Into<String>, definition: impl Into<String>, familiarity: Familiarity) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            examples: Vec::new(),
            pronunciation: None,
            familiarity,
        }
    }

    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }
}

/// Whether an upsert created a new entry or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    entries: Vec<Entry>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a notebook from loaded entries, rejecting repeated words.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self> {
        let mut notebook = Self::new();
        for entry in entries {
            notebook.insert(entry)?;
        }
        Ok(notebook)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn words(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.word.as_str()).collect()
    }

    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.position(word).map(|i| &self.entries[i])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.position(word).is_some()
    }

    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        if self.contains(&entry.word) {
            return Err(VocabError::DuplicateWord(entry.word));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Replaces the entry with the same word in place, or appends it.
    pub fn upsert(&mut self, entry: Entry) -> UpsertOutcome {
        match self.position(&entry.word) {
            Some(i) => {
                self.entries[i] = entry;
                UpsertOutcome::Updated
            }
            None => {
                self.entries.push(entry);
                UpsertOutcome::Created
            }
        }
    }

    pub fn remove(&mut self, word: &str) -> Result<Entry> {
        let i = self
            .position(word)
            .ok_or_else(|| VocabError::WordNotFound(word.to_string()))?;
        Ok(self.entries.remove(i))
    }

    pub fn set_familiarity(&mut self, word: &str, familiarity: Familiarity) -> Result<()> {
        let i = self
            .position(word)
            .ok_or_else(|| VocabError::WordNotFound(word.to_string()))?;
        self.entries[i].familiarity = familiarity;
        Ok(())
    }

    fn position(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.word == word)
    }
}

/// One answered review question, as appended to the memo log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub word: String,
    pub date: DateTime<Utc>,
    pub orig_familiarity: Familiarity,
    pub action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fam(v: i64) -> Familiarity {
        Familiarity::new(v).unwrap()
    }

    #[test]
    fn familiarity_rejects_out_of_range() {
        assert!(matches!(
            Familiarity::new(0),
            Err(VocabError::InvalidFamiliarity(0))
        ));
        assert!(matches!(
            Familiarity::new(6),
            Err(VocabError::InvalidFamiliarity(6))
        ));
        assert_eq!(fam(5).value(), 5);
    }

    #[test]
    fn familiarity_parses_trimmed_text() {
        assert_eq!(" 4 ".parse::<Familiarity>().unwrap(), fam(4));
        assert!("four".parse::<Familiarity>().is_err());
    }

    #[test]
    fn familiarity_shift_is_clamped() {
        assert_eq!(fam(1).shifted(-1), fam(1));
        assert_eq!(fam(4).shifted(2), fam(5));
        assert_eq!(fam(3).shifted(-1), fam(2));
    }

    #[test]
    fn insert_rejects_duplicate_word() {
        let mut nb = Notebook::new();
        nb.insert(Entry::new("apple", "a fruit", fam(1))).unwrap();
        let err = nb.insert(Entry::new("apple", "again", fam(2))).unwrap_err();
        assert!(matches!(err, VocabError::DuplicateWord(w) if w == "apple"));
        assert_eq!(nb.len(), 1);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut nb = Notebook::new();
        nb.insert(Entry::new("apple", "a fruit", fam(1))).unwrap();
        nb.insert(Entry::new("pear", "another fruit", fam(2))).unwrap();

        let outcome = nb.upsert(Entry::new("apple", "red fruit", fam(4)));
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(nb.words(), vec!["apple", "pear"]);
        assert_eq!(nb.get("apple").unwrap().definition, "red fruit");

        let outcome = nb.upsert(Entry::new("plum", "stone fruit", fam(3)));
        assert_eq!(outcome, UpsertOutcome::Created);
        assert_eq!(nb.len(), 3);
    }

    #[test]
    fn remove_missing_word_fails() {
        let mut nb = Notebook::new();
        let err = nb.remove("ghost").unwrap_err();
        assert!(matches!(err, VocabError::WordNotFound(w) if w == "ghost"));
    }

    #[test]
    fn from_entries_rejects_repeated_words() {
        let result = Notebook::from_entries(vec![
            Entry::new("a", "", fam(1)),
            Entry::new("a", "", fam(2)),
        ]);
        assert!(matches!(result, Err(VocabError::DuplicateWord(_))));
    }
}
