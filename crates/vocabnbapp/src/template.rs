//! The structured text an entry is written in before an upsert.
//!
//! It is a small TOML document:
//!
//! ```toml
//! # vocabnb entry: apple
//! # familiarity: 1 (well known) .. 5 (unfamiliar)
//! familiarity = 3
//! definition = "a round fruit"
//! examples = ["an apple a day"]
//! pronunciation = "ˈa-pəl"
//! ```
//!
//! Everything but `definition` may be left out. A missing `familiarity` keeps the
//! current score on update and uses the configured default on create.

use crate::error::{Result, VocabError};
use crate::model::{Entry, Familiarity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntryTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub familiarity: Option<i64>,
    pub definition: String,
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
}

impl EntryTemplate {
    /// A blank template suggesting `familiarity`.
    pub fn blank(familiarity: Familiarity) -> Self {
        Self {
            familiarity: Some(familiarity.into()),
            ..Self::default()
        }
    }

    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            familiarity: Some(entry.familiarity.into()),
            definition: entry.definition.clone(),
            examples: entry.examples.clone(),
            pronunciation: entry.pronunciation.clone(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| VocabError::Template(e.to_string()))
    }

    pub fn render(&self, word: Option<&str>) -> Result<String> {
        let body = toml::to_string(self).map_err(|e| VocabError::Template(e.to_string()))?;
        let mut out = String::new();
        if let Some(word) = word {
            out.push_str(&format!("# vocabnb entry: {}\n", word));
        }
        out.push_str("# familiarity: 1 (well known) .. 5 (unfamiliar)\n");
        out.push_str("# examples: a list of sentences, pronunciation: optional\n");
        out.push_str(&body);
        Ok(out)
    }

    /// Builds the entry for `word`, using `fallback` when no familiarity was given.
    pub fn into_entry(self, word: &str, fallback: Familiarity) -> Result<Entry> {
        let word = word.trim();
        if word.is_empty() {
            return Err(VocabError::Template("Word cannot be empty".into()));
        }
        let definition = self.definition.trim().to_string();
        if definition.is_empty() {
            return Err(VocabError::Template("Definition cannot be empty".into()));
        }
        let familiarity = match self.familiarity {
            Some(v) => Familiarity::new(v)?,
            None => fallback,
        };
        let examples = self
            .examples
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        let pronunciation = self
            .pronunciation
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Entry {
            word: word.to_string(),
            definition,
            examples,
            pronunciation,
            familiarity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fam(v: i64) -> Familiarity {
        Familiarity::new(v).unwrap()
    }

    #[test]
    fn parses_full_template() {
        let t = EntryTemplate::parse(
            "# comment\nfamiliarity = 4\ndefinition = \"quick\"\nexamples = [\"brisk walk\", \"\"]\npronunciation = \"brisk\"\n",
        )
        .unwrap();
        let entry = t.into_entry("brisk", fam(3)).unwrap();
        assert_eq!(entry.familiarity, fam(4));
        assert_eq!(entry.examples, vec!["brisk walk"]);
        assert_eq!(entry.pronunciation.as_deref(), Some("brisk"));
    }

    #[test]
    fn missing_familiarity_uses_fallback() {
        let t = EntryTemplate::parse("definition = \"quick\"").unwrap();
        let entry = t.into_entry("brisk", fam(2)).unwrap();
        assert_eq!(entry.familiarity, fam(2));
        assert!(entry.examples.is_empty());
    }

    #[test]
    fn rejects_empty_definition_and_bad_familiarity() {
        let empty = EntryTemplate::parse("definition = \"  \"").unwrap();
        assert!(matches!(
            empty.into_entry("w", fam(3)),
            Err(VocabError::Template(_))
        ));

        let bad = EntryTemplate::parse("familiarity = 7\ndefinition = \"x\"").unwrap();
        assert!(matches!(
            bad.into_entry("w", fam(3)),
            Err(VocabError::InvalidFamiliarity(7))
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            EntryTemplate::parse("definition = \"x\"\nmeaning = \"y\""),
            Err(VocabError::Template(_))
        ));
    }

    #[test]
    fn rendered_template_parses_back() {
        let entry = Entry::new("apple", "a \"round\" fruit", fam(1))
            .with_examples(vec!["an apple a day".into()]);
        let text = EntryTemplate::from_entry(&entry).render(Some("apple")).unwrap();
        assert!(text.starts_with("# vocabnb entry: apple\n"));

        let parsed = EntryTemplate::parse(&text).unwrap();
        assert_eq!(parsed.into_entry("apple", fam(3)).unwrap(), entry);
    }

    #[test]
    fn blank_template_suggests_familiarity() {
        let text = EntryTemplate::blank(fam(3)).render(None).unwrap();
        assert!(text.contains("familiarity = 3"));
        assert!(text.contains("definition = \"\""));
    }
}
