//! # Storage Layer
//!
//! The [`NotebookStore`] trait hides where the notebook lives. Commands load the whole
//! notebook, change it in memory and hand it back for a full rewrite.
//!
//! ## Implementations
//!
//! - [`tsv::TsvStore`]: the production store, a flat delimited text file.
//! - [`memory::MemoryStore`]: in-memory store for testing logic without filesystem I/O.
//!
//! ## File Format
//!
//! ```text
//! familiarity	word	meaning	examples	pronunciation
//! 3	apple	a round fruit	an apple a day // apple pie	ˈa-pəl
//! 5	xylophone	a percussion instrument
//! ```
//!
//! - UTF-8, one record per line, first line is a header.
//! - The delimiter is configurable (TAB by default).
//! - Which column holds which field is given by a [`ColumnLayout`].
//! - Multiple examples share one cell, separated by ` // `.
//! - Columns the layout does not map are carried through rewrites untouched, as is
//!   the header line. New rows leave them blank.
//!
//! ## Write Discipline
//!
//! Saves are atomic: the new content goes to a temporary file in the same directory,
//! which is then renamed over the notebook. A reader never sees a half-written file.
//! Stores are only written by mutating commands; reads never touch the file.

use crate::error::{Result, VocabError};
use crate::model::{Memo, Notebook};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub mod memory;
pub mod tsv;

pub const DEFAULT_COLUMNS: &str = "0,F:1,W:2,M:3,E:4,P";
pub const EXAMPLE_SEPARATOR: &str = " // ";

/// Abstract interface for notebook persistence.
pub trait NotebookStore {
    /// Load every entry. A store that does not exist yet yields an empty notebook.
    fn load(&self) -> Result<Notebook>;

    /// Replace the stored notebook with `notebook`, atomically.
    fn save(&mut self, notebook: &Notebook) -> Result<()>;

    /// Append review memos to the memo log, if the store keeps one.
    fn append_memos(&mut self, memos: &[Memo]) -> Result<()>;

    /// Human-readable location, named in the messages of mutating commands.
    fn location(&self) -> PathBuf;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Familiarity,
    Word,
    Meaning,
    Examples,
    Pronunciation,
}

impl Field {
    fn from_code(code: &str) -> Option<Field> {
        match code {
            "F" => Some(Field::Familiarity),
            "W" => Some(Field::Word),
            "M" => Some(Field::Meaning),
            "E" => Some(Field::Examples),
            "P" => Some(Field::Pronunciation),
            _ => None,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Field::Familiarity => "F",
            Field::Word => "W",
            Field::Meaning => "M",
            Field::Examples => "E",
            Field::Pronunciation => "P",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Field::Familiarity => "familiarity",
            Field::Word => "word",
            Field::Meaning => "meaning",
            Field::Examples => "examples",
            Field::Pronunciation => "pronunciation",
        }
    }
}

/// Maps fields to 0-based column ids.
///
/// Written as `COL_ID,FIELD` pairs joined by `:`, e.g. `"0,F:1,W:2,M:4,E"`.
/// F, W, M and E are required; P (pronunciation) is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    familiarity: usize,
    word: usize,
    meaning: usize,
    examples: usize,
    pronunciation: Option<usize>,
}

impl ColumnLayout {
    pub fn column(&self, field: Field) -> Option<usize> {
        match field {
            Field::Familiarity => Some(self.familiarity),
            Field::Word => Some(self.word),
            Field::Meaning => Some(self.meaning),
            Field::Examples => Some(self.examples),
            Field::Pronunciation => self.pronunciation,
        }
    }

    /// Number of columns a written row spans.
    pub fn width(&self) -> usize {
        [
            Some(self.familiarity),
            Some(self.word),
            Some(self.meaning),
            Some(self.examples),
            self.pronunciation,
        ]
        .into_iter()
        .flatten()
        .max()
        .map(|m| m + 1)
        .unwrap_or(0)
    }

    /// Header row, blank for columns no field maps to.
    pub fn header_row(&self) -> Vec<&'static str> {
        let mut row = vec![""; self.width()];
        for field in [
            Field::Familiarity,
            Field::Word,
            Field::Meaning,
            Field::Examples,
            Field::Pronunciation,
        ] {
            if let Some(col) = self.column(field) {
                row[col] = field.header();
            }
        }
        row
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            familiarity: 0,
            word: 1,
            meaning: 2,
            examples: 3,
            pronunciation: Some(4),
        }
    }
}

impl FromStr for ColumnLayout {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        let mut assigned: Vec<(Field, usize)> = Vec::new();

        for token in s.split(':').map(str::trim).filter(|t| !t.is_empty()) {
            let (id, code) = token.split_once(',').ok_or_else(|| {
                VocabError::Config(format!("Invalid column spec '{}', expected ID,FIELD", token))
            })?;
            let col: usize = id
                .trim()
                .parse()
                .map_err(|_| VocabError::Config(format!("Invalid column id '{}'", id.trim())))?;
            let field = Field::from_code(code.trim()).ok_or_else(|| {
                VocabError::Config(format!(
                    "Unknown column field '{}' (expected F, W, M, E or P)",
                    code.trim()
                ))
            })?;
            if assigned.iter().any(|(f, _)| *f == field) {
                return Err(VocabError::Config(format!(
                    "Field {} specified twice",
                    field.code()
                )));
            }
            if assigned.iter().any(|(_, c)| *c == col) {
                return Err(VocabError::Config(format!(
                    "Column {} assigned to two fields",
                    col
                )));
            }
            assigned.push((field, col));
        }

        let find = |field: Field| assigned.iter().find(|(f, _)| *f == field).map(|(_, c)| *c);
        let required = |field: Field| {
            find(field).ok_or_else(|| {
                VocabError::Config(format!(
                    "Column layout must specify all of F, W, M, E (missing {})",
                    field.code()
                ))
            })
        };

        Ok(Self {
            familiarity: required(Field::Familiarity)?,
            word: required(Field::Word)?,
            meaning: required(Field::Meaning)?,
            examples: required(Field::Examples)?,
            pronunciation: find(Field::Pronunciation),
        })
    }
}

impl fmt::Display for ColumnLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs = vec![
            (self.familiarity, Field::Familiarity),
            (self.word, Field::Word),
            (self.meaning, Field::Meaning),
            (self.examples, Field::Examples),
        ];
        if let Some(p) = self.pronunciation {
            pairs.push((p, Field::Pronunciation));
        }
        pairs.sort_by_key(|(c, _)| *c);
        let parts: Vec<String> = pairs
            .iter()
            .map(|(c, field)| format!("{},{}", c, field.code()))
            .collect();
        f.write_str(&parts.join(":"))
    }
}

/// Splits an examples cell into its non-empty pieces.
pub fn split_examples(cell: &str) -> Vec<String> {
    cell.split("//")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_examples(examples: &[String]) -> String {
    examples.join(EXAMPLE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_layout() {
        let layout: ColumnLayout = DEFAULT_COLUMNS.parse().unwrap();
        assert_eq!(layout, ColumnLayout::default());
        assert_eq!(layout.to_string(), DEFAULT_COLUMNS);
    }

    #[test]
    fn parses_sparse_layout_without_pronunciation() {
        let layout: ColumnLayout = "0,F:1,W:2,M:4,E".parse().unwrap();
        assert_eq!(layout.column(Field::Examples), Some(4));
        assert_eq!(layout.column(Field::Pronunciation), None);
        assert_eq!(layout.width(), 5);
        assert_eq!(
            layout.header_row(),
            vec!["familiarity", "word", "meaning", "", "examples"]
        );
    }

    #[test]
    fn rejects_incomplete_layout() {
        let err = "0,F:1,W:2,M".parse::<ColumnLayout>().unwrap_err();
        assert!(matches!(err, VocabError::Config(msg) if msg.contains("missing E")));
    }

    #[test]
    fn rejects_unknown_and_repeated_fields() {
        assert!("0,F:1,W:2,M:3,E:4,X".parse::<ColumnLayout>().is_err());
        assert!("0,F:1,W:2,M:3,E:4,F".parse::<ColumnLayout>().is_err());
        assert!("0,F:0,W:2,M:3,E".parse::<ColumnLayout>().is_err());
        assert!("a,F:1,W:2,M:3,E".parse::<ColumnLayout>().is_err());
    }

    #[test]
    fn examples_split_drops_empty_pieces() {
        assert_eq!(
            split_examples(" one //two// // three "),
            vec!["one", "two", "three"]
        );
        assert!(split_examples("").is_empty());
        assert_eq!(
            join_examples(&["a".to_string(), "b".to_string()]),
            "a // b"
        );
    }
}
