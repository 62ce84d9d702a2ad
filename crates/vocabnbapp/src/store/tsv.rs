use super::{join_examples, split_examples, ColumnLayout, Field, NotebookStore};
use crate::error::{Result, VocabError};
use crate::model::{Entry, Familiarity, Memo, Notebook};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const MEMO_HEADER: [&str; 4] = ["word", "date", "orig_familiarity", "action"];

/// The file as last written, cell for cell. A rewrite starts from these rows so
/// columns outside the layout, and the user's header names, survive.
#[derive(Debug, Default)]
struct RawRows {
    header: Vec<String>,
    rows: HashMap<String, Vec<String>>,
}

pub struct TsvStore {
    path: PathBuf,
    layout: ColumnLayout,
    delimiter: u8,
    memo_path: Option<PathBuf>,
}

impl TsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            layout: ColumnLayout::default(),
            delimiter: b'\t',
            memo_path: None,
        }
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_memo_file(mut self, memo_path: Option<PathBuf>) -> Self {
        self.memo_path = memo_path;
        self
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(VocabError::StoreIo)?;
            }
        }
        Ok(())
    }

    fn cell<'r>(&self, record: &'r StringRecord, field: Field, line: u64) -> Result<&'r str> {
        let col = self.layout.column(field).unwrap_or(usize::MAX);
        record.get(col).ok_or_else(|| {
            VocabError::Store(format!(
                "{}: line {}: missing {} column",
                self.path.display(),
                line,
                field.header()
            ))
        })
    }

    fn parse_record(&self, record: &StringRecord, line: u64) -> Result<Entry> {
        let cell = |field: Field| self.cell(record, field, line);

        let word = cell(Field::Word)?.trim();
        if word.is_empty() {
            return Err(VocabError::Store(format!(
                "{}: line {}: empty word",
                self.path.display(),
                line
            )));
        }

        let familiarity: Familiarity = cell(Field::Familiarity)?.parse().map_err(|e| {
            VocabError::Store(format!("{}: line {}: {}", self.path.display(), line, e))
        })?;

        // An absent pronunciation column reads as no pronunciation
        let pronunciation = self
            .layout
            .column(Field::Pronunciation)
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(Entry {
            word: word.to_string(),
            definition: cell(Field::Meaning)?.to_string(),
            examples: split_examples(cell(Field::Examples)?),
            pronunciation,
            familiarity,
        })
    }

    fn read_raw(&self) -> Result<RawRows> {
        if !self.path.exists() {
            return Ok(RawRows::default());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let header = reader.headers()?.iter().map(str::to_string).collect();
        let word_col = self.layout.column(Field::Word).unwrap_or(usize::MAX);
        let mut rows = HashMap::new();
        for result in reader.records() {
            let record = result?;
            if let Some(word) = record.get(word_col).map(str::trim) {
                rows.insert(word.to_string(), record.iter().map(str::to_string).collect());
            }
        }
        Ok(RawRows { header, rows })
    }

    /// The existing header, widened to the layout, with blank mapped cells named.
    fn header_row(&self, existing: Vec<String>) -> Vec<String> {
        let mut header = existing;
        let defaults = self.layout.header_row();
        if header.len() < defaults.len() {
            header.resize(defaults.len(), String::new());
        }
        for (cell, name) in header.iter_mut().zip(defaults) {
            if cell.trim().is_empty() {
                *cell = name.to_string();
            }
        }
        header
    }

    /// Overwrites the cells the layout owns in `base`; every other cell is kept.
    fn entry_row(&self, entry: &Entry, base: Option<Vec<String>>, width: usize) -> Vec<String> {
        let mut row = base.unwrap_or_default();
        if row.len() < width {
            row.resize(width, String::new());
        }
        let mut put = |field: Field, value: String| {
            if let Some(col) = self.layout.column(field) {
                row[col] = value;
            }
        };
        put(Field::Familiarity, entry.familiarity.to_string());
        put(Field::Word, entry.word.clone());
        put(Field::Meaning, entry.definition.clone());
        put(Field::Examples, join_examples(&entry.examples));
        put(
            Field::Pronunciation,
            entry.pronunciation.clone().unwrap_or_default(),
        );
        row
    }
}

impl NotebookStore for TsvStore {
    fn load(&self) -> Result<Notebook> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "notebook file missing, starting empty");
            return Ok(Notebook::new());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut entries = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            entries.push(self.parse_record(&record, line)?);
        }

        debug!(path = %self.path.display(), count = entries.len(), "loaded notebook");
        Notebook::from_entries(entries).map_err(|e| match e {
            VocabError::DuplicateWord(w) => VocabError::Store(format!(
                "{}: word '{}' appears more than once",
                self.path.display(),
                w
            )),
            other => other,
        })
    }

    fn save(&mut self, notebook: &Notebook) -> Result<()> {
        self.ensure_parent(&self.path)?;
        let RawRows { header, mut rows } = self.read_raw()?;
        let header = self.header_row(header);

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp_path = dir.join(format!(".notebook-{}.tmp", Uuid::new_v4()));

        let mut write = || -> Result<()> {
            let mut writer = WriterBuilder::new()
                .delimiter(self.delimiter)
                .from_path(&tmp_path)?;
            writer.write_record(&header)?;
            for entry in notebook.iter() {
                let base = rows.remove(&entry.word);
                writer.write_record(self.entry_row(entry, base, header.len()))?;
            }
            writer.flush().map_err(VocabError::StoreIo)?;
            Ok(())
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        fs::rename(&tmp_path, &self.path).map_err(VocabError::StoreIo)?;

        debug!(path = %self.path.display(), count = notebook.len(), "saved notebook");
        Ok(())
    }

    fn append_memos(&mut self, memos: &[Memo]) -> Result<()> {
        let Some(memo_path) = self.memo_path.clone() else {
            return Ok(());
        };
        if memos.is_empty() {
            return Ok(());
        }
        self.ensure_parent(&memo_path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&memo_path)
            .map_err(VocabError::StoreIo)?;
        let is_new = file.metadata().map_err(VocabError::StoreIo)?.len() == 0;

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(file);
        if is_new {
            writer.write_record(MEMO_HEADER)?;
        }
        for memo in memos {
            writer.write_record([
                memo.word.clone(),
                memo.date.to_rfc3339(),
                memo.orig_familiarity.to_string(),
                memo.action.clone(),
            ])?;
        }
        writer.flush().map_err(VocabError::StoreIo)?;

        debug!(path = %memo_path.display(), count = memos.len(), "appended memos");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
