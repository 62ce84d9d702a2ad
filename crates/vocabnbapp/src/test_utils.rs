use crate::dictionary::{parse_response, Definition, DictionaryClient};
use crate::error::{Result, VocabError};
use crate::model::{Entry, Familiarity, Notebook};
use crate::store::memory::MemoryStore;
use crate::store::tsv::TsvStore;
use serde_json::Value;
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    // Held so the directory outlives the test
    _temp_dir: TempDir,
    pub store: TsvStore,
    pub notebook_path: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let notebook_path = temp_dir.path().join("notebook.tsv");
        let store = TsvStore::new(&notebook_path);
        Self {
            _temp_dir: temp_dir,
            store,
            notebook_path,
        }
    }

    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }
}

/// Dictionary answering from canned JSON responses.
#[derive(Default)]
pub struct StaticDictionary {
    responses: HashMap<String, Value>,
    offline: bool,
    fetches: Cell<usize>,
}

impl StaticDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dictionary whose every request fails as if the network were down.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_word(mut self, word: &str, response: Value) -> Self {
        self.responses.insert(word.to_string(), response);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl DictionaryClient for StaticDictionary {
    fn lookup(&self, word: &str) -> Result<Definition> {
        if self.offline {
            return Err(VocabError::DictionaryLookup("network unreachable".into()));
        }
        match self.responses.get(word) {
            Some(body) => parse_response(word, body),
            None => Err(VocabError::WordNotFound(word.to_string())),
        }
    }

    fn fetch_audio(&self, url: &str) -> Result<Vec<u8>> {
        if self.offline {
            return Err(VocabError::DictionaryLookup("network unreachable".into()));
        }
        self.fetches.set(self.fetches.get() + 1);
        let name = url.rsplit('/').next().unwrap_or(url).trim_end_matches(".mp3");
        Ok(format!("mp3:{}", name).into_bytes())
    }
}

/// Notebook of `(word, familiarity)` pairs, each defined as "meaning of <word>".
pub fn notebook_of(words: &[(&str, i64)]) -> Notebook {
    let entries = words
        .iter()
        .map(|(w, f)| {
            let familiarity = Familiarity::new(*f).expect("valid familiarity");
            Entry::new(*w, format!("meaning of {}", w), familiarity)
        })
        .collect();
    Notebook::from_entries(entries).expect("distinct words")
}

pub fn store_of(words: &[(&str, i64)]) -> MemoryStore {
    MemoryStore::with_notebook(notebook_of(words))
}
