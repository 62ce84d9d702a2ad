use super::NotebookStore;
use crate::error::{Result, VocabError};
use crate::model::{Memo, Notebook};
use std::path::PathBuf;

/// In-memory notebook store for testing.
///
/// Counts saves so tests can assert that read-only commands never write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notebook: Notebook,
    memos: Vec<Memo>,
    saves: usize,
    simulate_write_error: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notebook(notebook: Notebook) -> Self {
        Self {
            notebook,
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl NotebookStore for MemoryStore {
    fn load(&self) -> Result<Notebook> {
        Ok(self.notebook.clone())
    }

    fn save(&mut self, notebook: &Notebook) -> Result<()> {
        if self.simulate_write_error {
            return Err(VocabError::Store("Simulated write error".to_string()));
        }
        self.notebook = notebook.clone();
        self.saves += 1;
        Ok(())
    }

    fn append_memos(&mut self, memos: &[Memo]) -> Result<()> {
        if self.simulate_write_error {
            return Err(VocabError::Store("Simulated write error".to_string()));
        }
        self.memos.extend_from_slice(memos);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://notebook")
    }
}
