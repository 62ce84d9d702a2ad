//! # Command Layer
//!
//! One module per operation. Each `run` loads what it needs from a [`NotebookStore`],
//! does its work and returns a [`CmdResult`]: the entries it touched or produced,
//! plus messages for the UI to render. Nothing here prints.
//!
//! Read-only commands take `&S` and so cannot save.
//!
//! [`NotebookStore`]: crate::store::NotebookStore

use crate::dictionary::Definition;
use crate::model::Entry;

pub mod config;
pub mod delete;
pub mod list;
pub mod query;
pub mod review;
pub mod sample;
pub mod template;
pub mod upsert;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Entries sampled, listed, created, changed or removed.
    pub entries: Vec<Entry>,
    /// Remote dictionary answer, for `query`.
    pub definition: Option<Definition>,
    /// Text meant to be shown verbatim: templates, config dumps.
    pub text: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
