use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("The notebook is empty")]
    EmptyNotebook,

    #[error("Cannot sample {requested} words from a notebook of {available}")]
    InsufficientEntries { requested: usize, available: usize },

    #[error("Word already in notebook: {0}")]
    DuplicateWord(String),

    #[error("Word not found: {0}")]
    WordNotFound(String),

    #[error("Familiarity must be between 1 and 5, got {0}")]
    InvalidFamiliarity(i64),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    StoreIo(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Dictionary lookup failed: {0}")]
    DictionaryLookup(String),

    #[error("Audio playback failed: {0}")]
    AudioPlayback(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<confique::Error> for VocabError {
    fn from(err: confique::Error) -> Self {
        VocabError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for VocabError {
    fn from(err: reqwest::Error) -> Self {
        VocabError::DictionaryLookup(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VocabError>;
