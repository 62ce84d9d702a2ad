//! # Configuration
//!
//! Configuration is managed by [`confique`], which layers a TOML file, environment
//! variables and compiled defaults into a [`VocabConfig`].
//!
//! ## Storage Hierarchy
//!
//! Values are resolved in priority order:
//! 1. **Command-line flags**: applied by the binary on top of [`Settings`].
//! 2. **Environment variables**: `VOCABNB_NOTEBOOK`, `VOCABNB_SAMPLE_COUNT`, etc.
//! 3. **Config file**: `--config FILE`, or `~/.config/vocabnb/config.toml`.
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! A missing default config file is not an error. A missing `--config` file is.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `notebook` | `<data dir>/vocabnb/notebook.tsv` | The notebook file |
//! | `columns` | `0,F:1,W:2,M:3,E:4,P` | Column layout of the notebook |
//! | `delimiter` | TAB | Field delimiter, one character |
//! | `default_familiarity` | `3` | Score given to new words |
//! | `memo_file` | none | Review log, disabled when unset |
//! | `sample.count` | `5` | Words drawn by `sample` |
//! | `sample.curve` | `linear` | Weight curve of the sampler |
//! | `review.total` | `20` | Words per review session |
//! | `review.min_non5` | `5` | Minimum already-known words per session |
//! | `dictionary.api_key` | none | Merriam-Webster key, lookups disabled when unset |
//! | `dictionary.cache_dir` | `<cache dir>/vocabnb` | Downloaded pronunciations |
//! | `dictionary.timeout_secs` | `10` | HTTP timeout |
//! | `audio.player` | `auto` | `auto`, `none`, or a program name |

use crate::error::{Result, VocabError};
use crate::model::Familiarity;
use crate::sampler::WeightCurve;
use crate::store::ColumnLayout;
use confique::Config;
use directories::BaseDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "vocabnb";

#[derive(Config, Serialize, Debug, Clone)]
pub struct VocabConfig {
    /// Path of the notebook file.
    #[config(env = "VOCABNB_NOTEBOOK")]
    pub notebook: Option<PathBuf>,

    /// Column layout as COL_ID,FIELD pairs. Fields: F familiarity, W word,
    /// M meaning, E examples, P pronunciation (optional).
    #[config(env = "VOCABNB_COLUMNS", default = "0,F:1,W:2,M:3,E:4,P")]
    pub columns: String,

    /// Field delimiter of the notebook file.
    #[config(env = "VOCABNB_DELIMITER", default = "\t")]
    pub delimiter: String,

    /// Familiarity given to words added without one (1-5).
    #[config(env = "VOCABNB_DEFAULT_FAMILIARITY", default = 3)]
    pub default_familiarity: i64,

    /// Where review answers are logged. No log is kept when unset.
    #[config(env = "VOCABNB_MEMO_FILE")]
    pub memo_file: Option<PathBuf>,

    #[config(nested)]
    pub sample: SampleConfig,

    #[config(nested)]
    pub review: ReviewConfig,

    #[config(nested)]
    pub dictionary: DictionaryConfig,

    #[config(nested)]
    pub audio: AudioConfig,
}

#[derive(Config, Serialize, Debug, Clone)]
pub struct SampleConfig {
    /// Number of words drawn by `sample`.
    #[config(env = "VOCABNB_SAMPLE_COUNT", default = 5)]
    pub count: usize,

    /// Weight curve: linear, quadratic, exponential or natural.
    #[config(env = "VOCABNB_SAMPLE_CURVE", default = "linear")]
    pub curve: WeightCurve,
}

#[derive(Config, Serialize, Debug, Clone)]
pub struct ReviewConfig {
    /// Total number of words in a review session.
    #[config(env = "VOCABNB_REVIEW_TOTAL", default = 20)]
    pub total: usize,

    /// Minimum number of words below familiarity 5 in a session.
    #[config(env = "VOCABNB_REVIEW_MIN_NON5", default = 5)]
    pub min_non5: usize,
}

#[derive(Config, Serialize, Debug, Clone)]
pub struct DictionaryConfig {
    /// Merriam-Webster collegiate dictionary API key.
    #[config(env = "VOCABNB_MWAPI")]
    pub api_key: Option<String>,

    /// Directory for downloaded pronunciations.
    #[config(env = "VOCABNB_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Timeout of dictionary requests, in seconds.
    #[config(env = "VOCABNB_TIMEOUT_SECS", default = 10)]
    pub timeout_secs: u64,
}

#[derive(Config, Serialize, Debug, Clone)]
pub struct AudioConfig {
    /// "auto" probes for a player, "none" disables audio, anything else is
    /// run as `<player> <file>`.
    #[config(env = "VOCABNB_PLAYER", default = "auto")]
    pub player: String,
}

/// `~/.config/vocabnb/config.toml`, when a home directory can be found.
pub fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|bd| {
        bd.home_dir()
            .join(".config")
            .join(APP_NAME)
            .join("config.toml")
    })
}

/// Expands a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(bd) => bd.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

impl VocabConfig {
    /// Loads env, then `path` (or the default file), then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                let p = expand_tilde(p);
                if !p.exists() {
                    return Err(VocabError::Config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                Some(p)
            }
            None => default_config_path(),
        };

        let mut builder = Self::builder().env();
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "reading config");
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    /// A commented TOML file listing every setting with its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    /// Validates the raw values into typed settings.
    pub fn settings(&self) -> Result<Settings> {
        let layout: ColumnLayout = self.columns.parse()?;

        let delimiter = match self.delimiter.as_bytes() {
            [b] => *b,
            _ => {
                return Err(VocabError::Config(format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                )))
            }
        };

        let default_familiarity = Familiarity::new(self.default_familiarity).map_err(|_| {
            VocabError::Config(format!(
                "default_familiarity must be between 1 and 5, got {}",
                self.default_familiarity
            ))
        })?;

        let notebook = match &self.notebook {
            Some(p) => expand_tilde(p),
            None => BaseDirs::new()
                .map(|bd| bd.data_dir().join(APP_NAME).join("notebook.tsv"))
                .ok_or_else(|| {
                    VocabError::Config("No notebook configured and no home directory".into())
                })?,
        };

        let cache_dir = match &self.dictionary.cache_dir {
            Some(p) => Some(expand_tilde(p)),
            None => BaseDirs::new().map(|bd| bd.cache_dir().join(APP_NAME)),
        };

        let api_key = self
            .dictionary
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Settings {
            notebook,
            layout,
            delimiter,
            default_familiarity,
            memo_file: self.memo_file.as_deref().map(expand_tilde),
            sample_count: self.sample.count,
            curve: self.sample.curve,
            review_total: self.review.total,
            review_min_non5: self.review.min_non5,
            api_key,
            cache_dir,
            timeout: Duration::from_secs(self.dictionary.timeout_secs),
            player: self.audio.player.trim().to_string(),
        })
    }
}

/// Resolved configuration, threaded through the API and the CLI.
#[derive(Debug, Clone)]
pub struct Settings {
    pub notebook: PathBuf,
    pub layout: ColumnLayout,
    pub delimiter: u8,
    pub default_familiarity: Familiarity,
    pub memo_file: Option<PathBuf>,
    pub sample_count: usize,
    pub curve: WeightCurve,
    pub review_total: usize,
    pub review_min_non5: usize,
    pub api_key: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub timeout: Duration,
    pub player: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notebook: PathBuf::from("notebook.tsv"),
            layout: ColumnLayout::default(),
            delimiter: b'\t',
            default_familiarity: Familiarity::default(),
            memo_file: None,
            sample_count: 5,
            curve: WeightCurve::default(),
            review_total: 20,
            review_min_non5: 5,
            api_key: None,
            cache_dir: None,
            timeout: Duration::from_secs(10),
            player: "auto".to_string(),
        }
    }
}
