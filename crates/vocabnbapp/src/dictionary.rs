//! # External Dictionary
//!
//! Word lookups go through the [`DictionaryClient`] trait so commands never know
//! which service answered. The production client talks to the Merriam-Webster
//! collegiate API over blocking HTTP.
//!
//! ## Merriam-Webster responses
//!
//! The API answers with a JSON array. For a known word it holds entry objects:
//!
//! ```json
//! [{"meta": {"id": "apple"}, "fl": "noun",
//!   "hwi": {"hw": "ap*ple", "prs": [{"mw": "ˈa-pəl", "sound": {"audio": "apple001"}}]},
//!   "shortdef": ["the fleshy fruit of a rosaceous tree"]}]
//! ```
//!
//! For an unknown word it holds plain strings, the spelling suggestions.
//!
//! Headwords carry `*` syllable marks, stripped before comparing with the word.
//! The audio basename maps to a URL under
//! `https://media.merriam-webster.com/audio/prons/en/us/mp3/{subdir}/{name}.mp3`, see
//! [`parse_audio_url`].
//!
//! ## Pronunciation cache
//!
//! [`PronunciationCache`] keeps one `<word>.mp3` per word. A cached file is reused
//! without any network access.

use crate::error::{Result, VocabError};
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const MW_ENDPOINT: &str = "https://dictionaryapi.com/api/v3/references/collegiate/json/";
const MW_AUDIO_BASE: &str = "https://media.merriam-webster.com/audio/prons/en/us/mp3";
const USER_AGENT: &str = concat!("vocabnb/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    pub part_of_speech: Option<String>,
    pub meanings: Vec<String>,
}

/// What the dictionary knows about a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub headword: String,
    pub pronunciation: Option<String>,
    pub senses: Vec<Sense>,
    pub audio_url: Option<String>,
}

pub trait DictionaryClient {
    /// Looks up `word`. Unknown words fail with [`VocabError::WordNotFound`].
    fn lookup(&self, word: &str) -> Result<Definition>;

    fn fetch_audio(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct MerriamWebsterClient {
    http: Client,
    api_key: String,
    endpoint: Url,
}

impl MerriamWebsterClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let endpoint = Url::parse(MW_ENDPOINT)
            .map_err(|e| VocabError::DictionaryLookup(format!("Bad endpoint: {}", e)))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint,
        })
    }

    fn word_url(&self, word: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| VocabError::DictionaryLookup("Endpoint cannot take a path".into()))?
            .pop_if_empty()
            .push(word);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl DictionaryClient for MerriamWebsterClient {
    fn lookup(&self, word: &str) -> Result<Definition> {
        let url = self.word_url(word)?;
        debug!(word, "querying dictionary");
        let body: Value = self.http.get(url).send()?.error_for_status()?.json()?;
        parse_response(word, &body)
    }

    fn fetch_audio(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "downloading pronunciation");
        let bytes = self.http.get(url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}

fn headword(item: &Value) -> Option<String> {
    item.pointer("/hwi/hw")
        .and_then(Value::as_str)
        .map(|hw| hw.replace('*', ""))
}

/// Turns a collegiate API response into a [`Definition`].
pub fn parse_response(word: &str, body: &Value) -> Result<Definition> {
    let items = body.as_array().ok_or_else(|| {
        VocabError::DictionaryLookup(format!("Unexpected response for '{}'", word))
    })?;

    let entries: Vec<&Value> = items.iter().filter(|v| v.is_object()).collect();
    if entries.is_empty() {
        let suggestions: Vec<&str> = items.iter().filter_map(Value::as_str).take(5).collect();
        if !suggestions.is_empty() {
            debug!(word, ?suggestions, "dictionary only has suggestions");
        }
        return Err(VocabError::WordNotFound(word.to_string()));
    }

    // Inflected forms ("ran") come back under another headword ("run")
    let exact: Vec<&Value> = entries
        .iter()
        .copied()
        .filter(|item| headword(item).as_deref() == Some(word))
        .collect();
    let chosen = if exact.is_empty() { entries } else { exact };

    let senses: Vec<Sense> = chosen
        .iter()
        .filter_map(|item| {
            let meanings: Vec<String> = item
                .get("shortdef")
                .and_then(Value::as_array)?
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            if meanings.is_empty() {
                return None;
            }
            Some(Sense {
                part_of_speech: item.get("fl").and_then(Value::as_str).map(str::to_string),
                meanings,
            })
        })
        .collect();
    if senses.is_empty() {
        return Err(VocabError::WordNotFound(word.to_string()));
    }

    let first_prs = |key: &str| -> Option<String> {
        chosen.iter().find_map(|item| {
            item.pointer(&format!("/hwi/prs/0/{}", key))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
    };

    Ok(Definition {
        headword: chosen
            .first()
            .and_then(|item| headword(item))
            .unwrap_or_else(|| word.to_string()),
        pronunciation: first_prs("mw"),
        senses,
        audio_url: first_prs("sound/audio").map(|name| parse_audio_url(&name)),
    })
}

/// Maps an audio basename to its URL.
///
/// The subdirectory is `bix` for names starting with "bix", `gg` for "gg",
/// `number` for a leading digit or underscore, and the first letter otherwise.
pub fn parse_audio_url(name: &str) -> String {
    let subdir = if name.starts_with("bix") {
        "bix".to_string()
    } else if name.starts_with("gg") {
        "gg".to_string()
    } else {
        match name.chars().next() {
            Some(c) if c.is_ascii_digit() || c == '_' => "number".to_string(),
            Some(c) => c.to_string(),
            None => "number".to_string(),
        }
    };
    format!("{}/{}/{}.mp3", MW_AUDIO_BASE, subdir, name)
}

/// Replaces characters that cannot appear in a file name.
pub fn validate_filename(name: &str) -> String {
    name.replace([':', '/', '\\', '"'], "_")
}

pub struct PronunciationCache {
    dir: PathBuf,
}

impl PronunciationCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, word: &str) -> PathBuf {
        self.dir.join(format!("{}.mp3", validate_filename(word)))
    }

    /// Returns the cached audio for `word`, downloading it on a miss.
    pub fn resolve(&self, word: &str, client: &dyn DictionaryClient) -> Result<PathBuf> {
        let path = self.path_for(word);
        if path.is_file() {
            debug!(word, path = %path.display(), "pronunciation cache hit");
            return Ok(path);
        }

        let definition = client.lookup(word)?;
        let url = definition.audio_url.ok_or_else(|| {
            VocabError::DictionaryLookup(format!("No pronunciation audio for '{}'", word))
        })?;
        let audio = client.fetch_audio(&url)?;

        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".audio-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, &audio) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        fs::rename(&tmp, &path)?;

        info!(word, path = %path.display(), "cached pronunciation");
        Ok(path)
    }
}
