//! # API Facade
//!
//! [`VocabApi`] is the single entry point for every vocabnb operation. It is a thin
//! facade: it fills in configured defaults, dispatches to `commands/*.rs` and
//! returns their [`CmdResult`]. No business logic, no printing.
//!
//! ## Generic Over NotebookStore
//!
//! - Production: `VocabApi<TsvStore>`
//! - Testing: `VocabApi<MemoryStore>`
//!
//! The dictionary client is optional. Without one, `query` only shows local entries
//! and pronunciations are unavailable.

use crate::audio::{PlayOutcome, Player};
use crate::commands::{self, CmdResult};
use crate::config::Settings;
use crate::dictionary::{DictionaryClient, PronunciationCache};
use crate::error::{Result, VocabError};
use crate::review::ReviewAnswer;
use crate::sampler::Sampler;
use crate::store::NotebookStore;
use crate::template::EntryTemplate;
use chrono::Utc;
use std::path::PathBuf;
use tracing::warn;

pub struct VocabApi<S: NotebookStore> {
    store: S,
    settings: Settings,
    dictionary: Option<Box<dyn DictionaryClient>>,
}

impl<S: NotebookStore> VocabApi<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            store,
            settings,
            dictionary: None,
        }
    }

    pub fn with_dictionary(mut self, client: Box<dyn DictionaryClient>) -> Self {
        self.dictionary = Some(client);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    fn sampler(&self) -> Sampler {
        Sampler::new(self.settings.curve)
    }

    pub fn sample(&self, count: Option<usize>, seed: Option<u64>) -> Result<CmdResult> {
        let count = count.unwrap_or(self.settings.sample_count);
        commands::sample::run(&self.store, &self.sampler(), count, seed)
    }

    pub fn upsert(
        &mut self,
        word: &str,
        template: EntryTemplate,
        create_only: bool,
    ) -> Result<CmdResult> {
        let default = self.settings.default_familiarity;
        commands::upsert::run(&mut self.store, word, template, create_only, default)
    }

    pub fn upsert_template(&self, word: Option<&str>) -> Result<CmdResult> {
        commands::template::run(&self.store, word, self.settings.default_familiarity)
    }

    pub fn delete(&mut self, word: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, word)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn query(&self, word: &str) -> Result<CmdResult> {
        commands::query::run(&self.store, self.dictionary.as_deref(), word)
    }

    pub fn plan_review(
        &self,
        total: Option<usize>,
        min_non5: Option<usize>,
        seed: Option<u64>,
    ) -> Result<CmdResult> {
        commands::review::plan(
            &self.store,
            &self.sampler(),
            total.unwrap_or(self.settings.review_total),
            min_non5.unwrap_or(self.settings.review_min_non5),
            seed,
        )
    }

    pub fn apply_review(&mut self, answers: &[ReviewAnswer]) -> Result<CmdResult> {
        commands::review::apply(&mut self.store, answers, Utc::now())
    }

    /// Local audio file with the pronunciation of `word`, downloaded on first use.
    pub fn pronunciation(&self, word: &str) -> Result<PathBuf> {
        let client = self.dictionary.as_deref().ok_or_else(|| {
            VocabError::DictionaryLookup("No dictionary API key configured".into())
        })?;
        let dir = self.settings.cache_dir.clone().ok_or_else(|| {
            VocabError::DictionaryLookup("No pronunciation cache directory".into())
        })?;
        PronunciationCache::new(dir).resolve(word, client)
    }

    /// Fetches and plays the pronunciation of `word` through `player`.
    ///
    /// Never fails: a missing dictionary, a failed download or a failed playback are
    /// logged as warnings and reported as [`PlayOutcome::Skipped`].
    pub fn pronounce(&self, word: &str, player: &dyn Player) -> PlayOutcome {
        if !self.has_dictionary() {
            warn!("pronunciation needs dictionary.api_key in the config");
            return PlayOutcome::Skipped;
        }
        match self.pronunciation(word).and_then(|path| player.play(&path)) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(word, player = player.name(), error = %e, "could not pronounce word");
                PlayOutcome::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Familiarity;
    use crate::review::FamiliarityAction;
    use crate::store::memory::MemoryStore;
    use crate::test_utils::{store_of, StaticDictionary};
    use serde_json::json;
    use std::cell::Cell;
    use std::path::Path;

    struct BrokenPlayer;

    impl Player for BrokenPlayer {
        fn name(&self) -> &str {
            "broken"
        }

        fn play(&self, _path: &Path) -> Result<PlayOutcome> {
            Err(VocabError::AudioPlayback("device busy".into()))
        }
    }

    #[derive(Default)]
    struct CountingPlayer {
        plays: Cell<usize>,
    }

    impl Player for CountingPlayer {
        fn name(&self) -> &str {
            "counting"
        }

        fn play(&self, _path: &Path) -> Result<PlayOutcome> {
            self.plays.set(self.plays.get() + 1);
            Ok(PlayOutcome::Played)
        }
    }

    fn brisk_dictionary() -> StaticDictionary {
        StaticDictionary::new().with_word(
            "brisk",
            json!([{"hwi": {"hw": "brisk", "prs": [{"sound": {"audio": "brisk001"}}]},
                    "shortdef": ["keenly alert"]}]),
        )
    }

    fn api(words: &[(&str, i64)]) -> VocabApi<MemoryStore> {
        VocabApi::new(store_of(words), Settings::default())
    }

    #[test]
    fn sample_uses_configured_count() {
        let mut settings = Settings::default();
        settings.sample_count = 2;
        let api = VocabApi::new(store_of(&[("a", 1), ("b", 2), ("c", 3)]), settings);
        assert_eq!(api.sample(None, Some(1)).unwrap().entries.len(), 2);
        assert_eq!(api.sample(Some(3), Some(1)).unwrap().entries.len(), 3);
    }

    #[test]
    fn upsert_uses_configured_default_familiarity() {
        let mut settings = Settings::default();
        settings.default_familiarity = Familiarity::MAX;
        let mut api = VocabApi::new(MemoryStore::new(), settings);
        api.upsert("brisk", EntryTemplate::parse("definition = \"quick\"").unwrap(), false)
            .unwrap();
        assert_eq!(
            api.store().notebook().get("brisk").unwrap().familiarity,
            Familiarity::MAX
        );
    }

    #[test]
    fn review_round_trip() {
        let mut api = api(&[("a", 5), ("b", 2)]);
        let plan = api.plan_review(Some(2), Some(0), Some(4)).unwrap();
        assert_eq!(plan.entries.len(), 2);

        let answers: Vec<ReviewAnswer> = plan
            .entries
            .iter()
            .map(|e| ReviewAnswer::new(e.word.clone(), e.familiarity, FamiliarityAction::Max))
            .collect();
        api.apply_review(&answers).unwrap();
        assert_eq!(
            api.store().notebook().get("b").unwrap().familiarity,
            Familiarity::MAX
        );
    }

    #[test]
    fn query_without_dictionary_is_local_only() {
        let api = api(&[("a", 1)]);
        assert!(!api.has_dictionary());
        assert!(api.query("a").unwrap().definition.is_none());
    }

    #[test]
    fn pronunciation_needs_a_dictionary() {
        let api = api(&[("a", 1)]);
        assert!(matches!(
            api.pronunciation("a"),
            Err(VocabError::DictionaryLookup(_))
        ));
    }

    #[test]
    fn pronunciation_downloads_into_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.cache_dir = Some(dir.path().to_path_buf());
        let api = VocabApi::new(MemoryStore::new(), settings)
            .with_dictionary(Box::new(brisk_dictionary()));

        let path = api.pronunciation("brisk").unwrap();
        assert_eq!(path, dir.path().join("brisk.mp3"));
        assert!(path.is_file());
    }

    #[test]
    fn pronounce_plays_cached_clip() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.cache_dir = Some(dir.path().to_path_buf());
        let api = VocabApi::new(MemoryStore::new(), settings)
            .with_dictionary(Box::new(brisk_dictionary()));

        let player = CountingPlayer::default();
        assert_eq!(api.pronounce("brisk", &player), PlayOutcome::Played);
        assert_eq!(player.plays.get(), 1);
    }

    #[test]
    fn pronounce_failures_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.cache_dir = Some(dir.path().to_path_buf());
        let mut api = VocabApi::new(store_of(&[("brisk", 3)]), settings)
            .with_dictionary(Box::new(StaticDictionary::offline()));

        // The lookup fails, then the player would fail too
        let sampled = api.sample(Some(1), Some(1)).unwrap();
        assert_eq!(api.pronounce(&sampled.entries[0].word, &BrokenPlayer), PlayOutcome::Skipped);

        api = api.with_dictionary(Box::new(brisk_dictionary()));
        assert_eq!(api.pronounce("brisk", &BrokenPlayer), PlayOutcome::Skipped);
        assert_eq!(api.store().save_count(), 0);
    }

    #[test]
    fn pronounce_without_dictionary_is_skipped() {
        let player = CountingPlayer::default();
        assert_eq!(api(&[("a", 1)]).pronounce("a", &player), PlayOutcome::Skipped);
        assert_eq!(player.plays.get(), 0);
    }
}
