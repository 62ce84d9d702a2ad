use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VocabError};
use crate::model::{Familiarity, UpsertOutcome};
use crate::store::NotebookStore;
use crate::template::EntryTemplate;
use tracing::info;

/// Adds or replaces `word` from a filled-in template.
///
/// Without a familiarity in the template, an update keeps the current score and a
/// create uses `default_familiarity`. With `create_only`, an existing word fails
/// with [`VocabError::DuplicateWord`].
pub fn run<S: NotebookStore>(
    store: &mut S,
    word: &str,
    template: EntryTemplate,
    create_only: bool,
    default_familiarity: Familiarity,
) -> Result<CmdResult> {
    let word = word.trim();
    let mut notebook = store.load()?;

    let existing = notebook.get(word).map(|e| e.familiarity);
    if create_only && existing.is_some() {
        return Err(VocabError::DuplicateWord(word.to_string()));
    }

    let entry = template.into_entry(word, existing.unwrap_or(default_familiarity))?;
    let outcome = notebook.upsert(entry.clone());
    store.save(&notebook)?;

    let mut result = CmdResult::default();
    let verb = match outcome {
        UpsertOutcome::Created => "Added",
        UpsertOutcome::Updated => "Updated",
    };
    info!(word, familiarity = %entry.familiarity, "{} word", verb.to_lowercase());
    result.add_message(CmdMessage::success(format!(
        "{} word: {} (familiarity {}) in {}",
        verb,
        entry.word,
        entry.familiarity,
        store.location().display()
    )));
    Ok(result.with_entries(vec![entry]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::test_utils::store_of;

    fn fam(v: i64) -> Familiarity {
        Familiarity::new(v).unwrap()
    }

    fn template(text: &str) -> EntryTemplate {
        EntryTemplate::parse(text).unwrap()
    }

    #[test]
    fn creates_with_default_familiarity() {
        let mut store = MemoryStore::new();
        let res = run(
            &mut store,
            "brisk",
            template("definition = \"quick\"\nexamples = [\"a brisk walk\"]"),
            false,
            fam(3),
        )
        .unwrap();

        let entry = store.notebook().get("brisk").unwrap();
        assert_eq!(entry.familiarity, fam(3));
        assert_eq!(entry.examples, vec!["a brisk walk"]);
        assert!(res.messages[0].content.starts_with("Added word: brisk"));
        assert!(res.messages[0].content.ends_with("in memory://notebook"));
    }

    #[test]
    fn update_keeps_familiarity_when_omitted() {
        let mut store = store_of(&[("brisk", 2)]);
        run(
            &mut store,
            "brisk",
            template("definition = \"energetic\""),
            false,
            fam(3),
        )
        .unwrap();

        let entry = store.notebook().get("brisk").unwrap();
        assert_eq!(entry.definition, "energetic");
        assert_eq!(entry.familiarity, fam(2));
        assert_eq!(store.notebook().len(), 1);
    }

    #[test]
    fn update_takes_explicit_familiarity() {
        let mut store = store_of(&[("brisk", 2)]);
        let res = run(
            &mut store,
            "brisk",
            template("familiarity = 5\ndefinition = \"energetic\""),
            false,
            fam(3),
        )
        .unwrap();
        assert_eq!(store.notebook().get("brisk").unwrap().familiarity, fam(5));
        assert!(res.messages[0].content.starts_with("Updated word"));
    }

    #[test]
    fn create_only_rejects_existing_word() {
        let mut store = store_of(&[("brisk", 2)]);
        let err = run(
            &mut store,
            "brisk",
            template("definition = \"x\""),
            true,
            fam(3),
        )
        .unwrap_err();
        assert!(matches!(err, VocabError::DuplicateWord(_)));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn invalid_template_does_not_save() {
        let mut store = MemoryStore::new();
        let err = run(
            &mut store,
            "brisk",
            template("familiarity = 0\ndefinition = \"x\""),
            false,
            fam(3),
        )
        .unwrap_err();
        assert!(matches!(err, VocabError::InvalidFamiliarity(0)));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn write_failure_surfaces() {
        let mut store = MemoryStore::new();
        store.set_simulate_write_error(true);
        let err = run(
            &mut store,
            "brisk",
            template("definition = \"x\""),
            false,
            fam(3),
        )
        .unwrap_err();
        assert!(matches!(err, VocabError::Store(_)));
        assert!(store.notebook().is_empty());
    }
}
