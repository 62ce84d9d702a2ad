use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::NotebookStore;
use tracing::info;

pub fn run<S: NotebookStore>(store: &mut S, word: &str) -> Result<CmdResult> {
    let mut notebook = store.load()?;
    // Fails before any write when the word is missing
    let removed = notebook.remove(word.trim())?;
    store.save(&notebook)?;

    info!(word = %removed.word, "deleted word");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted word: {} from {}",
        removed.word,
        store.location().display()
    )));
    Ok(result.with_entries(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VocabError;
    use crate::test_utils::store_of;

    #[test]
    fn removes_existing_word() {
        let mut store = store_of(&[("apple", 1), ("xylophone", 5)]);
        let res = run(&mut store, "apple").unwrap();
        assert_eq!(res.entries[0].word, "apple");
        assert_eq!(
            res.messages[0].content,
            "Deleted word: apple from memory://notebook"
        );
        assert!(!store.notebook().contains("apple"));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn missing_word_does_not_save() {
        let mut store = store_of(&[("apple", 1)]);
        let err = run(&mut store, "banana").unwrap_err();
        assert!(matches!(err, VocabError::WordNotFound(w) if w == "banana"));
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.notebook().len(), 1);
    }
}
