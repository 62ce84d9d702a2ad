use crate::commands::{CmdMessage, CmdResult};
use crate::dictionary::DictionaryClient;
use crate::error::{Result, VocabError};
use crate::store::NotebookStore;
use tracing::warn;

/// Shows the local entry for `word` alongside the dictionary's definition.
///
/// A word missing from both fails with [`VocabError::WordNotFound`]. A dictionary
/// failure is only a warning while a local entry exists.
pub fn run<S: NotebookStore>(
    store: &S,
    dictionary: Option<&dyn DictionaryClient>,
    word: &str,
) -> Result<CmdResult> {
    let word = word.trim();
    let notebook = store.load()?;
    let local = notebook.get(word).cloned();

    let mut result = CmdResult::default();
    let remote = match dictionary {
        Some(client) => match client.lookup(word) {
            Ok(def) => Some(def),
            Err(VocabError::WordNotFound(_)) => None,
            Err(e) if local.is_some() => {
                warn!(word, error = %e, "dictionary lookup failed");
                result.add_message(CmdMessage::warning(format!("Dictionary unavailable: {}", e)));
                None
            }
            Err(e) => return Err(e),
        },
        None => None,
    };

    if local.is_none() && remote.is_none() {
        return Err(VocabError::WordNotFound(word.to_string()));
    }
    if local.is_none() {
        result.add_message(CmdMessage::info(format!("'{}' is not in the notebook", word)));
    }

    if let Some(entry) = local {
        result.entries.push(entry);
    }
    if let Some(def) = remote {
        result = result.with_definition(def);
    }
    Ok(result)
}
