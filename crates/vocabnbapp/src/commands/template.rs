use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Familiarity;
use crate::store::NotebookStore;
use crate::template::EntryTemplate;

/// Renders the upsert template, prefilled when `word` is already in the notebook.
pub fn run<S: NotebookStore>(
    store: &S,
    word: Option<&str>,
    default_familiarity: Familiarity,
) -> Result<CmdResult> {
    let word = word.map(str::trim).filter(|w| !w.is_empty());
    let template = match word {
        Some(w) => store
            .load()?
            .get(w)
            .map(EntryTemplate::from_entry)
            .unwrap_or_else(|| EntryTemplate::blank(default_familiarity)),
        None => EntryTemplate::blank(default_familiarity),
    };
    Ok(CmdResult::default().with_text(template.render(word)?))
}
