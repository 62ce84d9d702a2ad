//! Planning and applying review sessions. The questioning itself happens in the UI,
//! between [`plan`] and [`apply`].

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VocabError};
use crate::model::Memo;
use crate::review::{plan_review, ReviewAnswer};
use crate::sampler::{make_rng, Sampler};
use crate::store::NotebookStore;
use chrono::{DateTime, Utc};
use tracing::info;

/// Picks the session's words, in the order they should be asked.
pub fn plan<S: NotebookStore>(
    store: &S,
    sampler: &Sampler,
    total: usize,
    min_non5: usize,
    seed: Option<u64>,
) -> Result<CmdResult> {
    let notebook = store.load()?;
    let mut rng = make_rng(seed);
    let order = plan_review(notebook.entries(), total, min_non5, sampler, &mut rng)?;
    let entries = order
        .into_iter()
        .map(|i| notebook.entries()[i].clone())
        .collect();
    Ok(CmdResult::default().with_entries(entries))
}

/// Writes the answers of a finished session: one save, then one memo per answer.
///
/// Every answered word must still be in the notebook, otherwise nothing is written.
pub fn apply<S: NotebookStore>(
    store: &mut S,
    answers: &[ReviewAnswer],
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let mut notebook = store.load()?;
    let mut changed = Vec::new();

    for answer in answers {
        let current = notebook
            .get(&answer.word)
            .ok_or_else(|| VocabError::WordNotFound(answer.word.clone()))?;
        let after = answer.action.apply(current.familiarity);
        if after != current.familiarity {
            notebook.set_familiarity(&answer.word, after)?;
            if let Some(entry) = notebook.get(&answer.word) {
                changed.push(entry.clone());
            }
        }
    }

    if !changed.is_empty() {
        store.save(&notebook)?;
    }

    let memos: Vec<Memo> = answers
        .iter()
        .map(|a| Memo {
            word: a.word.clone(),
            date: now,
            orig_familiarity: a.before,
            action: a.action.to_string(),
        })
        .collect();
    store.append_memos(&memos)?;

    info!(answered = answers.len(), changed = changed.len(), "applied review");
    let mut result = CmdResult::default();
    let familiar = answers.iter().filter(|a| a.is_familiar()).count();
    result.add_message(CmdMessage::success(format!(
        "Reviewed {} words: {} familiar, {} updated",
        answers.len(),
        familiar,
        changed.len()
    )));
    Ok(result.with_entries(changed))
}
