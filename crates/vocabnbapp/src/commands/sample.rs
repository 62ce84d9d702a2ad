use crate::commands::CmdResult;
use crate::error::Result;
use crate::sampler::Sampler;
use crate::store::NotebookStore;

pub fn run<S: NotebookStore>(
    store: &S,
    sampler: &Sampler,
    count: usize,
    seed: Option<u64>,
) -> Result<CmdResult> {
    let notebook = store.load()?;
    let picked = sampler.sample(notebook.entries(), count, seed)?;
    Ok(CmdResult::default().with_entries(picked.into_iter().cloned().collect()))
}
