use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::NotebookStore;

pub fn run<S: NotebookStore>(store: &S) -> Result<CmdResult> {
    let notebook = store.load()?;
    Ok(CmdResult::default().with_entries(notebook.entries().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::store_of;

    #[test]
    fn lists_in_notebook_order() {
        let store = store_of(&[("pear", 2), ("apple", 1), ("fig", 5)]);
        let res = run(&store).unwrap();
        let words: Vec<&str> = res.entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["pear", "apple", "fig"]);
        assert!(res.messages.is_empty());
    }
}
