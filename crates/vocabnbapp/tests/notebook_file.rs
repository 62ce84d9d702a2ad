//! Library operations against a real notebook file.

use std::fs;
use tempfile::TempDir;
use vocabnbapp::api::VocabApi;
use vocabnbapp::config::Settings;
use vocabnbapp::error::VocabError;
use vocabnbapp::model::Familiarity;
use vocabnbapp::review::{FamiliarityAction, ReviewAnswer};
use vocabnbapp::store::tsv::TsvStore;
use vocabnbapp::store::NotebookStore;
use vocabnbapp::template::EntryTemplate;

const SEED_NOTEBOOK: &str = "familiarity\tword\tmeaning\texamples\tpronunciation\n\
1\tapple\ta round fruit\tan apple a day\t\n\
5\txylophone\ta percussion instrument\t\t\n";

fn setup() -> (TempDir, VocabApi<TsvStore>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.tsv");
    fs::write(&path, SEED_NOTEBOOK).unwrap();
    let settings = Settings {
        notebook: path.clone(),
        memo_file: Some(dir.path().join("memo.tsv")),
        ..Settings::default()
    };
    let store = TsvStore::new(&path).with_memo_file(settings.memo_file.clone());
    (dir, VocabApi::new(store, settings))
}

#[test]
fn upsert_then_reload_matches_template() {
    let (dir, mut api) = setup();
    let template = EntryTemplate::parse(
        "familiarity = 4\ndefinition = \"quick and energetic\"\nexamples = [\"a brisk walk\", \"brisk trade\"]\n",
    )
    .unwrap();
    api.upsert("brisk", template, false).unwrap();

    let reloaded = TsvStore::new(dir.path().join("notebook.tsv")).load().unwrap();
    let entry = reloaded.get("brisk").unwrap();
    assert_eq!(entry.definition, "quick and energetic");
    assert_eq!(entry.examples, vec!["a brisk walk", "brisk trade"]);
    assert_eq!(entry.familiarity, Familiarity::new(4).unwrap());
    assert_eq!(reloaded.words(), vec!["apple", "xylophone", "brisk"]);
}

#[test]
fn deleting_missing_word_leaves_file_identical() {
    let (dir, mut api) = setup();
    let path = dir.path().join("notebook.tsv");
    let before = fs::read(&path).unwrap();

    let err = api.delete("banana").unwrap_err();
    assert!(matches!(err, VocabError::WordNotFound(_)));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn sampling_never_writes() {
    let (dir, api) = setup();
    let path = dir.path().join("notebook.tsv");
    let before = fs::read(&path).unwrap();

    let picked = api.sample(Some(2), Some(99)).unwrap();
    assert_eq!(picked.entries.len(), 2);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn review_rewrites_scores_and_logs_memos() {
    let (dir, mut api) = setup();
    let answers = vec![
        ReviewAnswer::new("apple", Familiarity::MIN, FamiliarityAction::Bump),
        ReviewAnswer::new("xylophone", Familiarity::MAX, FamiliarityAction::Decrease),
    ];
    api.apply_review(&answers).unwrap();

    let reloaded = api.store().load().unwrap();
    assert_eq!(reloaded.get("apple").unwrap().familiarity.value(), 3);
    assert_eq!(reloaded.get("xylophone").unwrap().familiarity.value(), 4);

    let memo = fs::read_to_string(dir.path().join("memo.tsv")).unwrap();
    let lines: Vec<&str> = memo.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("apple\t"));
    assert!(lines[1].ends_with("\t1\t="));
    assert!(lines[2].ends_with("\t5\t-"));
}

#[test]
fn upsert_keeps_columns_outside_the_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.tsv");
    fs::write(
        &path,
        "familiarity\tword\tmeaning\tnotes\texamples\n3\tapple\tfruit\tmy private note\tan apple a day\n",
    )
    .unwrap();
    let store = TsvStore::new(&path).with_layout("0,F:1,W:2,M:4,E".parse().unwrap());
    let mut api = VocabApi::new(store, Settings::default());

    let template = EntryTemplate::parse("definition = \"green fruit\"").unwrap();
    api.upsert("pear", template, false).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "familiarity\tword\tmeaning\tnotes\texamples");
    assert_eq!(lines[1], "3\tapple\tfruit\tmy private note\tan apple a day");
    assert!(lines[2].starts_with("3\tpear\tgreen fruit\t\t"));
}
