//! Context setup and per-command handlers.
//!
//! - `run()`: parses arguments, sets up logging, dispatches.
//! - `init_context()`: loads configuration, builds the store, the API and the player.
//! - `handle_*()`: call the API and print the result.

use super::render::{print_messages, render_definition, render_entry, render_entry_list};
use super::review::{run_session, SessionEnd};
use super::setup::{Cli, Commands};
use clap::Parser;
use console::Term;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::{debug, warn};
use vocabnbapp::api::VocabApi;
use vocabnbapp::audio::{select_player, NullPlayer, PlayOutcome, Player};
use vocabnbapp::config::{expand_tilde, VocabConfig};
use vocabnbapp::dictionary::MerriamWebsterClient;
use vocabnbapp::editor::edit_template;
use vocabnbapp::error::{Result, VocabError};
use vocabnbapp::model::Entry;
use vocabnbapp::store::tsv::TsvStore;
use vocabnbapp::template::EntryTemplate;

/// How a successful run ended.
pub enum Outcome {
    Done,
    Aborted,
}

struct AppContext {
    api: VocabApi<TsvStore>,
    config: VocabConfig,
    player: Box<dyn Player>,
}

pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Sample {
            count,
            seed,
            pronounce,
        } => handle_sample(&ctx, count, seed, pronounce),
        Commands::Upsert {
            word,
            file,
            create_only,
        } => handle_upsert(&mut ctx, &word, file, create_only),
        Commands::UpsertTemplate { word } => handle_upsert_template(&ctx, word.as_deref()),
        Commands::Delete { word } => handle_delete(&mut ctx, &word),
        Commands::Query { word, pronounce } => handle_query(&ctx, &word, pronounce),
        Commands::Ls => handle_list(&ctx),
        Commands::Review {
            total,
            min_non5,
            seed,
            pronounce,
        } => return handle_review(&mut ctx, total, min_non5, seed, pronounce),
        Commands::Config { template } => handle_config(&ctx, template),
    }?;
    Ok(Outcome::Done)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("VOCABNB_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = VocabConfig::load(cli.config.as_deref())?;
    let mut settings = config.settings()?;
    if let Some(notebook) = &cli.notebook {
        settings.notebook = expand_tilde(notebook);
    }
    debug!(notebook = %settings.notebook.display(), "using notebook");

    let store = TsvStore::new(&settings.notebook)
        .with_layout(settings.layout.clone())
        .with_delimiter(settings.delimiter)
        .with_memo_file(settings.memo_file.clone());

    let player: Box<dyn Player> = if cli.command.wants_audio() {
        select_player(&settings.player)
    } else {
        Box::new(NullPlayer)
    };

    let client = match &settings.api_key {
        Some(key) => Some(MerriamWebsterClient::new(key.clone(), settings.timeout)?),
        None => None,
    };
    let mut api = VocabApi::new(store, settings);
    if let Some(client) = client {
        api = api.with_dictionary(Box::new(client));
    }

    Ok(AppContext {
        api,
        config,
        player,
    })
}

/// Plays the pronunciation of `word`. Failures are logged, never returned.
fn pronounce(ctx: &AppContext, word: &str) -> bool {
    ctx.api.pronounce(word, ctx.player.as_ref()) == PlayOutcome::Played
}

fn handle_sample(
    ctx: &AppContext,
    count: Option<usize>,
    seed: Option<u64>,
    with_audio: bool,
) -> Result<()> {
    let result = ctx.api.sample(count, seed)?;
    for (i, entry) in result.entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render_entry(entry));
        if with_audio {
            pronounce(ctx, &entry.word);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// The template comes from `--file`, else piped stdin, else the editor.
fn read_template(ctx: &AppContext, word: &str, file: Option<PathBuf>) -> Result<EntryTemplate> {
    if let Some(path) = file {
        let text = if path.as_os_str() == "-" {
            read_stdin()?
        } else {
            fs::read_to_string(&path).map_err(|e| {
                VocabError::Template(format!("Cannot read {}: {}", path.display(), e))
            })?
        };
        return EntryTemplate::parse(&text);
    }

    if !io::stdin().is_terminal() {
        return EntryTemplate::parse(&read_stdin()?);
    }

    let initial = ctx.api.upsert_template(Some(word))?.text.unwrap_or_default();
    edit_template(&initial)
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn handle_upsert(
    ctx: &mut AppContext,
    word: &str,
    file: Option<PathBuf>,
    create_only: bool,
) -> Result<()> {
    let template = read_template(ctx, word, file)?;
    let result = ctx.api.upsert(word, template, create_only)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_upsert_template(ctx: &AppContext, word: Option<&str>) -> Result<()> {
    let result = ctx.api.upsert_template(word)?;
    print!("{}", result.text.unwrap_or_default());
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, word: &str) -> Result<()> {
    let result = ctx.api.delete(word)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_query(ctx: &AppContext, word: &str, with_audio: bool) -> Result<()> {
    let result = ctx.api.query(word)?;
    if let Some(entry) = result.entries.first() {
        print!("{}", render_entry(entry));
    }
    if let Some(def) = &result.definition {
        if !result.entries.is_empty() {
            println!();
        }
        print!("{}", render_definition(def));
    }
    print_messages(&result.messages);
    if with_audio {
        pronounce(ctx, word);
    }
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print!("{}", render_entry_list(&result.entries));
    Ok(())
}

fn handle_review(
    ctx: &mut AppContext,
    total: Option<usize>,
    min_non5: Option<usize>,
    seed: Option<u64>,
    with_audio: bool,
) -> Result<Outcome> {
    if !io::stdin().is_terminal() || !Term::stdout().is_term() {
        return Err(VocabError::Api(
            "review needs an interactive terminal on stdin and stdout".to_string(),
        ));
    }

    let plan = ctx.api.plan_review(total, min_non5, seed)?;
    let entries: Vec<Entry> = plan.entries;

    // Download every clip up front so the session never waits on the network
    if with_audio && ctx.api.has_dictionary() {
        for entry in &entries {
            if let Err(e) = ctx.api.pronunciation(&entry.word) {
                warn!(word = %entry.word, error = %e, "no pronunciation");
            }
        }
    }

    let end = {
        let shared: &AppContext = ctx;
        let mut speak = |entry: &Entry| with_audio && pronounce(shared, &entry.word);
        let mut input = io::stdin().lock();
        run_session(&entries, &mut input, &mut io::stdout(), &mut speak)?
    };

    match end {
        SessionEnd::Aborted => Ok(Outcome::Aborted),
        SessionEnd::Finished(answers) => {
            let result = ctx.api.apply_review(&answers)?;
            println!();
            print_messages(&result.messages);
            Ok(Outcome::Done)
        }
    }
}

fn handle_config(ctx: &AppContext, template: bool) -> Result<()> {
    let result = vocabnbapp::commands::config::run(&ctx.config, template)?;
    print!("{}", result.text.unwrap_or_default());
    Ok(())
}
