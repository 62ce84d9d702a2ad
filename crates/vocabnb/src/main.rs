//! # vocabnb CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and turns its outcome into an exit code.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/vocabnb/src/cli/)                  │
//! │  - clap argument parsing (setup.rs)                   │
//! │  - context wiring + dispatch (commands.rs)            │
//! │  - interactive review session (review.rs)             │
//! │  - terminal rendering (render.rs)                     │
//! └───────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  vocabnbapp: VocabApi -> commands -> NotebookStore    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Exit codes: 0 on success, 1 on any error, 130 when a review session is aborted.

mod cli;

fn main() {
    match cli::run() {
        Ok(cli::Outcome::Done) => {}
        Ok(cli::Outcome::Aborted) => {
            eprintln!("Aborted");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
