//! # vocabnb
//!
//! A personal vocabulary notebook: words with their meaning, examples and a
//! familiarity score from 1 (well known) to 5 (unfamiliar), kept in a flat
//! delimited file the user can also edit by hand.
//!
//! ## Architecture
//!
//! The crate is UI-agnostic. The `vocabnb` binary is one client of it.
//!
//! - **API** ([`api`]): the facade every client talks to.
//! - **Commands** ([`commands`]): one module per operation, returning structured
//!   results instead of printing.
//! - **Store** ([`store`]): where the notebook lives. The file store rewrites the
//!   whole notebook atomically on every change.
//! - **Sampler** ([`sampler`]) and **review** ([`review`]): the study logic. Less
//!   familiar words are drawn more often.
//! - **Dictionary** ([`dictionary`]) and **audio** ([`audio`]): optional remote
//!   definitions and pronunciations.
//!
//! ## Flow
//!
//! ```text
//! CLI args -> VocabApi -> commands::*::run -> NotebookStore::load/save -> CmdResult -> CLI render
//! ```
//!
//! The library never writes to stdout or stderr and never exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.

pub mod api;
pub mod audio;
pub mod commands;
pub mod config;
pub mod dictionary;
pub mod editor;
pub mod error;
pub mod model;
pub mod review;
pub mod sampler;
pub mod store;
pub mod template;

#[cfg(test)]
mod test_utils;
