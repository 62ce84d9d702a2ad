//! # CLI Layer
//!
//! This module is one possible UI client for vocabnb, not the application itself.
//! It is the only place that knows about the terminal: argument parsing, logging
//! setup, prompting and printing. Everything else goes through `VocabApi`.

mod commands;
mod render;
mod review;
mod setup;

pub use commands::{run, Outcome};
