use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vocabnb", bin_name = "vocabnb", version)]
#[command(about = "Vocabulary notebook with familiarity-weighted sampling", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read config from FILE instead of ~/.config/vocabnb/config.toml
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use this notebook file
    #[arg(short = 'f', long, global = true, value_name = "FILE")]
    pub notebook: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw words at random, less familiar words more often
    Sample {
        /// Number of words to draw
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Pronounce each word aloud
        #[arg(short = 'P', long)]
        pronounce: bool,
    },

    /// Add a word, or replace it if it exists
    Upsert {
        word: String,

        /// Read the entry template from FILE instead of stdin or $EDITOR
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Fail if the word is already in the notebook
        #[arg(long)]
        create_only: bool,
    },

    /// Print the entry template, prefilled for WORD if it exists
    #[command(name = "upsert-template")]
    UpsertTemplate { word: Option<String> },

    /// Remove a word
    #[command(alias = "rm")]
    Delete { word: String },

    /// Show a word from the notebook and the dictionary
    Query {
        word: String,

        /// Pronounce the word aloud
        #[arg(short = 'P', long)]
        pronounce: bool,
    },

    /// List every word
    #[command(alias = "list")]
    Ls,

    /// Quiz yourself and re-score words
    Review {
        /// Total number of words to review
        #[arg(short = 'T', long)]
        total: Option<usize>,

        /// Minimum number of words below familiarity 5
        #[arg(short = 'm', long = "min")]
        min_non5: Option<usize>,

        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Pronounce each word aloud
        #[arg(short = 'P', long)]
        pronounce: bool,
    },

    /// Show the effective configuration
    Config {
        /// Print a commented template of every setting instead
        #[arg(long)]
        template: bool,
    },
}

impl Commands {
    pub fn wants_audio(&self) -> bool {
        matches!(
            self,
            Commands::Sample { pronounce: true, .. }
                | Commands::Query { pronounce: true, .. }
                | Commands::Review { pronounce: true, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sample_flags() {
        let cli = parse(&["vocabnb", "sample", "-n", "3", "--seed", "42", "-P"]);
        match cli.command {
            Commands::Sample {
                count,
                seed,
                pronounce,
            } => {
                assert_eq!(count, Some(3));
                assert_eq!(seed, Some(42));
                assert!(pronounce);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(parse(&["vocabnb", "sample", "-P"]).command.wants_audio());
        assert!(!parse(&["vocabnb", "ls"]).command.wants_audio());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["vocabnb", "ls", "-f", "words.tsv", "-c", "cfg.toml", "-v"]);
        assert_eq!(cli.notebook, Some(PathBuf::from("words.tsv")));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn review_flags() {
        let cli = parse(&["vocabnb", "review", "-T", "10", "-m", "2"]);
        assert!(matches!(
            cli.command,
            Commands::Review {
                total: Some(10),
                min_non5: Some(2),
                seed: None,
                pronounce: false
            }
        ));
    }

    #[test]
    fn upsert_requires_word() {
        assert!(Cli::try_parse_from(["vocabnb", "upsert"]).is_err());
        let cli = parse(&["vocabnb", "upsert", "brisk", "--file", "t.toml", "--create-only"]);
        assert!(matches!(
            cli.command,
            Commands::Upsert { ref word, create_only: true, .. } if word == "brisk"
        ));
    }

    #[test]
    fn aliases() {
        assert!(matches!(parse(&["vocabnb", "list"]).command, Commands::Ls));
        assert!(matches!(
            parse(&["vocabnb", "rm", "x"]).command,
            Commands::Delete { .. }
        ));
        assert!(matches!(
            parse(&["vocabnb", "upsert-template"]).command,
            Commands::UpsertTemplate { word: None }
        ));
    }
}
