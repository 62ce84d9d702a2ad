//! # Audio Playback
//!
//! Pronunciations are played by a [`Player`] chosen once, at startup, by
//! [`select_player`]. Playback blocks until the clip finishes.
//!
//! - [`ExternalPlayer`]: a command-line player such as `mpg123 -q <file>`.
//! - [`OsServicePlayer`]: the macOS media service, driven through `osascript`.
//! - [`NullPlayer`]: plays nothing. Used when audio is disabled or no player exists.
//!
//! Failing to play is never fatal: callers log [`VocabError::AudioPlayback`] and go on.

use crate::error::{Result, VocabError};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    Skipped,
}

pub trait Player {
    fn name(&self) -> &str;

    fn play(&self, path: &Path) -> Result<PlayOutcome>;
}

pub struct NullPlayer;

impl Player for NullPlayer {
    fn name(&self) -> &str {
        "none"
    }

    fn play(&self, _path: &Path) -> Result<PlayOutcome> {
        Ok(PlayOutcome::Skipped)
    }
}

/// Runs `<program> <args..> <file>` and waits for it.
pub struct ExternalPlayer {
    program: String,
    args: Vec<String>,
}

impl ExternalPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parses a configured command line such as `"mpv --no-video"`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }
}

fn run_quietly(program: &str, args: &[String], path: &Path) -> Result<PlayOutcome> {
    if !path.is_file() {
        return Err(VocabError::AudioPlayback(format!(
            "No audio file at {}",
            path.display()
        )));
    }

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| VocabError::AudioPlayback(format!("Failed to run '{}': {}", program, e)))?;

    if !status.success() {
        return Err(VocabError::AudioPlayback(format!(
            "'{}' exited with {}",
            program, status
        )));
    }
    Ok(PlayOutcome::Played)
}

impl Player for ExternalPlayer {
    fn name(&self) -> &str {
        &self.program
    }

    fn play(&self, path: &Path) -> Result<PlayOutcome> {
        run_quietly(&self.program, &self.args, path)
    }
}

const QUICKTIME_SCRIPT: &str = r#"on run argv
    set theFile to POSIX file (first item of argv)
    tell application "QuickTime Player"
        set theAudio to open file theFile
        tell theAudio
            set theDuration to duration
            play
        end tell
        delay theDuration + 1
        close theAudio
        quit
    end tell
end run"#;

/// Plays through QuickTime Player via AppleScript.
pub struct OsServicePlayer;

impl OsServicePlayer {
    /// `osascript` arguments: one `-e` per script line; the file is appended last.
    pub fn script_args() -> Vec<String> {
        QUICKTIME_SCRIPT
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .flat_map(|l| ["-e".to_string(), l.to_string()])
            .collect()
    }
}

impl Player for OsServicePlayer {
    fn name(&self) -> &str {
        "osascript"
    }

    fn play(&self, path: &Path) -> Result<PlayOutcome> {
        run_quietly("osascript", &Self::script_args(), path)
    }
}

/// Whether `program` can be found on PATH.
pub fn program_available(program: &str) -> bool {
    if program.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(program).is_file();
    }
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Known command-line players, probed in order.
const CANDIDATES: &[(&str, &[&str])] = &[
    ("mpg123", &["-q"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("afplay", &[]),
    ("paplay", &[]),
];

/// Picks the playback backend for `preference`: "auto", "none", or a command line.
pub fn select_player(preference: &str) -> Box<dyn Player> {
    match preference.trim() {
        "" | "none" => Box::new(NullPlayer),
        "auto" => {
            for (program, args) in CANDIDATES {
                if program_available(program) {
                    debug!(player = program, "selected audio player");
                    return Box::new(ExternalPlayer::new(
                        *program,
                        args.iter().map(|a| a.to_string()).collect(),
                    ));
                }
            }
            if cfg!(target_os = "macos") && program_available("osascript") {
                debug!(player = "osascript", "selected audio player");
                return Box::new(OsServicePlayer);
            }
            debug!("no audio player found, pronunciation disabled");
            Box::new(NullPlayer)
        }
        custom => match ExternalPlayer::from_command_line(custom) {
            Some(player) if program_available(&player.program) => Box::new(player),
            _ => {
                warn!(player = custom, "configured audio player not found");
                Box::new(NullPlayer)
            }
        },
    }
}
