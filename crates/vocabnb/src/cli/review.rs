//! The interactive part of `vocabnb review`.
//!
//! Each word is shown alone first. After any key the meaning and examples follow,
//! and the user answers with a familiarity action. Words the user did not find
//! familiar are shown once more at the end. Input and output are plain
//! `BufRead`/`Write` so sessions can be driven from tests.

use super::render::render_meaning;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use vocabnbapp::model::Entry;
use vocabnbapp::review::{FamiliarityAction, ReviewAnswer, ACCEPTED_ACTIONS};

pub(super) enum SessionEnd {
    Finished(Vec<ReviewAnswer>),
    Aborted,
}

const HELP: &str = "=== HELP ===
 .   -- keep the familiarity score unchanged
 -   -- subtract 1 from the score
 =   -- add 2 to the score
 +   -- set the score to 5
 NUM -- set the score to NUM (1-5)
 ?   -- print this help
============";

/// Reads one line. `None` on end of input.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "{} ", text)?;
    out.flush()
}

fn ask_action<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<FamiliarityAction>> {
    let choices = format!("[{}?]", ACCEPTED_ACTIONS);
    prompt(out, &choices)?;
    loop {
        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };
        if answer == "?" {
            writeln!(out, "{}", HELP)?;
            prompt(out, &choices)?;
            continue;
        }
        match answer.parse::<FamiliarityAction>() {
            Ok(action) => return Ok(Some(action)),
            Err(_) => prompt(out, &format!("{} {}", "x".red().bold(), choices))?,
        }
    }
}

pub(super) fn run_session<R: BufRead, W: Write>(
    entries: &[Entry],
    input: &mut R,
    out: &mut W,
    pronounce: &mut dyn FnMut(&Entry) -> bool,
) -> io::Result<SessionEnd> {
    let total = entries.len();
    let mut answers = Vec::with_capacity(total);

    for (i, entry) in entries.iter().enumerate() {
        writeln!(out)?;
        write!(
            out,
            "{} {} {}",
            "->".green().bold(),
            entry.word,
            format!("[{}/{}]", i + 1, total).green().bold()
        )?;
        out.flush()?;
        if pronounce(entry) {
            write!(out, " 🔈")?;
        }
        writeln!(out)?;

        prompt(out, "[any key]")?;
        if read_answer(input)?.is_none() {
            return Ok(SessionEnd::Aborted);
        }
        write!(out, "{}", render_meaning(entry))?;

        let Some(action) = ask_action(input, out)? else {
            return Ok(SessionEnd::Aborted);
        };
        answers.push(ReviewAnswer::new(entry.word.clone(), entry.familiarity, action));
    }

    let unfamiliar: Vec<&Entry> = entries
        .iter()
        .zip(&answers)
        .filter(|(_, a)| !a.is_familiar())
        .map(|(e, _)| e)
        .collect();
    if !unfamiliar.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "=== Review ===".red().bold())?;
        for (i, entry) in unfamiliar.iter().enumerate() {
            writeln!(out)?;
            writeln!(
                out,
                "{} {} {}",
                "->".red().bold(),
                entry.word,
                format!("[{}/{}]", i + 1, unfamiliar.len()).red().bold()
            )?;
            write!(out, "{}", render_meaning(entry))?;
        }
    }

    Ok(SessionEnd::Finished(answers))
}
