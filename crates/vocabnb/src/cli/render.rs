use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vocabnbapp::commands::{CmdMessage, MessageLevel};
use vocabnbapp::dictionary::Definition;
use vocabnbapp::model::Entry;

const LINE_WIDTH: usize = 100;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
        }
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn truncate_to(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    // One column is kept for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// One line per entry: familiarity, word, meaning, aligned on display width.
pub(super) fn render_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No words in the notebook.\n".to_string();
    }

    let word_width = entries.iter().map(|e| e.word.width()).max().unwrap_or(0);
    let meaning_width = LINE_WIDTH.saturating_sub(word_width + 6).max(10);

    let mut out = String::new();
    for entry in entries {
        let meaning = entry.definition.lines().next().unwrap_or("");
        out.push_str(&format!(
            "{}  {}  {}\n",
            familiarity_badge(entry),
            pad_to(&entry.word, word_width).bold(),
            truncate_to(meaning, meaning_width)
        ));
    }
    out
}

fn familiarity_badge(entry: &Entry) -> colored::ColoredString {
    let text = entry.familiarity.to_string();
    match entry.familiarity.value() {
        5 => text.red(),
        4 => text.yellow(),
        1 | 2 => text.green(),
        _ => text.normal(),
    }
}

/// A word card: word, meaning and numbered examples.
pub(super) fn render_entry(entry: &Entry) -> String {
    let mut out = format!(
        "{} {} {}\n",
        "->".green().bold(),
        entry.word.bold(),
        format!("[{}]", entry.familiarity).dimmed()
    );
    if let Some(p) = &entry.pronunciation {
        out.push_str(&format!("   {}\n", format!("\\{}\\", p).dimmed()));
    }
    out.push_str(&render_meaning(entry));
    out
}

pub(super) fn render_meaning(entry: &Entry) -> String {
    let mut out = format!("{} {}\n", "Meaning ->".cyan().bold(), entry.definition);
    for (k, example) in entry.examples.iter().enumerate() {
        out.push_str(&format!(
            "{} {}\n",
            format!("Example #{} ->", k + 1).cyan().bold(),
            example
        ));
    }
    out
}

pub(super) fn render_definition(def: &Definition) -> String {
    let mut out = format!("{} {}", "Dictionary ->".magenta().bold(), def.headword.bold());
    if let Some(p) = &def.pronunciation {
        out.push_str(&format!(" {}", format!("\\{}\\", p).dimmed()));
    }
    out.push('\n');
    for sense in &def.senses {
        if let Some(pos) = &sense.part_of_speech {
            out.push_str(&format!("  {}\n", pos.italic()));
        }
        for (k, meaning) in sense.meanings.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", k + 1, meaning));
        }
    }
    out
}
