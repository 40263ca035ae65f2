//! Terminal output for the CLI subcommands: one-line notes and the history table.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Honors `NO_COLOR`; plain output on dumb or unknown terminals.
fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && (std::env::var_os("COLORTERM").is_some()
            || std::env::var("TERM").is_ok_and(|t| t != "dumb"))
}

#[derive(Clone, Copy)]
enum Note {
    Info,
    Warn,
    Error,
    Success,
}

impl Note {
    fn color(self) -> &'static str {
        match self {
            Note::Info => "\x1b[36m",
            Note::Warn => "\x1b[33m",
            Note::Error => "\x1b[31m",
            Note::Success => "\x1b[32m",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Note::Info => "ℹ",
            Note::Warn => "⚠",
            Note::Error => "✗",
            Note::Success => "✓",
        }
    }

    fn plain_tag(self) -> &'static str {
        match self {
            Note::Info => "INFO",
            Note::Warn => "WARN",
            Note::Error => "ERROR",
            Note::Success => "OK",
        }
    }
}

fn format_note(kind: Note, msg: &str, color: bool) -> String {
    if color {
        format!("{}{BOLD}{}{RESET} {msg}", kind.color(), kind.symbol())
    } else {
        format!("{}: {msg}", kind.plain_tag())
    }
}

pub fn note_info(msg: &str) {
    println!("{}", format_note(Note::Info, msg, supports_color()));
}

pub fn note_warn(msg: &str) {
    println!("{}", format_note(Note::Warn, msg, supports_color()));
}

/// Goes to stderr.
pub fn note_error(msg: &str) {
    eprintln!("{}", format_note(Note::Error, msg, supports_color()));
}

pub fn note_success(msg: &str) {
    println!("{}", format_note(Note::Success, msg, supports_color()));
}

const TIME_HEADER: &str = "Timestamp (UTC)";
const VALUE_HEADER: &str = "Prestige";

/// Two-column history table: timestamps left-aligned, values right-aligned.
///
/// Cells are plain text, so byte length is the visible width.
pub fn history_table(rows: &[(String, String)]) -> String {
    let time_w = rows.iter().map(|(t, _)| t.len()).fold(TIME_HEADER.len(), usize::max);
    let value_w = rows.iter().map(|(_, v)| v.len()).fold(VALUE_HEADER.len(), usize::max);

    let header = format!("  {TIME_HEADER:<time_w$}  {VALUE_HEADER:>value_w$}");
    let mut out = if supports_color() {
        format!("{BOLD}{header}{RESET}\n")
    } else {
        format!("{header}\n")
    };
    out.push_str(&format!("  {}  {}\n", "-".repeat(time_w), "-".repeat(value_w)));
    for (time, value) in rows {
        out.push_str(&format!("  {time:<time_w$}  {value:>value_w$}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_notes_carry_a_tag() {
        assert_eq!(format_note(Note::Warn, "disk almost full", false), "WARN: disk almost full");
        assert!(format_note(Note::Success, "saved", true).ends_with("✓\x1b[0m saved"));
    }

    #[test]
    fn values_align_right_under_header() {
        let rows = vec![
            ("2024-01-01 00:00:00".to_string(), "1,000".to_string()),
            ("2024-01-02 00:00:00".to_string(), "950,000".to_string()),
        ];
        let table = history_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with("   1,000"));
        assert!(lines[3].ends_with(" 950,000"));
        assert_eq!(lines[2].len(), lines[3].len());
    }
}
