//! Quote-of-the-day rendering shared by the CLI outputs.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::QuoteBook;
use crate::selector::day_of_year;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

/// Serializable record of the quote shown on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteOfTheDay {
    /// ISO date, e.g. `2026-10-17`
    pub date: String,
    /// Long form, e.g. `Saturday, October 17, 2026`
    pub display_date: String,
    pub day_of_year: u32,
    pub index: usize,
    pub text: String,
    pub author: String,
}

impl QuoteOfTheDay {
    #[must_use]
    pub fn for_date(book: &QuoteBook, date: NaiveDate) -> Self {
        let quote = book.for_date(date);
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            display_date: display_date(date),
            day_of_year: day_of_year(date),
            index: book.index_for_date(date),
            text: quote.text.clone(),
            author: quote.author.clone(),
        }
    }
}

/// Long date label shown above the quote
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Render as pretty-printed JSON.
pub fn render_json(entry: &QuoteOfTheDay) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entry)
}

/// Render as a Markdown block quote with frontmatter.
#[must_use]
pub fn render_markdown(entry: &QuoteOfTheDay) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "---");
    let _ = writeln!(output, "date: {}", entry.date);
    let _ = writeln!(output, "day_of_year: {}", entry.day_of_year);
    let _ = writeln!(output, "index: {}", entry.index);
    let _ = writeln!(output, "---");
    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", entry.display_date);
    let _ = writeln!(output);
    for line in entry.text.lines() {
        let _ = writeln!(output, "> {line}");
    }
    let _ = writeln!(output, ">");
    let _ = write!(output, "> — {}", entry.author);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> QuoteOfTheDay {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        QuoteOfTheDay::for_date(&QuoteBook::builtin(), date)
    }

    #[test]
    fn test_display_date_long_form() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(display_date(date), "Saturday, October 17, 2026");
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(display_date(date), "Monday, January 5, 2026");
    }

    #[test]
    fn test_quote_of_the_day_fields() {
        let entry = sample();
        assert_eq!(entry.date, "2026-10-17");
        assert_eq!(entry.day_of_year, 290);
        assert_eq!(entry.index, 35);
        assert_eq!(
            entry.text,
            "Design is the intermediary between information and understanding."
        );
        assert_eq!(entry.author, "Hans Hofmann");
    }

    #[test]
    fn test_render_json_round_trips() {
        let entry = sample();
        let json = render_json(&entry).unwrap();
        let parsed: QuoteOfTheDay = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_render_markdown() {
        let rendered = render_markdown(&sample());
        assert!(rendered.starts_with("---\ndate: 2026-10-17\n"));
        assert!(rendered.contains("## Saturday, October 17, 2026"));
        assert!(rendered.ends_with("> — Hans Hofmann"));
    }
}
