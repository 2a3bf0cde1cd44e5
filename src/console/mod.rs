//! Terminal rendering of shell output.
//!
//! Everything is written to a caller supplied writer so the shell can be driven
//! against a buffer in tests. Colour is optional.

use std::fmt::Display;
use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::core::schema::{CollectionRecord, Summary};
use crate::input::Outcome;

pub const PROMPT: &str = "#> ";

/// `(command, description)` pairs shown by `h`.
pub const HELP_MENU: [(&str, &str); 6] = [
    ("q", "Quit."),
    ("clear", "Clear the terminal"),
    ("h", "Display the options menu."),
    (
        "ls",
        "List the collection json files in the publish log dir with an index.",
    ),
    (
        "pt <i> | pt <i>, <j>... <n>",
        "Get the publish time for the collection(s) with the specified index/indices.",
    ),
    ("range(i, j)", "List the collections from i to j"),
];

#[derive(Debug, Clone, Copy)]
enum Style {
    Key,
    Alpha,
    Beta,
}

type Cell = (String, Style);

#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Console { color }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if !self.color {
            return text.to_string();
        }
        match style {
            Style::Key => text.green().bold().to_string(),
            Style::Alpha => text.cyan().to_string(),
            Style::Beta => text.magenta().to_string(),
        }
    }

    /// Write rows as left aligned columns. Padding is computed on the plain text.
    fn write_table<W: Write>(&self, out: &mut W, rows: &[Vec<Cell>]) -> io::Result<()> {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|c| {
                rows.iter()
                    .filter_map(|row| row.get(c))
                    .map(|(text, _)| text.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in rows {
            let last = row.len().saturating_sub(1);
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(c, (text, style))| {
                    if c == last {
                        self.paint(text, *style)
                    } else {
                        self.paint(&format!("{text:<width$}", width = widths[c]), *style)
                    }
                })
                .collect();
            writeln!(out, "{}", cells.join("  "))?;
        }
        Ok(())
    }

    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let bar = self.paint("#####################", Style::Key);
        let marks = self.paint("###", Style::Key);
        let title = if self.color {
            "Publish Times".cyan().bold().to_string()
        } else {
            "Publish Times".to_string()
        };
        writeln!(out)?;
        writeln!(out, " {bar}")?;
        writeln!(out, " {marks} {title} {marks}")?;
        writeln!(out, " {bar}")?;
        writeln!(out)
    }

    pub fn write_help_menu<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{} {}",
            self.paint("#>", Style::Key),
            self.paint("Options:", Style::Alpha)
        )?;
        let rows: Vec<Vec<Cell>> = HELP_MENU
            .iter()
            .map(|(value, description)| {
                vec![
                    (format!("- {value}"), Style::Key),
                    (description.to_string(), Style::Alpha),
                ]
            })
            .collect();
        self.write_table(out, &rows)
    }

    pub fn write_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.paint(PROMPT, Style::Key))?;
        out.flush()
    }

    pub fn write_exit<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{} {}",
            self.paint("#>", Style::Key),
            self.paint("goodbye!", Style::Alpha)
        )
    }

    pub fn warn<W: Write>(&self, out: &mut W, message: &dyn Display) -> io::Result<()> {
        let message = message.to_string();
        let message = if self.color {
            message.red().to_string()
        } else {
            message
        };
        writeln!(out, "{} {}", self.paint("#>", Style::Key), message)
    }

    pub fn clear<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "\x1b[2J\x1b[H")?;
        out.flush()
    }

    /// List records numbered from `first_index`.
    pub fn write_records<W: Write>(
        &self,
        out: &mut W,
        first_index: usize,
        records: &[CollectionRecord],
    ) -> io::Result<()> {
        let mut rows: Vec<Vec<Cell>> = vec![vec![
            ("Index".to_string(), Style::Key),
            ("Collection".to_string(), Style::Alpha),
            ("Date".to_string(), Style::Beta),
        ]];
        rows.extend(records.iter().enumerate().map(|(i, record)| {
            vec![
                (format!("- {}", first_index + i), Style::Key),
                (record.name.clone(), Style::Alpha),
                (record.last_modified_display(), Style::Beta),
            ]
        }));
        self.write_table(out, &rows)
    }

    pub fn write_summaries<W: Write>(&self, out: &mut W, summaries: &[Summary]) -> io::Result<()> {
        let mut rows: Vec<Vec<Cell>> = vec![vec![
            ("- Index".to_string(), Style::Key),
            ("Collection".to_string(), Style::Beta),
            ("Time (seconds)".to_string(), Style::Alpha),
            ("Count".to_string(), Style::Beta),
            ("Size".to_string(), Style::Alpha),
        ]];
        rows.extend(summaries.iter().map(|summary| {
            vec![
                (format!("- {}", summary.index), Style::Key),
                (summary.name.clone(), Style::Beta),
                (format!("{:.6}", summary.duration_seconds), Style::Alpha),
                (summary.file_count.to_string(), Style::Beta),
                (summary.size_human.clone(), Style::Alpha),
            ]
        }));
        self.write_table(out, &rows)
    }

    /// Render the output of a non-terminal outcome. `Quit` and `Ignored` print nothing.
    pub fn render<W: Write>(&self, out: &mut W, outcome: &Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Clear => self.clear(out),
            Outcome::Help => self.write_help_menu(out),
            Outcome::Listing(records) => self.write_records(out, 0, records),
            Outcome::Range { start, records } => self.write_records(out, *start, records),
            Outcome::Summaries(summaries) => self.write_summaries(out, summaries),
            Outcome::Quit | Outcome::Ignored => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn plain(f: impl FnOnce(&Console, &mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&Console::new(false), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_records_numbered_from_range_start() {
        let records = vec![
            CollectionRecord::new(
                "b.json",
                SystemTime::UNIX_EPOCH + Duration::from_secs(1_136_214_245),
            ),
            CollectionRecord::new("a.json", SystemTime::UNIX_EPOCH),
        ];
        let out = plain(|c, buf| c.write_records(buf, 3, &records));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Index"));
        assert_eq!(lines[1], "- 3    b.json      Mon Jan  2 15:04:05 2006");
        assert!(lines[2].starts_with("- 4    a.json"));
    }

    #[test]
    fn test_summary_row() {
        let summaries = vec![Summary {
            index: 0,
            name: "c.json".to_string(),
            duration_seconds: 61.5,
            file_count: 12,
            size_bytes: 12 * 1024 * 1024,
            size_human: "12M".to_string(),
        }];
        let out = plain(|c, buf| c.write_summaries(buf, &summaries));
        let row = out.lines().nth(1).unwrap();
        assert!(row.starts_with("- 0"));
        assert!(row.contains("61.500000"));
        assert!(row.contains("12"));
        assert!(row.ends_with("12M"));
    }

    #[test]
    fn test_help_lists_every_command() {
        let out = plain(|c, buf| c.write_help_menu(buf));
        for (value, _) in HELP_MENU {
            assert!(out.contains(value), "missing {value}");
        }
    }

    #[test]
    fn test_no_color_has_no_escape_codes() {
        let out = plain(|c, buf| {
            c.write_header(buf)?;
            c.warn(buf, &"bad index")?;
            c.write_prompt(buf)
        });
        assert!(!out.contains('\x1b'));
        assert!(out.contains("Publish Times"));
        assert!(out.contains("#> bad index"));
        assert!(out.ends_with(PROMPT));
    }

    #[test]
    fn test_color_output_has_escape_codes() {
        let mut buf = Vec::new();
        Console::new(true).warn(&mut buf, &"oops").unwrap();
        assert!(String::from_utf8(buf).unwrap().contains('\x1b'));
    }

    #[test]
    fn test_quit_and_ignored_render_nothing() {
        assert!(plain(|c, buf| c.render(buf, &Outcome::Quit)).is_empty());
        assert!(plain(|c, buf| c.render(buf, &Outcome::Ignored)).is_empty());
    }

    #[test]
    fn test_clear_writes_ansi_sequence() {
        assert_eq!(plain(|c, buf| c.clear(buf)), "\x1b[2J\x1b[H");
        assert_eq!(
            plain(|c, buf| c.render(buf, &Outcome::Clear)),
            "\x1b[2J\x1b[H"
        );
    }
}
