// src/extractors/markup.rs
//
// Line classifier for the markup the model is asked to write:
//   `#### text` level-3 heading, `### text` level-2 heading, `* text` bullet,
//   `|a|b|` table row, anything else a plain paragraph. `**` toggles bold.

// --- Constants ---
const BOLD_DELIMITER: &str = "**";
const TABLE_DELIMITER: char = '|';

/// Prefixes that decide a line's kind, longest first so `#### ` wins over `### `.
const LINE_PREFIXES: [(&str, Prefix); 3] = [
    ("#### ", Prefix::Heading(3)),
    ("### ", Prefix::Heading(2)),
    ("* ", Prefix::Bullet),
];

#[derive(Debug, Clone, Copy)]
enum Prefix {
    Heading(u8),
    Bullet,
}

/// A run of text with its emphasis flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: false }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: true }
    }
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupLine {
    Heading { level: u8, text: String },
    Bullet(Vec<Span>),
    TableRow(Vec<String>),
    Plain(Vec<Span>),
}

/// Classifies a single line. Total: every input maps to exactly one variant,
/// with `Plain` as the fallback.
pub fn classify(line: &str) -> MarkupLine {
    let line = line.trim();

    let prefixed = LINE_PREFIXES
        .iter()
        .find_map(|(prefix, kind)| line.strip_prefix(prefix).map(|rest| (*kind, rest)));

    match prefixed {
        Some((Prefix::Heading(level), _)) => MarkupLine::Heading {
            level,
            text: line.trim_start_matches('#').trim().to_string(),
        },
        Some((Prefix::Bullet, rest)) => MarkupLine::Bullet(split_emphasis(rest)),
        None if is_table_row(line) => MarkupLine::TableRow(split_cells(line)),
        None => MarkupLine::Plain(split_emphasis(line)),
    }
}

/// Classifies every line of a markup block, in order.
pub fn classify_lines(text: &str) -> impl Iterator<Item = MarkupLine> + '_ {
    text.lines().map(classify)
}

/// Splits on `**`; odd-indexed pieces are bold. Empty pieces are kept so
/// the alternation stays aligned (`"**x**"` gives `["", "x", ""]`).
pub fn split_emphasis(text: &str) -> Vec<Span> {
    text.split(BOLD_DELIMITER)
        .enumerate()
        .map(|(i, part)| if i % 2 == 1 { Span::bold(part) } else { Span::plain(part) })
        .collect()
}

fn is_table_row(line: &str) -> bool {
    line.len() >= 2 && line.starts_with(TABLE_DELIMITER) && line.ends_with(TABLE_DELIMITER)
}

// Drops exactly one outer pipe on each side so empty edge cells survive.
fn split_cells(line: &str) -> Vec<String> {
    line[1..line.len() - 1]
        .split(TABLE_DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect()
}
