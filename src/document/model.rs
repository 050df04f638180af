// src/document/model.rs
//! In-memory document graph: ordered blocks plus the styles they reference.

use crate::extractors::markup::Span;

// --- Style names ---
pub const NORMAL: &str = "Normal";
pub const LIST_BULLET: &str = "List Bullet";
pub const HEADING_LEVELS: std::ops::RangeInclusive<u8> = 1..=4;

/// Accent color for headings, RGB(68, 114, 196).
pub const ACCENT_COLOR: &str = "4472C4";

/// 0.25in expressed in twentieths of a point.
pub const QUARTER_INCH_TWIPS: i32 = 360;

const BODY_FONT_PT: u32 = 11;

pub fn heading_style_name(level: u8) -> String {
    format!("Heading {}", level)
}

/// A named paragraph style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDef {
    pub name: String,
    pub font_size_pt: u32,
    pub color: Option<String>,
    pub bold: bool,
    pub left_indent_twips: Option<i32>,
    /// Negative values hang the first line left of the body.
    pub first_line_indent_twips: Option<i32>,
}

impl StyleDef {
    fn body(name: &str) -> Self {
        Self {
            name: name.to_string(),
            font_size_pt: BODY_FONT_PT,
            color: None,
            bold: false,
            left_indent_twips: None,
            first_line_indent_twips: None,
        }
    }

    /// The definition a style name should get when first registered.
    pub fn intended(name: &str) -> Self {
        if name == LIST_BULLET {
            return Self {
                left_indent_twips: Some(QUARTER_INCH_TWIPS),
                first_line_indent_twips: Some(-QUARTER_INCH_TWIPS),
                ..Self::body(name)
            };
        }
        if let Some(level) = parse_heading_level(name) {
            return Self {
                font_size_pt: heading_font_pt(level),
                color: Some(ACCENT_COLOR.to_string()),
                bold: true,
                ..Self::body(name)
            };
        }
        Self::body(name)
    }

    /// Style id as written to the package: the name without spaces.
    pub fn id(&self) -> String {
        self.name.split_whitespace().collect()
    }
}

// 14/12/10/8pt for levels 1-4; deeper levels bottom out at 8pt.
fn heading_font_pt(level: u8) -> u32 {
    16u32.saturating_sub(2 * u32::from(level.min(4)))
}

fn parse_heading_level(name: &str) -> Option<u8> {
    name.strip_prefix("Heading ")?.parse().ok().filter(|l| *l > 0)
}

/// Per-document style table. Lookup-or-create is idempotent.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: Vec<StyleDef>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&StyleDef> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Returns the registered style, registering its intended definition first
    /// if this is the first request for `name`.
    pub fn get_or_add(&mut self, name: &str) -> &StyleDef {
        let index = match self.styles.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.styles.push(StyleDef::intended(name));
                self.styles.len() - 1
            }
        };
        &self.styles[index]
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDef> {
        self.styles.iter()
    }
}

/// A rectangular grid of cell text; row 0 is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Pads short rows with empty cells so every row has the widest row's width.
    pub fn new(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { style: String, runs: Vec<Span> },
    Table(Table),
}

/// The rendered meeting note, prior to persistence.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    blocks: Vec<Block>,
    styles: StyleRegistry,
}

impl Default for RenderedDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderedDocument {
    /// Empty document with Normal, List Bullet and Heading 1-4 registered.
    pub fn new() -> Self {
        let mut styles = StyleRegistry::new();
        styles.get_or_add(NORMAL);
        styles.get_or_add(LIST_BULLET);
        for level in HEADING_LEVELS {
            styles.get_or_add(&heading_style_name(level));
        }
        Self { blocks: Vec::new(), styles }
    }

    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) {
        self.styles.get_or_add(&heading_style_name(level));
        self.blocks.push(Block::Heading { level, text: text.into() });
    }

    pub fn add_paragraph(&mut self, style: &str, runs: Vec<Span>) {
        self.styles.get_or_add(style);
        self.blocks.push(Block::Paragraph { style: style.to_string(), runs });
    }

    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_match_house_style() {
        let doc = RenderedDocument::new();
        let styles = doc.styles();
        assert_eq!(styles.len(), 6);

        assert_eq!(styles.get(NORMAL).unwrap().font_size_pt, 11);

        let bullet = styles.get(LIST_BULLET).unwrap();
        assert_eq!(bullet.font_size_pt, 11);
        assert_eq!(bullet.left_indent_twips, Some(360));
        assert_eq!(bullet.first_line_indent_twips, Some(-360));

        let sizes: Vec<u32> = HEADING_LEVELS
            .map(|l| styles.get(&heading_style_name(l)).unwrap().font_size_pt)
            .collect();
        assert_eq!(sizes, vec![14, 12, 10, 8]);
        for level in HEADING_LEVELS {
            let style = styles.get(&heading_style_name(level)).unwrap();
            assert!(style.bold);
            assert_eq!(style.color.as_deref(), Some(ACCENT_COLOR));
        }
    }

    #[test]
    fn test_get_or_add_is_idempotent() {
        let mut registry = StyleRegistry::new();
        let first = registry.get_or_add("Heading 2").clone();
        let second = registry.get_or_add("Heading 2").clone();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registries_are_per_document() {
        let mut a = RenderedDocument::new();
        let b = RenderedDocument::new();
        a.add_paragraph("Quote", vec![Span::plain("x")]);
        assert!(a.styles().get("Quote").is_some());
        assert!(b.styles().get("Quote").is_none());
    }

    #[test]
    fn test_style_ids_drop_spaces() {
        assert_eq!(StyleDef::intended(LIST_BULLET).id(), "ListBullet");
        assert_eq!(StyleDef::intended("Heading 3").id(), "Heading3");
    }

    #[test]
    fn test_table_pads_ragged_rows() {
        let table = Table::new(vec![
            vec!["a".into(), "b".into(), "c".into()],
            vec!["d".into()],
        ]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.rows()[1], vec!["d".to_string(), String::new(), String::new()]);
        assert_eq!(table.row_count(), 2);
    }
}
