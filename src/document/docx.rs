// src/document/docx.rs
//! Serializes a [`RenderedDocument`] into a WordprocessingML (.docx) package.

use std::io::{Seek, Write};

use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, SpecialIndentType, Start, Style, StyleType, Table, TableCell,
    TableRow,
};

use crate::document::model::{
    heading_style_name, Block, RenderedDocument, StyleDef, Table as GridTable, LIST_BULLET,
    NORMAL, QUARTER_INCH_TWIPS,
};
use crate::extractors::markup::Span;
use crate::utils::error::DocumentError;

pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const BULLET_NUMBERING_ID: usize = 1;
const BULLET_GLYPH: &str = "\u{2022}";

/// Writes `doc` as a .docx archive into `writer`.
pub fn write_docx<W: Write + Seek>(doc: &RenderedDocument, writer: W) -> Result<(), DocumentError> {
    to_docx(doc)
        .build()
        .pack(writer)
        .map_err(|e| DocumentError::Pack(e.to_string()))
}

/// Converts the document graph into a `docx_rs::Docx` ready to pack.
pub fn to_docx(doc: &RenderedDocument) -> Docx {
    let mut docx = Docx::new()
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new(BULLET_GLYPH),
                    LevelJc::new("left"),
                )
                .indent(
                    Some(QUARTER_INCH_TWIPS),
                    Some(SpecialIndentType::Hanging(QUARTER_INCH_TWIPS)),
                    None,
                    None,
                ),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    // docx-rs always writes its own bare `Normal` style, so the body size
    // goes into the document defaults instead of a second `Normal`.
    if let Some(normal) = doc.styles().get(NORMAL) {
        docx = docx.default_size(half_points(normal.font_size_pt));
    }
    for style in doc.styles().iter().filter(|s| s.name != NORMAL) {
        docx = docx.add_style(paragraph_style(style));
    }
    tracing::debug!(
        "Packing {} blocks with {} styles",
        doc.blocks().len(),
        doc.styles().len()
    );

    for block in doc.blocks() {
        docx = match block {
            Block::Heading { level, text } => docx.add_paragraph(
                Paragraph::new()
                    .style(&style_id(&heading_style_name(*level)))
                    .add_run(Run::new().add_text(text.as_str())),
            ),
            Block::Paragraph { style, runs } => docx.add_paragraph(paragraph(style, runs)),
            Block::Table(table) => docx.add_table(grid_table(table)),
        };
    }

    docx
}

fn style_id(name: &str) -> String {
    name.split_whitespace().collect()
}

// docx sizes are in half-points.
fn half_points(pt: u32) -> usize {
    pt as usize * 2
}

fn paragraph_style(def: &StyleDef) -> Style {
    let mut style = Style::new(def.id(), StyleType::Paragraph)
        .name(def.name.as_str())
        .size(half_points(def.font_size_pt));

    if let Some(color) = &def.color {
        style = style.color(color.as_str());
    }
    if def.bold {
        style = style.bold();
    }
    if def.left_indent_twips.is_some() || def.first_line_indent_twips.is_some() {
        let special = def.first_line_indent_twips.map(|first| {
            if first < 0 {
                SpecialIndentType::Hanging(-first)
            } else {
                SpecialIndentType::FirstLine(first)
            }
        });
        style = style.indent(def.left_indent_twips, special, None, None);
    }
    style
}

fn paragraph(style: &str, runs: &[Span]) -> Paragraph {
    let mut p = Paragraph::new().style(&style_id(style));
    if style == LIST_BULLET {
        p = p.numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0));
    }
    for span in runs {
        p = p.add_run(text_run(&span.text, span.bold));
    }
    p
}

fn text_run(text: &str, bold: bool) -> Run {
    let run = Run::new().add_text(text);
    if bold { run.bold() } else { run }
}

// Header row (row 0) is bold.
fn grid_table(table: &GridTable) -> Table {
    let rows = table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cells = row
                .iter()
                .map(|cell| TableCell::new().add_paragraph(Paragraph::new().add_run(text_run(cell, i == 0))))
                .collect();
            TableRow::new(cells)
        })
        .collect();
    Table::new(rows)
}
