// src/document/testing.rs
//! Reads a packed .docx back into a flat, comparable form for tests.

use docx_rs::{
    read_docx, Bold, DocumentChild, Paragraph, ParagraphChild, TableCellContent, TableChild,
    TableRowChild,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackedBlock {
    Paragraph { style: String, text: String },
    Table { rows: Vec<Vec<String>>, bold_rows: Vec<bool> },
}

#[derive(Debug, Clone)]
pub struct Packed {
    pub style_ids: Vec<String>,
    pub blocks: Vec<PackedBlock>,
}

impl Packed {
    /// All text in the body: paragraph text and every table cell.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .flat_map(|block| match block {
                PackedBlock::Paragraph { text, .. } => vec![text.clone()],
                PackedBlock::Table { rows, .. } => rows.iter().flatten().cloned().collect(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, PackedBlock::Table { .. }))
            .count()
    }

    pub fn paragraph_count(&self) -> usize {
        self.blocks.len() - self.table_count()
    }
}

pub fn read_back(bytes: &[u8]) -> Packed {
    let docx = read_docx(bytes).expect("packed document should read back");
    let style_ids = docx.styles.styles.iter().map(|s| s.style_id.clone()).collect();
    let blocks = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(PackedBlock::Paragraph {
                style: paragraph_style(p),
                text: p.raw_text(),
            }),
            DocumentChild::Table(t) => {
                let rows: Vec<Vec<&Paragraph>> = t
                    .rows
                    .iter()
                    .map(|TableChild::TableRow(row)| {
                        row.cells
                            .iter()
                            .flat_map(|TableRowChild::TableCell(cell)| {
                                cell.children.iter().filter_map(|content| match content {
                                    TableCellContent::Paragraph(p) => Some(p.as_ref()),
                                    _ => None,
                                })
                            })
                            .collect()
                    })
                    .collect();
                Some(PackedBlock::Table {
                    bold_rows: rows.iter().map(|cells| cells.iter().all(|p| is_bold(p))).collect(),
                    rows: rows
                        .iter()
                        .map(|cells| cells.iter().map(|p| p.raw_text()).collect())
                        .collect(),
                })
            }
            _ => None,
        })
        .collect();

    Packed { style_ids, blocks }
}

fn paragraph_style(p: &Paragraph) -> String {
    p.property
        .style
        .as_ref()
        .map(|s| s.val.clone())
        .unwrap_or_else(|| "Normal".to_string())
}

fn is_bold(p: &Paragraph) -> bool {
    let mut runs = p.children.iter().filter_map(|child| match child {
        ParagraphChild::Run(run) => Some(run),
        _ => None,
    });
    runs.all(|run| run.run_property.bold == Some(Bold::new()))
}
