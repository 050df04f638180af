// src/document/builder.rs
use crate::document::model::{RenderedDocument, Table, LIST_BULLET, NORMAL};
use crate::extractors::markup::{classify_lines, MarkupLine};

/// Turns section markup into a [`RenderedDocument`], one line at a time.
///
/// Consecutive table rows are buffered and emitted as one table as soon as a
/// non-table line arrives or the section ends. Blocks come out in input order.
pub struct DocumentBuilder {
    doc: RenderedDocument,
    pending_rows: Vec<Vec<String>>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            doc: RenderedDocument::new(),
            pending_rows: Vec::new(),
        }
    }

    /// Builds a document from section markup given in section order.
    pub fn build<'a, I>(sections: I) -> RenderedDocument
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = Self::new();
        for markup in sections {
            builder.add_section(markup);
        }
        builder.finish()
    }

    /// Appends one section. A table still open at the end of the section is
    /// flushed here, so tables never span sections.
    pub fn add_section(&mut self, markup: &str) {
        for line in classify_lines(markup) {
            self.push_line(line);
        }
        self.flush_table();
    }

    pub fn finish(mut self) -> RenderedDocument {
        self.flush_table();
        self.doc
    }

    fn push_line(&mut self, line: MarkupLine) {
        match line {
            MarkupLine::TableRow(cells) => self.pending_rows.push(cells),
            MarkupLine::Heading { level, text } => {
                self.flush_table();
                self.doc.add_heading(text, level);
            }
            MarkupLine::Bullet(spans) => {
                self.flush_table();
                self.doc.add_paragraph(LIST_BULLET, spans);
            }
            MarkupLine::Plain(spans) => {
                self.flush_table();
                self.doc.add_paragraph(NORMAL, spans);
            }
        }
    }

    fn flush_table(&mut self) {
        if self.pending_rows.is_empty() {
            return;
        }
        let table = Table::new(std::mem::take(&mut self.pending_rows));
        tracing::trace!("Emitting {}x{} table", table.row_count(), table.column_count());
        self.doc.add_table(table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::Block;
    use crate::extractors::markup::{classify, Span};

    /// Structural fingerprint shared by classified lines and emitted blocks.
    /// Tables are compared by cell count after padding to the widest row.
    #[derive(Debug, PartialEq, Eq)]
    enum Shape {
        Heading(u8),
        Bullet,
        Table(usize),
        Plain,
    }

    fn block_shapes(doc: &RenderedDocument) -> Vec<Shape> {
        doc.blocks()
            .iter()
            .map(|b| match b {
                Block::Heading { level, .. } => Shape::Heading(*level),
                Block::Paragraph { style, .. } if style == LIST_BULLET => Shape::Bullet,
                Block::Paragraph { .. } => Shape::Plain,
                Block::Table(t) => Shape::Table(t.row_count() * t.column_count()),
            })
            .collect()
    }

    // Line-by-line classification with contiguous rows folded into one table.
    fn classified_shapes(markup: &str) -> Vec<Shape> {
        fn close(open_table: &mut Option<(usize, usize)>, shapes: &mut Vec<Shape>) {
            if let Some((rows, width)) = open_table.take() {
                shapes.push(Shape::Table(rows * width));
            }
        }

        let mut shapes = Vec::new();
        // (rows, widest row) of the table run in progress.
        let mut open_table: Option<(usize, usize)> = None;
        for line in markup.lines() {
            let shape = match classify(line) {
                MarkupLine::TableRow(cells) => {
                    let (rows, width) = open_table.get_or_insert((0, 0));
                    *rows += 1;
                    *width = (*width).max(cells.len());
                    continue;
                }
                MarkupLine::Heading { level, .. } => Shape::Heading(level),
                MarkupLine::Bullet(_) => Shape::Bullet,
                MarkupLine::Plain(_) => Shape::Plain,
            };
            close(&mut open_table, &mut shapes);
            shapes.push(shape);
        }
        close(&mut open_table, &mut shapes);
        shapes
    }

    #[test]
    fn test_heading_bullet_table_makes_three_blocks() {
        let doc = DocumentBuilder::build(["### Roadmap\n* Ship **Q3** plan\n| Item | Owner |\n| API | Lan |"]);
        assert_eq!(
            block_shapes(&doc),
            vec![Shape::Heading(2), Shape::Bullet, Shape::Table(4)]
        );
    }

    #[test]
    fn test_table_flushes_before_next_line_and_keeps_it() {
        let doc = DocumentBuilder::build(["|a|b|\n|c|d|\nAfter the table"]);
        let blocks = doc.blocks();
        assert_eq!(blocks.len(), 2);

        match &blocks[0] {
            Block::Table(t) => {
                assert_eq!(t.row_count(), 2);
                assert_eq!(t.rows()[1], vec!["c".to_string(), "d".to_string()]);
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert_eq!(
            blocks[1],
            Block::Paragraph { style: NORMAL.into(), runs: vec![Span::plain("After the table")] }
        );
    }

    #[test]
    fn test_table_at_end_of_input_still_flushes() {
        let doc = DocumentBuilder::build(["Intro\n|x|y|\n|1|2|\n|3|4|"]);
        assert_eq!(block_shapes(&doc), vec![Shape::Plain, Shape::Table(6)]);
    }

    #[test]
    fn test_separate_runs_make_separate_tables() {
        let doc = DocumentBuilder::build(["|a|\nbreak\n|b|"]);
        assert_eq!(
            block_shapes(&doc),
            vec![Shape::Table(1), Shape::Plain, Shape::Table(1)]
        );
    }

    #[test]
    fn test_tables_do_not_span_sections() {
        let doc = DocumentBuilder::build(["|a|b|", "|c|d|"]);
        assert_eq!(block_shapes(&doc), vec![Shape::Table(2), Shape::Table(2)]);
    }

    #[test]
    fn test_sections_keep_their_order() {
        let doc = DocumentBuilder::build(["### First", "### Second", "### Third"]);
        let titles: Vec<&str> = doc
            .blocks()
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_rendered_structure_matches_direct_classification() {
        let samples = [
            "### A\n#### B\n* one\n* **two**\nplain\n|h1|h2|h3|\n|1|2|3|\n* after",
            "|x|\n|y|\n|z|",
            "",
            "text with **bold** and |pipe\n\n#### Deep\n|a|b|\n## not a heading",
            "* a\n|1|2|\n### H\n|3|4|\n|5|6|",
            "|a|b|c|\n|d|\n* ragged rows pad to the widest",
        ];
        for markup in samples {
            let doc = DocumentBuilder::build([markup]);
            assert_eq!(block_shapes(&doc), classified_shapes(markup), "markup: {:?}", markup);
        }
    }

    #[test]
    fn test_ragged_table_is_padded_to_widest_row() {
        let doc = DocumentBuilder::build(["|a|b|c|\n|d|"]);
        match &doc.blocks()[0] {
            Block::Table(t) => {
                assert_eq!(t.column_count(), 3);
                assert_eq!(t.rows()[1], vec!["d".to_string(), String::new(), String::new()]);
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert_eq!(block_shapes(&doc), vec![Shape::Table(6)]);
    }

    #[test]
    fn test_bullet_runs_keep_emphasis() {
        let doc = DocumentBuilder::build(["* a **b** c"]);
        assert_eq!(
            doc.blocks()[0],
            Block::Paragraph {
                style: LIST_BULLET.into(),
                runs: vec![Span::plain("a "), Span::bold("b"), Span::plain(" c")],
            }
        );
    }
}
