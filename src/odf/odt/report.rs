//! Imperative report builder.
//!
//! [`ReportBuilder`] writes a document the way a report is read: headings,
//! paragraphs and markup go to the current insertion point, which is the
//! document body or, while a table row is being filled, the current cell.
//! Tables get their cell borders from the layout presets, and every paragraph
//! without an explicit style gets the default style of the current scope
//! (body text, table text or table header).

use super::config::ReportConfig;
use super::document::TextDocument;
use super::layout::{BorderPreset, ColumnKind, SpanCounter};
use super::markup::{ConvertOptions, MarkupConverter};
use crate::common::{Error, Result};
use crate::odf::elements::{
    Children, Heading, Image, ImageCrateProbe, ImageSizeProbe, Node, Paragraph, Table, TableCell,
    ValueType, decode_data_url,
};
use crate::odf::style::{Direction, Padding, ParagraphStyle, TableCellStyle};
use log::{debug, warn};
use std::path::Path;

/// Options of a table started with [`ReportBuilder::begin_table`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Draw cell borders
    pub lines: bool,
    /// Padding of every cell
    pub padding: Padding,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            lines: true,
            padding: Padding::uniform("1pt"),
        }
    }
}

impl TableOptions {
    pub fn with_lines(mut self, lines: bool) -> Self {
        self.lines = lines;
        self
    }

    /// Override the padding of one side, or of all sides
    pub fn with_padding(mut self, direction: Direction, padding: &str) -> Self {
        let value = Some(padding.to_string());
        match direction {
            Direction::All => self.padding.all = value,
            Direction::Top => self.padding.top = value,
            Direction::Left => self.padding.left = value,
            Direction::Bottom => self.padding.bottom = value,
            Direction::Right => self.padding.right = value,
        }
        self
    }
}

/// Where content currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Body,
    Cell { table: usize, row: usize, cell: usize },
}

/// State of the table being built.
#[derive(Debug, Clone)]
struct TableContext {
    /// Body position of the table
    table: usize,
    columns: usize,
    row: Option<usize>,
    /// 1-based column of the current cell, 0 before the first cell of a row
    current_column: usize,
    span: SpanCounter,
    lines: bool,
    padding: Padding,
}

fn table_at(document: &mut TextDocument, index: usize) -> Result<&mut Table> {
    document
        .body_mut()
        .get_mut(index)
        .and_then(Node::as_table_mut)
        .ok_or_else(|| Error::DetachedTarget(format!("table at body position {}", index)))
}

/// Builder for report documents.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::odt::{ReportBuilder, TableOptions};
///
/// # fn main() -> flat_odt::Result<()> {
/// let mut report = ReportBuilder::new();
/// report.add_heading("Inventory", 1)?;
/// report.add_markup("<p>Counted on <b>Monday</b>.</p>", 2)?;
///
/// report.begin_table(2, TableOptions::default());
/// report.set_table_column_widths_rel(&[3.0, 1.0])?;
/// report.add_head_row(&["Item", "Count"])?;
/// report.add_row(&["Bolts", "120"], 0)?;
/// report.add_row(&["Nuts", "80"], 0)?;
/// report.end_table();
///
/// let xml = report.to_xml_string();
/// assert!(xml.contains("Bolts"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    document: TextDocument,
    config: ReportConfig,
    standard_style: ParagraphStyle,
    table_style: ParagraphStyle,
    table_header_style: ParagraphStyle,
    code_style: ParagraphStyle,
    active_style: ParagraphStyle,
    table: Option<TableContext>,
    target: Target,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Create a builder from a configuration.
    ///
    /// The configured fonts are declared on the new document and the body
    /// text style becomes the active default.
    pub fn with_config(config: ReportConfig) -> Self {
        let mut document = TextDocument::new();
        for font in &config.fonts {
            document.declare_font(font.clone());
        }
        let standard_style = config.standard.to_style();

        Self {
            document,
            table_style: config.table.to_style(),
            table_header_style: config.table_header.to_style(),
            code_style: config.code.to_style(),
            active_style: standard_style.clone(),
            standard_style,
            config,
            table: None,
            target: Target::Body,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    /// Mutable access to the document.
    ///
    /// Removing the open table from the body makes later table operations
    /// fail with [`Error::DetachedTarget`].
    pub fn document_mut(&mut self) -> &mut TextDocument {
        &mut self.document
    }

    pub fn into_document(self) -> TextDocument {
        self.document
    }

    /// Default style of paragraphs added now
    pub fn active_style(&self) -> &ParagraphStyle {
        &self.active_style
    }

    pub fn standard_style(&self) -> &ParagraphStyle {
        &self.standard_style
    }

    pub fn table_style(&self) -> &ParagraphStyle {
        &self.table_style
    }

    pub fn table_header_style(&self) -> &ParagraphStyle {
        &self.table_header_style
    }

    pub fn code_style(&self) -> &ParagraphStyle {
        &self.code_style
    }

    pub fn to_xml_string(&self) -> String {
        self.document.to_xml_string()
    }

    pub fn save_flat<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.document.save_flat(path)
    }

    /// Container content currently goes to
    fn target_mut(&mut self) -> Result<&mut Children<Node>> {
        match self.target {
            Target::Body => Ok(self.document.body_mut()),
            Target::Cell { table, row, cell } => table_at(&mut self.document, table)?
                .get_row_mut(row)
                .and_then(|r| r.get_cell_mut(cell))
                .map(TableCell::content_mut)
                .ok_or_else(|| {
                    Error::DetachedTarget(format!("cell {} of row {} of table {}", cell, row, table))
                }),
        }
    }

    /// Add a paragraph to the current insertion point
    ///
    /// # Arguments
    ///
    /// * `text` - Text of the paragraph
    /// * `style` - Style to use instead of the active default style
    pub fn add_paragraph(
        &mut self,
        text: &str,
        style: Option<&ParagraphStyle>,
    ) -> Result<&mut Paragraph> {
        let style = style.cloned().unwrap_or_else(|| self.active_style.clone());
        let paragraph = Paragraph::with_style(text, Some(&style));
        Ok(self.target_mut()?.append_paragraph(paragraph))
    }

    /// Add a paragraph in the code style
    pub fn add_code_paragraph(&mut self, text: &str) -> Result<&mut Paragraph> {
        let paragraph = Paragraph::with_style(text, Some(&self.code_style));
        Ok(self.target_mut()?.append_paragraph(paragraph))
    }

    /// Add a heading; levels below 1 are raised to 1
    pub fn add_heading(&mut self, text: &str, level: u8) -> Result<&mut Heading> {
        Ok(self.target_mut()?.append_heading(Heading::new(text, level)))
    }

    /// Convert markup into the current insertion point.
    ///
    /// `<h1>` becomes a heading of `level`, `<h2>` one of `level + 1` and so
    /// on. Paragraphs and list items get the active default style.
    pub fn add_markup(&mut self, markup: &str, level: u8) -> Result<()> {
        let options = ConvertOptions {
            base_level: level,
            paragraph_style: Some(self.active_style.clone()),
            list_nesting: self.config.list_nesting,
        };
        MarkupConverter::new(self.target_mut()?, options).convert(markup)
    }

    /// Table options with lines and the configured padding
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            lines: true,
            padding: self.config.table_padding.clone(),
        }
    }

    /// Start a table with `columns` columns at the end of the body.
    ///
    /// Fill it with [`add_head_row`](Self::add_head_row) and
    /// [`add_row`](Self::add_row). Starting a table while another one is open
    /// abandons the open one; its rows stay in the document.
    pub fn begin_table(&mut self, columns: usize, options: TableOptions) {
        if self.table.is_some() {
            warn!("Starting a table while another table is still open");
        }

        self.document.add_table(columns);
        self.table = Some(TableContext {
            table: self.document.body().len() - 1,
            columns,
            row: None,
            current_column: 0,
            span: SpanCounter::new(),
            lines: options.lines,
            padding: options.padding,
        });
        self.target = Target::Body;
        self.active_style = self.table_style.clone();
    }

    pub fn is_table_open(&self) -> bool {
        self.table.is_some()
    }

    /// 1-based column of the current cell, if a cell is current
    pub fn current_column(&self) -> Option<usize> {
        self.table
            .as_ref()
            .map(|ctx| ctx.current_column)
            .filter(|&column| column > 0)
    }

    /// Set relative column widths of the open table.
    ///
    /// Values beyond the column count are ignored; columns without a value
    /// keep their width.
    pub fn set_table_column_widths_rel(&mut self, widths: &[f64]) -> Result<()> {
        let ctx = self.table.as_ref().ok_or(Error::NoOpenTable {
            operation: "set column widths",
        })?;
        let table = table_at(&mut self.document, ctx.table)?;
        for (index, &width) in widths.iter().enumerate() {
            if let Some(column) = table.column_mut(index) {
                column.style_mut().set_relative_width(width);
            }
        }
        Ok(())
    }

    /// Set absolute column widths such as `3.4cm`, with the same rules as
    /// [`set_table_column_widths_rel`](Self::set_table_column_widths_rel)
    pub fn set_table_column_widths(&mut self, widths: &[&str]) -> Result<()> {
        let ctx = self.table.as_ref().ok_or(Error::NoOpenTable {
            operation: "set column widths",
        })?;
        let table = table_at(&mut self.document, ctx.table)?;
        for (index, width) in widths.iter().enumerate() {
            if let Some(column) = table.column_mut(index) {
                column.style_mut().set_width(width);
            }
        }
        Ok(())
    }

    /// Add a header row.
    ///
    /// Each value goes to its own cell in the header style. Without values
    /// only the first cell is created. Header rows end any running span.
    pub fn add_head_row(&mut self, data: &[&str]) -> Result<()> {
        self.start_row("add a header row", None)?;
        self.active_style = self.table_header_style.clone();
        self.fill_row(data)
    }

    /// Add a row.
    ///
    /// `span > 0` starts a block of `span` rows framed as one: the following
    /// rows continue the block until it is exhausted.
    pub fn add_row(&mut self, data: &[&str], span: usize) -> Result<()> {
        self.start_row("add a row", Some(span))?;
        self.active_style = self.table_style.clone();
        self.fill_row(data)
    }

    fn start_row(&mut self, operation: &'static str, span: Option<usize>) -> Result<()> {
        let ctx = self.table.as_mut().ok_or(Error::NoOpenTable { operation })?;
        let table = table_at(&mut self.document, ctx.table)?;
        table.add_row();
        ctx.row = Some(table.size() - 1);
        ctx.current_column = 0;
        match span {
            Some(span) => ctx.span.start_row(span),
            None => ctx.span.reset(),
        }
        Ok(())
    }

    fn fill_row(&mut self, data: &[&str]) -> Result<()> {
        if data.is_empty() {
            self.add_column()?;
            return Ok(());
        }

        let columns = self.table.as_ref().map_or(0, |ctx| ctx.columns);
        if data.len() > columns {
            warn!(
                "Row has {} values for {} declared columns; extra values go to the last cell",
                data.len(),
                columns
            );
        }
        for value in data {
            self.next_cell()?;
            if self.current_column().is_none() {
                warn!("Dropping row value of a table without columns");
                continue;
            }
            self.add_paragraph(value, None)?;
        }
        Ok(())
    }

    /// Move to the next cell of the current row.
    ///
    /// Returns `false` without creating a cell when the row already has as
    /// many cells as the table has columns; the current cell stays the last
    /// one.
    pub fn add_column(&mut self) -> Result<bool> {
        let added = self.next_cell()?;
        if !added {
            warn!("Ignoring a column beyond the declared column count");
        }
        Ok(added)
    }

    fn next_cell(&mut self) -> Result<bool> {
        let ctx = self.table.as_mut().ok_or(Error::NoOpenTable {
            operation: "add a column",
        })?;
        let row = ctx.row.ok_or(Error::NoOpenRow {
            operation: "add a column",
        })?;
        if ctx.current_column >= ctx.columns {
            return Ok(false);
        }
        ctx.current_column += 1;

        let mut style = TableCellStyle::new();
        if ctx.lines {
            let column = ColumnKind::classify(ctx.current_column, ctx.columns);
            BorderPreset::select(ctx.span.row_kind(), column).apply_to(&mut style, &self.config.borders);
        }
        ctx.padding.apply(&mut style);

        let mut cell = TableCell::empty(ValueType::String);
        cell.set_style(style);

        let table = table_at(&mut self.document, ctx.table)?;
        let table_row = table.get_row_mut(row).ok_or_else(|| {
            Error::DetachedTarget(format!("row {} of table {}", row, ctx.table))
        })?;
        table_row.add_cell(cell);

        self.target = Target::Cell {
            table: ctx.table,
            row,
            cell: table_row.size() - 1,
        };
        Ok(true)
    }

    /// Close the open table; content goes to the body again
    pub fn end_table(&mut self) {
        if self.table.take().is_none() {
            debug!("end_table called without an open table");
        }
        self.active_style = self.standard_style.clone();
        self.target = Target::Body;
    }

    /// Add an image given as a `data:` URL in a new paragraph.
    ///
    /// `width` is in centimeters. Without `height` the height is computed
    /// from the pixel size of the image so that the aspect ratio is kept.
    pub fn add_image_data(&mut self, data_url: &str, width: f64, height: Option<f64>) -> Result<()> {
        self.add_image_data_with_probe(data_url, width, height, &ImageCrateProbe)
    }

    /// [`add_image_data`](Self::add_image_data) with a custom size probe
    pub fn add_image_data_with_probe(
        &mut self,
        data_url: &str,
        width: f64,
        height: Option<f64>,
        probe: &dyn ImageSizeProbe,
    ) -> Result<()> {
        let (_, data) = decode_data_url(data_url)?;
        let height = match height {
            Some(height) => height,
            None => {
                let (pixel_width, pixel_height) = probe.probe(&data)?;
                if pixel_width == 0 {
                    return Err(Error::InvalidImage("image has zero width".to_string()));
                }
                width * f64::from(pixel_height) / f64::from(pixel_width)
            },
        };

        let style = self.active_style.clone();
        let paragraph = self
            .target_mut()?
            .append_paragraph(Paragraph::with_style("", Some(&style)));
        paragraph.add_image(Image::new(data, width, height));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::TableRow;

    fn table(report: &ReportBuilder, index: usize) -> &Table {
        report.document().body().get(index).unwrap().as_table().unwrap()
    }

    fn cell_texts(row: &TableRow) -> Vec<String> {
        row.get_cells()
            .iter()
            .map(|cell| {
                cell.content()
                    .iter()
                    .filter_map(|node| node.as_paragraph())
                    .map(|p| p.text())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect()
    }

    fn first_paragraph_style(cell: &TableCell) -> Option<&ParagraphStyle> {
        cell.content().get(0)?.as_paragraph()?.style()
    }

    struct FixedProbe(u32, u32);

    impl ImageSizeProbe for FixedProbe {
        fn probe(&self, _data: &[u8]) -> Result<(u32, u32)> {
            Ok((self.0, self.1))
        }
    }

    struct FailingProbe;

    impl ImageSizeProbe for FailingProbe {
        fn probe(&self, _data: &[u8]) -> Result<(u32, u32)> {
            Err(Error::InvalidImage("unreadable".to_string()))
        }
    }

    #[test]
    fn test_default_fonts_are_declared() {
        let report = ReportBuilder::new();
        let names: Vec<&str> = report.document().fonts().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Ubuntu Mono", "Arial"]);
        assert_eq!(report.active_style(), report.standard_style());
    }

    #[test]
    fn test_table_operations_need_an_open_table() {
        let mut report = ReportBuilder::new();
        assert!(matches!(
            report.add_row(&["a"], 0),
            Err(Error::NoOpenTable { .. })
        ));
        assert!(matches!(
            report.add_head_row(&[]),
            Err(Error::NoOpenTable { .. })
        ));
        assert!(matches!(report.add_column(), Err(Error::NoOpenTable { .. })));
        assert!(matches!(
            report.set_table_column_widths(&["1cm"]),
            Err(Error::NoOpenTable { .. })
        ));
        assert!(matches!(
            report.set_table_column_widths_rel(&[1.0]),
            Err(Error::NoOpenTable { .. })
        ));

        report.begin_table(2, TableOptions::default());
        assert!(matches!(report.add_column(), Err(Error::NoOpenRow { .. })));
    }

    #[test]
    fn test_column_overflow_keeps_declared_cells() {
        let mut report = ReportBuilder::new();
        report.begin_table(2, TableOptions::default());
        report.add_row(&["a", "b", "c"], 0).unwrap();

        assert_eq!(report.add_column().unwrap(), false);
        assert_eq!(report.current_column(), Some(2));
        report.add_paragraph("extra", None).unwrap();

        let row = table(&report, 0).get_row(0).unwrap();
        assert_eq!(row.size(), 2);
        assert_eq!(cell_texts(row), ["a", "b|c|extra"]);
    }

    #[test]
    fn test_overflowing_row_values_go_to_last_cell() {
        let mut report = ReportBuilder::new();
        report.begin_table(2, TableOptions::default());
        report.add_row(&["a", "b", "c", "d"], 0).unwrap();
        report.add_head_row(&["h1", "h2", "h3"]).unwrap();

        let t = table(&report, 0);
        assert_eq!(cell_texts(t.get_row(0).unwrap()), ["a", "b|c|d"]);
        assert_eq!(cell_texts(t.get_row(1).unwrap()), ["h1", "h2|h3"]);

        let last = t.get_row(1).unwrap().get_cell(1).unwrap();
        assert!(last
            .content()
            .iter()
            .all(|node| node.as_paragraph().unwrap().style() == Some(report.table_header_style())));
    }

    #[test]
    fn test_row_values_of_table_without_columns_are_dropped() {
        let mut report = ReportBuilder::new();
        report.begin_table(0, TableOptions::default());
        report.add_row(&["lost"], 0).unwrap();
        report.end_table();

        assert_eq!(table(&report, 0).get_row(0).unwrap().size(), 0);
        assert_eq!(report.document().body().len(), 1);
    }

    #[test]
    fn test_huge_span_starts_a_block() {
        let mut report = ReportBuilder::new();
        report.begin_table(1, TableOptions::default());
        report.add_row(&["x"], 1usize << 63).unwrap();
        report.add_row(&["y"], usize::MAX).unwrap();

        for index in 0..2 {
            let style = table(&report, 0).get_row(index).unwrap().get_cell(0).unwrap().style();
            assert_eq!(style.border(Direction::Top), Some("1pt solid #000000"));
            assert_eq!(style.border(Direction::Bottom), Some("none"));
        }
    }

    #[test]
    fn test_row_without_data_opens_first_cell() {
        let mut report = ReportBuilder::new();
        report.begin_table(3, TableOptions::default());
        report.add_row(&[], 0).unwrap();
        assert_eq!(report.current_column(), Some(1));
        report.add_paragraph("one", None).unwrap();
        assert!(report.add_column().unwrap());
        report.add_markup("<p>two</p>", 1).unwrap();

        let row = table(&report, 0).get_row(0).unwrap();
        assert_eq!(cell_texts(row), ["one", "two"]);
        assert_eq!(
            first_paragraph_style(row.get_cell(1).unwrap()),
            Some(report.table_style())
        );
    }

    #[test]
    fn test_span_borders_in_first_column() {
        let mut report = ReportBuilder::new();
        report.begin_table(3, TableOptions::default());
        report.add_row(&["1", "2", "3"], 3).unwrap();
        report.add_row(&["1", "2", "3"], 0).unwrap();
        report.add_row(&["1", "2", "3"], 0).unwrap();
        report.add_row(&["1", "2", "3"], 0).unwrap();

        let thick = "1pt solid #000000";
        let none = "none";
        let expected = [
            (thick, none),  // top row: closed at the top, open below
            (none, none),   // middle row
            (none, thick),  // bottom row
            (thick, thick), // single row
        ];
        for (index, (top, bottom)) in expected.iter().enumerate() {
            let style = table(&report, 0).get_row(index).unwrap().get_cell(0).unwrap().style();
            assert_eq!(style.border(Direction::Top), Some(*top), "row {index}");
            assert_eq!(style.border(Direction::Bottom), Some(*bottom), "row {index}");
            assert_eq!(style.border(Direction::Left), Some(thick));
            assert_eq!(style.padding(Direction::All), Some("1pt"));
        }
    }

    #[test]
    fn test_header_row_resets_span_and_style() {
        let mut report = ReportBuilder::new();
        report.begin_table(2, TableOptions::default());
        report.add_row(&["a", "b"], 3).unwrap();
        report.add_head_row(&["H1", "H2"]).unwrap();
        report.add_row(&["c", "d"], 0).unwrap();

        let t = table(&report, 0);
        let header = t.get_row(1).unwrap().get_cell(1).unwrap();
        assert_eq!(header.style().border(Direction::Top), Some("1pt solid #000000"));
        assert_eq!(header.style().border(Direction::Bottom), Some("1pt solid #000000"));
        assert_eq!(first_paragraph_style(header), Some(report.table_header_style()));

        let after = t.get_row(2).unwrap().get_cell(0).unwrap();
        assert_eq!(after.style().border(Direction::Bottom), Some("1pt solid #000000"));
        assert_eq!(first_paragraph_style(after), Some(report.table_style()));
    }

    #[test]
    fn test_table_without_lines_keeps_padding() {
        let mut report = ReportBuilder::new();
        let options = TableOptions::default()
            .with_lines(false)
            .with_padding(Direction::Left, "1.5mm");
        report.begin_table(1, options);
        report.add_row(&["x"], 0).unwrap();

        let style = table(&report, 0).get_row(0).unwrap().get_cell(0).unwrap().style();
        assert_eq!(style.border(Direction::Top), None);
        assert_eq!(style.padding(Direction::All), Some("1pt"));
        assert_eq!(style.padding(Direction::Left), Some("1.5mm"));
    }

    #[test]
    fn test_reopening_keeps_first_table() {
        let mut report = ReportBuilder::new();
        report.begin_table(2, TableOptions::default());
        report.add_row(&["a", "b"], 0).unwrap();
        report.begin_table(3, TableOptions::default());
        report.add_row(&["x", "y", "z"], 0).unwrap();
        report.end_table();

        assert_eq!(report.document().body().len(), 2);
        assert_eq!(cell_texts(table(&report, 0).get_row(0).unwrap()), ["a", "b"]);
        assert_eq!(cell_texts(table(&report, 1).get_row(0).unwrap()), ["x", "y", "z"]);
    }

    #[test]
    fn test_end_table_restores_body_scope() {
        let mut report = ReportBuilder::new();
        report.begin_table(1, TableOptions::default());
        report.add_row(&["cell"], 0).unwrap();
        report.end_table();
        report.add_paragraph("after", None).unwrap();
        report.add_code_paragraph("let x = 1;").unwrap();

        let body = report.document().body();
        let after = body.get(1).unwrap().as_paragraph().unwrap();
        assert_eq!(after.style(), Some(report.standard_style()));
        let code = body.get(2).unwrap().as_paragraph().unwrap();
        assert_eq!(code.style(), Some(report.code_style()));
        assert!(!report.is_table_open());
    }

    #[test]
    fn test_column_widths() {
        let mut report = ReportBuilder::new();
        report.begin_table(2, TableOptions::default());
        report.set_table_column_widths_rel(&[1.0, 2.0, 3.0]).unwrap();
        let columns = table(&report, 0).columns();
        assert_eq!(columns[1].style().relative_width(), Some(2.0));

        report.begin_table(2, TableOptions::default());
        report.set_table_column_widths(&["3cm"]).unwrap();
        let columns = table(&report, 1).columns();
        assert_eq!(columns[0].style().width(), Some("3cm"));
        assert_eq!(columns[1].style().width(), None);
        assert!(columns[1].style().use_optimal_width());
    }

    #[test]
    fn test_removed_table_is_detached() {
        let mut report = ReportBuilder::new();
        report.begin_table(1, TableOptions::default());
        report.document_mut().body_mut().clear();
        assert!(matches!(
            report.add_row(&["x"], 0),
            Err(Error::DetachedTarget(_))
        ));
    }

    #[test]
    fn test_image_height_follows_aspect_ratio() {
        let mut report = ReportBuilder::new();
        let url = "data:image/png;base64,AAAA";
        report
            .add_image_data_with_probe(url, 4.0, None, &FixedProbe(200, 100))
            .unwrap();
        report
            .add_image_data_with_probe(url, 4.0, Some(1.0), &FailingProbe)
            .unwrap();

        let heights: Vec<f64> = report
            .document()
            .body()
            .iter()
            .filter_map(|node| node.as_paragraph())
            .map(|p| p.images().get(0).unwrap().height())
            .collect();
        assert_eq!(heights, [2.0, 1.0]);
    }

    #[test]
    fn test_image_errors() {
        let mut report = ReportBuilder::new();
        assert!(matches!(
            report.add_image_data_with_probe("data:image/png;base64,AAAA", 4.0, None, &FixedProbe(0, 10)),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            report.add_image_data_with_probe("data:image/png;base64,AAAA", 4.0, None, &FailingProbe),
            Err(Error::InvalidImage(_))
        ));
        assert!(report.document().body().is_empty());
    }

    #[cfg(feature = "image-probe")]
    #[test]
    fn test_image_from_png_data_url() {
        use base64::{Engine as _, engine::general_purpose::STANDARD};

        let mut png = Vec::new();
        image::RgbImage::new(40, 10)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let url = format!("data:image/png;base64,{}", STANDARD.encode(&png));

        let mut report = ReportBuilder::new();
        report.add_image_data(&url, 8.0, None).unwrap();

        let paragraph = report.document().body().get(0).unwrap().as_paragraph().unwrap();
        let image = paragraph.images().get(0).unwrap();
        assert_eq!(image.height(), 2.0);
        assert_eq!(image.data(), png.as_slice());
    }

    #[test]
    fn test_serialized_report_deduplicates_cell_styles() {
        let mut report = ReportBuilder::new();
        report.begin_table(3, TableOptions::default());
        for _ in 0..4 {
            report.add_row(&["a", "b", "c"], 0).unwrap();
        }
        report.end_table();

        let xml = report.to_xml_string();
        let root = crate::odf::elements::Element::from_bytes(
            xml.strip_prefix(super::super::serializer::XML_DECLARATION)
                .unwrap()
                .as_bytes(),
        )
        .unwrap();

        let cell_styles = root
            .find_all("style:style")
            .into_iter()
            .filter(|s| s.get_attribute("style:family") == Some("table-cell"))
            .count();
        assert_eq!(cell_styles, 3);
        assert_eq!(root.find_all("table:table-cell").len(), 12);
    }
}
