//! Table-related ODF elements.
//!
//! This module provides tables, column definitions, rows and cells. A table
//! is only written when it has at least one row, and a row only when it has at
//! least one cell.

use super::element::Element;
use super::node::{Children, Node, NodeKind, OdfNode};
use super::text::Paragraph;
use crate::odf::style::{StyleRegistry, TableCellStyle, TableColumnStyle, TableStyle};

/// Value type of a table cell (`office:value-type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    Float,
    Time,
    Date,
    Percentage,
    Currency,
    Boolean,
    #[default]
    String,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Time => "time",
            ValueType::Date => "date",
            ValueType::Percentage => "percentage",
            ValueType::Currency => "currency",
            ValueType::Boolean => "boolean",
            ValueType::String => "string",
        }
    }
}

/// A table element
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: Option<String>,
    style: TableStyle,
    columns: Vec<TableColumn>,
    rows: Children<TableRow>,
}

impl Table {
    /// Create a table with `columns` column definitions
    pub fn new(columns: usize) -> Self {
        Self {
            name: None,
            style: TableStyle::new(),
            columns: vec![TableColumn::new(); columns],
            rows: Children::new(),
        }
    }

    /// Get the table name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the table name
    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut TableStyle {
        &mut self.style
    }

    /// Column definitions
    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut TableColumn> {
        self.columns.get_mut(index)
    }

    pub fn add_row(&mut self) -> &mut TableRow {
        self.rows.append(TableRow::new())
    }

    pub fn get_row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn get_row_mut(&mut self, index: usize) -> Option<&mut TableRow> {
        self.rows.get_mut(index)
    }

    pub fn get_rows(&self) -> &[TableRow] {
        self.rows.get_all()
    }

    pub fn remove_row_at(&mut self, index: usize) -> Option<TableRow> {
        self.rows.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        self.rows.len()
    }
}

impl OdfNode for Table {
    fn kind(&self) -> NodeKind {
        NodeKind::Table
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        if self.rows.is_empty() {
            return None;
        }

        let mut element = Element::new(self.kind().element_name());
        if let Some(name) = &self.name {
            element.set_attribute("table:name", name);
        }
        element.set_attribute("table:style-name", &styles.resolve(&self.style));

        for column in &self.columns {
            if let Some(column) = column.to_element(styles) {
                element.add_child(column);
            }
        }
        self.rows.write_into(&mut element, styles);
        Some(element)
    }
}

/// A column definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableColumn {
    style: TableColumnStyle,
}

impl TableColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> &TableColumnStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut TableColumnStyle {
        &mut self.style
    }
}

impl OdfNode for TableColumn {
    fn kind(&self) -> NodeKind {
        NodeKind::TableColumnDef
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        Some(
            Element::new(self.kind().element_name())
                .with_attribute("table:style-name", &styles.resolve(&self.style)),
        )
    }
}

/// A table row element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    cells: Children<TableCell>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cell(&mut self, cell: TableCell) -> &mut TableCell {
        self.cells.append(cell)
    }

    pub fn get_cell(&self, index: usize) -> Option<&TableCell> {
        self.cells.get(index)
    }

    pub fn get_cell_mut(&mut self, index: usize) -> Option<&mut TableCell> {
        self.cells.get_mut(index)
    }

    pub fn get_cells(&self) -> &[TableCell] {
        self.cells.get_all()
    }

    pub fn remove_cell_at(&mut self, index: usize) -> Option<TableCell> {
        self.cells.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of cells
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

impl OdfNode for TableRow {
    fn kind(&self) -> NodeKind {
        NodeKind::TableRow
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        if self.cells.is_empty() {
            return None;
        }
        let mut element = Element::new(self.kind().element_name());
        self.cells.write_into(&mut element, styles);
        Some(element)
    }
}

/// A table cell element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    content: Children<Node>,
    value_type: ValueType,
    style: TableCellStyle,
}

impl TableCell {
    /// Create a cell holding one paragraph with `text`
    pub fn new(text: &str, value_type: ValueType) -> Self {
        let mut cell = Self::empty(value_type);
        cell.content.append_paragraph(Paragraph::new(text));
        cell
    }

    /// Create a cell without content
    pub fn empty(value_type: ValueType) -> Self {
        Self {
            content: Children::new(),
            value_type,
            style: TableCellStyle::new(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn set_value_type(&mut self, value_type: ValueType) {
        self.value_type = value_type;
    }

    pub fn style(&self) -> &TableCellStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut TableCellStyle {
        &mut self.style
    }

    pub fn set_style(&mut self, style: TableCellStyle) {
        self.style = style;
    }

    pub fn content(&self) -> &Children<Node> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Children<Node> {
        &mut self.content
    }
}

impl OdfNode for TableCell {
    fn kind(&self) -> NodeKind {
        NodeKind::TableCell
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        let mut element = Element::new(self.kind().element_name())
            .with_attribute("office:value-type", self.value_type.as_str())
            .with_attribute("table:style-name", &styles.resolve(&self.style));
        self.content.write_into(&mut element, styles);
        Some(element)
    }
}
