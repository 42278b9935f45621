//! Table, column and cell styles.

use super::registry::{PropertyGroup, PropertySet, StyleDefinition, StyleFamily};
use super::types::{Direction, TableAlignment, VerticalAlignment};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Style of a `table:table`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStyle {
    width: Option<String>,
    relative_width: Option<f64>,
    alignment: TableAlignment,
}

impl TableStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    /// Absolute width with unit, such as `17cm`
    pub fn set_width(&mut self, width: &str) {
        self.width = Some(width.to_string());
    }

    pub fn relative_width(&self) -> Option<f64> {
        self.relative_width
    }

    /// Width as a percentage of the page body
    pub fn set_relative_width(&mut self, percent: f64) {
        self.relative_width = Some(percent);
    }

    pub fn alignment(&self) -> TableAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TableAlignment) {
        self.alignment = alignment;
    }
}

impl StyleDefinition for TableStyle {
    fn family(&self) -> StyleFamily {
        StyleFamily::Table
    }

    fn properties(&self) -> PropertySet {
        let mut properties = PropertySet::new();
        if let Some(width) = &self.width {
            properties.set(PropertyGroup::Table, "style:width", width);
        }
        if let Some(percent) = self.relative_width {
            properties.set(PropertyGroup::Table, "style:rel-width", &format!("{}%", percent));
        }
        properties.set(PropertyGroup::Table, "table:align", self.alignment.as_str());
        properties
    }
}

/// Style of a `table:table-column`.
///
/// Columns use their optimal width until an explicit width is set.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumnStyle {
    width: Option<String>,
    relative_width: Option<f64>,
    use_optimal_width: bool,
}

impl Default for TableColumnStyle {
    fn default() -> Self {
        Self {
            width: None,
            relative_width: None,
            use_optimal_width: true,
        }
    }
}

impl TableColumnStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    /// Set an absolute column width; turns off optimal width
    pub fn set_width(&mut self, width: &str) {
        self.width = Some(width.to_string());
        self.use_optimal_width = false;
    }

    pub fn relative_width(&self) -> Option<f64> {
        self.relative_width
    }

    /// Set a relative column width; turns off optimal width
    pub fn set_relative_width(&mut self, weight: f64) {
        self.relative_width = Some(weight);
        self.use_optimal_width = false;
    }

    pub fn use_optimal_width(&self) -> bool {
        self.use_optimal_width
    }

    /// Turning optimal width on clears both explicit widths
    pub fn set_use_optimal_width(&mut self, optimal: bool) {
        self.use_optimal_width = optimal;
        if optimal {
            self.width = None;
            self.relative_width = None;
        }
    }
}

impl StyleDefinition for TableColumnStyle {
    fn family(&self) -> StyleFamily {
        StyleFamily::TableColumn
    }

    fn properties(&self) -> PropertySet {
        let mut properties = PropertySet::new();
        let group = PropertyGroup::TableColumn;
        if let Some(width) = &self.width {
            properties.set(group, "style:column-width", width);
        }
        if let Some(weight) = self.relative_width {
            properties.set(group, "style:rel-column-width", &format!("{}*", weight));
        }
        properties.set(
            group,
            "style:use-optimal-column-width",
            if self.use_optimal_width { "true" } else { "false" },
        );
        properties
    }
}

/// Padding per side of a cell.
///
/// `all` is written as `fo:padding`; sides override it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub all: Option<String>,
    pub top: Option<String>,
    pub left: Option<String>,
    pub bottom: Option<String>,
    pub right: Option<String>,
}

impl Padding {
    /// Padding of the same size on all sides
    pub fn uniform(value: &str) -> Self {
        Self {
            all: Some(value.to_string()),
            ..Self::default()
        }
    }

    /// Copy every set side onto a cell style
    pub fn apply(&self, style: &mut TableCellStyle) {
        let sides = [
            (Direction::All, &self.all),
            (Direction::Top, &self.top),
            (Direction::Left, &self.left),
            (Direction::Bottom, &self.bottom),
            (Direction::Right, &self.right),
        ];
        for (direction, value) in sides {
            if let Some(value) = value {
                style.add_padding(direction, value);
            }
        }
    }
}

/// Style of a `table:table-cell`.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::style::{Direction, TableCellStyle, VerticalAlignment};
///
/// let mut style = TableCellStyle::new();
/// style.set_vertical_alignment(VerticalAlignment::Middle);
/// style.add_border(Direction::All, "0.5pt solid #000000");
/// style.add_border(Direction::Top, "1pt solid #000000");
/// assert_eq!(style.border(Direction::Top), Some("1pt solid #000000"));
///
/// style.reset_border();
/// assert_eq!(style.border(Direction::Top), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCellStyle {
    vertical_alignment: VerticalAlignment,
    borders: BTreeMap<Direction, String>,
    padding: BTreeMap<Direction, String>,
}

impl TableCellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
    }

    pub fn border(&self, direction: Direction) -> Option<&str> {
        self.borders.get(&direction).map(|b| b.as_str())
    }

    /// Set the border of one side, or of all sides with [`Direction::All`]
    pub fn add_border(&mut self, direction: Direction, border: &str) {
        self.borders.insert(direction, border.to_string());
    }

    pub fn reset_border(&mut self) {
        self.borders.clear();
    }

    pub fn padding(&self, direction: Direction) -> Option<&str> {
        self.padding.get(&direction).map(|p| p.as_str())
    }

    pub fn add_padding(&mut self, direction: Direction, padding: &str) {
        self.padding.insert(direction, padding.to_string());
    }

    pub fn reset_padding(&mut self) {
        self.padding.clear();
    }
}

impl StyleDefinition for TableCellStyle {
    fn family(&self) -> StyleFamily {
        StyleFamily::TableCell
    }

    fn properties(&self) -> PropertySet {
        let mut properties = PropertySet::new();
        let group = PropertyGroup::TableCell;
        properties.set(group, "style:vertical-align", self.vertical_alignment.as_str());
        for (direction, border) in &self.borders {
            properties.set(group, &direction.attribute("border"), border);
        }
        for (direction, padding) in &self.padding {
            properties.set(group, &direction.attribute("padding"), padding);
        }
        properties
    }
}
