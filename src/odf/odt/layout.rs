//! Border selection for report tables.
//!
//! A cell's border is picked from a fixed table of presets indexed by the
//! cell's row kind and column kind. Row kinds come from a span counter that
//! lets several consecutive rows read as one framed block: the first row of a
//! span is open at the bottom, the last is open at the top, and rows in
//! between are open on both.

use crate::odf::style::{Direction, TableCellStyle};
use serde::Deserialize;

/// Edge weight of one side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderWeight {
    None,
    Thin,
    Thick,
}

/// Border strings for each edge weight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BorderLines {
    pub none: String,
    pub thin: String,
    pub thick: String,
}

impl Default for BorderLines {
    fn default() -> Self {
        Self {
            none: "none".to_string(),
            thin: "0.5pt solid #000000".to_string(),
            thick: "1pt solid #000000".to_string(),
        }
    }
}

impl BorderLines {
    pub fn get(&self, weight: BorderWeight) -> &str {
        match weight {
            BorderWeight::None => &self.none,
            BorderWeight::Thin => &self.thin,
            BorderWeight::Thick => &self.thick,
        }
    }
}

/// Edge weights of a cell, top/left/bottom/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderPreset {
    pub top: BorderWeight,
    pub left: BorderWeight,
    pub bottom: BorderWeight,
    pub right: BorderWeight,
}

impl BorderPreset {
    const fn new(
        top: BorderWeight,
        left: BorderWeight,
        bottom: BorderWeight,
        right: BorderWeight,
    ) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Preset for a cell at the given position
    pub fn select(row: RowKind, column: ColumnKind) -> Self {
        PRESETS[row as usize][column as usize]
    }

    /// Write the four borders onto `style`, replacing earlier borders
    pub fn apply_to(&self, style: &mut TableCellStyle, lines: &BorderLines) {
        style.reset_border();
        style.add_border(Direction::Top, lines.get(self.top));
        style.add_border(Direction::Left, lines.get(self.left));
        style.add_border(Direction::Bottom, lines.get(self.bottom));
        style.add_border(Direction::Right, lines.get(self.right));
    }
}

/// Position of a row within a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Single = 0,
    Top = 1,
    Middle = 2,
    Bottom = 3,
}

/// Position of a column within the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    First = 0,
    Middle = 1,
    Last = 2,
}

impl ColumnKind {
    /// Classify the 1-based column `column` of a table with `count` columns.
    ///
    /// The first column wins over the last, so a one-column table gets the
    /// first-column preset.
    pub fn classify(column: usize, count: usize) -> Self {
        if column == 1 {
            ColumnKind::First
        } else if column == count {
            ColumnKind::Last
        } else {
            ColumnKind::Middle
        }
    }
}

use BorderWeight::{None as N, Thick as K, Thin as T};

const PRESETS: [[BorderPreset; 3]; 4] = [
    // Single
    [
        BorderPreset::new(K, K, K, T),
        BorderPreset::new(K, N, K, T),
        BorderPreset::new(K, N, K, K),
    ],
    // Top
    [
        BorderPreset::new(K, K, N, T),
        BorderPreset::new(K, N, N, T),
        BorderPreset::new(K, N, N, K),
    ],
    // Middle
    [
        BorderPreset::new(N, K, N, T),
        BorderPreset::new(N, N, N, T),
        BorderPreset::new(N, N, N, K),
    ],
    // Bottom
    [
        BorderPreset::new(N, K, K, T),
        BorderPreset::new(N, N, K, T),
        BorderPreset::new(N, N, K, K),
    ],
];

/// Multi-row span counter.
///
/// Negative while the first row of a span is current, then counts the rows
/// left in the span down to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanCounter {
    value: isize,
}

impl SpanCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next row; `span > 0` starts a span of that many rows.
    ///
    /// Spans longer than `isize::MAX` rows are clamped to that length.
    pub fn start_row(&mut self, span: usize) {
        if span > 0 {
            self.value = isize::try_from(span).map_or(-isize::MAX, |n| -n);
        } else if self.value != 0 {
            self.value = self.value.abs() - 1;
        }
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn value(&self) -> isize {
        self.value
    }

    /// Row kind of the current row
    pub fn row_kind(&self) -> RowKind {
        match self.value {
            v if v < 0 => RowKind::Top,
            v if v > 1 => RowKind::Middle,
            1 => RowKind::Bottom,
            _ => RowKind::Single,
        }
    }
}
