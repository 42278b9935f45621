//! Enumerations and small value types used by styles.

use serde::Deserialize;

/// Side of a box a border or padding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// All four sides at once
    All,
    Top,
    Left,
    Bottom,
    Right,
}

impl Direction {
    /// Name of the attribute for the given property (`fo:border`, `fo:padding-left`, ...)
    pub fn attribute(self, property: &str) -> String {
        match self {
            Direction::All => format!("fo:{}", property),
            Direction::Top => format!("fo:{}-top", property),
            Direction::Left => format!("fo:{}-left", property),
            Direction::Bottom => format!("fo:{}-bottom", property),
            Direction::Right => format!("fo:{}-right", property),
        }
    }
}

/// Vertical alignment of table cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
    Automatic,
}

impl VerticalAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Middle => "middle",
            VerticalAlignment::Bottom => "bottom",
            VerticalAlignment::Automatic => "automatic",
        }
    }
}

/// Horizontal placement of a table on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlignment {
    Left,
    Center,
    Right,
    /// Stretch between the page margins
    #[default]
    Margins,
}

impl TableAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            TableAlignment::Left => "left",
            TableAlignment::Center => "center",
            TableAlignment::Right => "right",
            TableAlignment::Margins => "margins",
        }
    }
}

/// Horizontal alignment of paragraph text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    /// Inherit the alignment; no attribute is written
    #[default]
    Default,
    Start,
    Center,
    End,
    Justify,
    Left,
    Right,
}

impl HorizontalAlignment {
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            HorizontalAlignment::Default => None,
            HorizontalAlignment::Start => Some("start"),
            HorizontalAlignment::Center => Some("center"),
            HorizontalAlignment::End => Some("end"),
            HorizontalAlignment::Justify => Some("justify"),
            HorizontalAlignment::Left => Some("left"),
            HorizontalAlignment::Right => Some("right"),
        }
    }
}

/// Font weight and posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Typeface {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl Typeface {
    pub fn is_bold(self) -> bool {
        matches!(self, Typeface::Bold | Typeface::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Typeface::Italic | Typeface::BoldItalic)
    }
}

/// Case transformation applied to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTransformation {
    #[default]
    None,
    Lowercase,
    Uppercase,
    Capitalize,
}

impl TextTransformation {
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            TextTransformation::None => None,
            TextTransformation::Lowercase => Some("lowercase"),
            TextTransformation::Uppercase => Some("uppercase"),
            TextTransformation::Capitalize => Some("capitalize"),
        }
    }
}

/// Alignment of text at a tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabStopType {
    #[default]
    Left,
    Center,
    Right,
    Char,
}

impl TabStopType {
    pub fn as_str(self) -> &'static str {
        match self {
            TabStopType::Left => "left",
            TabStopType::Center => "center",
            TabStopType::Right => "right",
            TabStopType::Char => "char",
        }
    }
}

/// A tab stop of a paragraph style.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::style::{TabStop, TabStopType};
///
/// // right aligned tab stop 4 cm from the left margin
/// let stop = TabStop::new(4.0, TabStopType::Right);
/// assert_eq!(stop.position(), 4.0);
///
/// // negative positions are moved to the margin
/// assert_eq!(TabStop::new(-1.0, TabStopType::Left).position(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabStop {
    position: f64,
    kind: TabStopType,
}

impl TabStop {
    /// Create a tab stop; `position` is in centimeters from the left margin
    pub fn new(position: f64, kind: TabStopType) -> Self {
        Self {
            position: position.max(0.0),
            kind,
        }
    }

    /// Position in centimeters
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = position.max(0.0);
    }

    pub fn kind(&self) -> TabStopType {
        self.kind
    }

    pub fn set_kind(&mut self, kind: TabStopType) {
        self.kind = kind;
    }
}

/// Pitch of a declared font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontPitch {
    Fixed,
    Variable,
}

impl FontPitch {
    pub fn as_str(self) -> &'static str {
        match self {
            FontPitch::Fixed => "fixed",
            FontPitch::Variable => "variable",
        }
    }
}
