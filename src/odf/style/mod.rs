//! Automatic styles with content-derived names.
//!
//! Style objects are plain values attached to nodes. The serializer resolves
//! each of them through a [`StyleRegistry`], which names a style after a hash
//! of its properties and writes every distinct style once.

pub mod paragraph;
pub mod registry;
pub mod table;
pub mod types;

pub use paragraph::ParagraphStyle;
pub use registry::{
    PropertyGroup, PropertySet, StyleDefinition, StyleFamily, StyleRecord, StyleRegistry,
    canonical_name,
};
pub use table::{Padding, TableCellStyle, TableColumnStyle, TableStyle};
pub use types::{
    Direction, FontPitch, HorizontalAlignment, TabStop, TabStopType, TableAlignment,
    TextTransformation, Typeface, VerticalAlignment,
};
