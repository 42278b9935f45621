//! OpenDocument Text (.odt) generation.
//!
//! Documents are built in memory as a [`TextDocument`] and written as a single
//! flat XML file (`.fodt`). On top of the document model sit two authoring
//! helpers:
//!
//! - [`MarkupConverter`] turns a small HTML-like markup into headings,
//!   paragraphs and lists
//! - [`ReportBuilder`] writes reports imperatively, with scoped default styles
//!   and framed tables
//!
//! # Layout
//!
//! - `document.rs` - document root, fonts and metadata
//! - `serializer.rs` - flat XML output and style collection
//! - `markup.rs` - markup tokenizer and converter
//! - `layout.rs` - table border presets and row spans
//! - `report.rs` - report builder
//! - `config.rs` - report defaults and YAML loading

mod config;
mod document;
mod layout;
pub mod markup;
mod report;
pub mod serializer;

pub use config::{ReportConfig, TextStyleConfig};
pub use document::{FontFace, TextDocument};
pub use layout::{BorderLines, BorderPreset, BorderWeight, ColumnKind, RowKind, SpanCounter};
pub use markup::{ConvertOptions, ListNesting, MarkupConverter, MarkupEvent, MarkupTokenizer};
pub use report::{ReportBuilder, TableOptions};
pub use serializer::to_flat_xml;
