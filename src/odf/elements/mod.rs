//! ODF element classes.
//!
//! This module provides the typed document tree (headings, paragraphs, lists,
//! tables and images) and the output [`Element`] model every node renders
//! into.

/// Drawing elements (frames, images)
pub mod draw;
/// Output XML element model
pub mod element;
/// Lists and list items
pub mod list;
/// Tree container, node sum type and node kinds
pub mod node;
/// Table-related elements (tables, rows, cells)
pub mod table;
/// Text-related elements (paragraphs, headings)
pub mod text;

pub use draw::{AnchorType, Image, ImageCrateProbe, ImageSizeProbe, decode_data_url};
pub use element::{Content, Element};
pub use list::{List, ListItem};
pub use node::{Children, Node, NodeKind, OdfNode};
pub use table::{Table, TableCell, TableColumn, TableRow, ValueType};
pub use text::{Heading, Paragraph};
