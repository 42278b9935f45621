//! OpenDocument Format support.
//!
//! Only the text flavour is implemented, and only for writing.

/// Document tree nodes and their XML rendering
pub mod elements;
/// OpenDocument Text documents
pub mod odt;
/// Automatic styles and their deduplication
pub mod style;
