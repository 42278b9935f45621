//! flat-odt - A Rust library for writing OpenDocument Text files
//!
//! This library builds text documents in memory and writes them as flat ODF
//! XML (`.fodt`), which LibreOffice and other office suites open directly.
//!
//! # Features
//!
//! - **Document model**: Headings, paragraphs, nested lists, tables and
//!   embedded images
//! - **Automatic styles**: Identical formatting is written once under a name
//!   derived from its content
//! - **Markup conversion**: A small HTML subset becomes headings, paragraphs
//!   and lists
//! - **Report builder**: Scoped default styles and framed tables with row spans
//!
//! # Example - Building a document
//!
//! ```
//! use flat_odt::TextDocument;
//! use flat_odt::odf::style::ParagraphStyle;
//!
//! let mut style = ParagraphStyle::new();
//! style.set_font_size(12.0);
//!
//! let mut doc = TextDocument::new();
//! doc.meta_mut().set_title("Minutes");
//! doc.add_heading("Minutes", 1);
//! doc.add_paragraph("Attendees: all", Some(&style));
//!
//! let list = doc.add_list();
//! list.add_item("Budget");
//! list.add_item("Schedule");
//!
//! let xml = doc.to_xml_string();
//! assert!(xml.contains("<text:h text:outline-level=\"1\">Minutes</text:h>"));
//! ```
//!
//! # Example - Writing a report
//!
//! ```no_run
//! use flat_odt::{ReportBuilder, ReportConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReportConfig::from_yaml_file("report.yaml")?;
//! let mut report = ReportBuilder::with_config(config);
//!
//! report.add_markup("<h1>Results</h1><ul><li>Passed</li></ul>", 1)?;
//! let options = report.table_options();
//! report.begin_table(2, options);
//! report.add_head_row(&["Test", "Time"])?;
//! report.add_row(&["parse", "12 ms"], 0)?;
//! report.end_table();
//!
//! report.save_flat("results.fodt")?;
//! # Ok(())
//! # }
//! ```

/// Shared infrastructure: errors, XML escaping and document metadata
pub mod common;

/// OpenDocument Format model, styles and serialization
pub mod odf;

// Re-export commonly used types for convenience
pub use common::{Error, Meta, Result};
pub use odf::odt::{MarkupConverter, ReportBuilder, ReportConfig, TableOptions, TextDocument};
