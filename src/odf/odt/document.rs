//! OpenDocument Text document model.

use super::serializer;
use crate::common::{Meta, Result};
use crate::odf::elements::{Children, Heading, List, Node, Paragraph, Table};
use crate::odf::style::{FontPitch, ParagraphStyle};
use serde::Deserialize;
use std::path::Path;

/// A font declared in `office:font-face-decls`.
///
/// Styles refer to fonts by `name`; `family` is the font family the name
/// resolves to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontFace {
    pub name: String,
    pub family: String,
    pub pitch: FontPitch,
}

impl FontFace {
    pub fn new(name: &str, family: &str, pitch: FontPitch) -> Self {
        Self {
            name: name.to_string(),
            family: family.to_string(),
            pitch,
        }
    }
}

/// An in-memory text document.
///
/// The document owns its body, metadata and font declarations. Styles are
/// attached to the nodes that use them and collected when the document is
/// serialized.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::odt::TextDocument;
///
/// let mut doc = TextDocument::new();
/// doc.add_heading("Results", 1);
/// doc.add_paragraph("All checks passed.", None);
///
/// let xml = doc.to_xml_string();
/// assert!(xml.starts_with("<?xml"));
/// assert!(xml.contains("<text:h text:outline-level=\"1\">Results</text:h>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    body: Children<Node>,
    meta: Meta,
    fonts: Vec<FontFace>,
}

impl TextDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a heading; levels below 1 are raised to 1
    pub fn add_heading(&mut self, text: &str, level: u8) -> &mut Heading {
        self.body.append_heading(Heading::new(text, level))
    }

    /// Add a paragraph, optionally styled
    pub fn add_paragraph(&mut self, text: &str, style: Option<&ParagraphStyle>) -> &mut Paragraph {
        self.body.append_paragraph(Paragraph::with_style(text, style))
    }

    /// Add an empty list
    pub fn add_list(&mut self) -> &mut List {
        self.body.append_list(List::new())
    }

    /// Add an empty table with `columns` columns
    pub fn add_table(&mut self, columns: usize) -> &mut Table {
        self.body.append_table(Table::new(columns))
    }

    /// Append an already built node
    pub fn append(&mut self, node: impl Into<Node>) -> &mut Node {
        self.body.append(node.into())
    }

    pub fn body(&self) -> &Children<Node> {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Children<Node> {
        &mut self.body
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    /// Declare a font; a later declaration with the same name replaces it
    pub fn declare_font(&mut self, font: FontFace) {
        match self.fonts.iter_mut().find(|f| f.name == font.name) {
            Some(existing) => *existing = font,
            None => self.fonts.push(font),
        }
    }

    pub fn fonts(&self) -> &[FontFace] {
        &self.fonts
    }

    /// Serialize the document as flat ODF XML
    pub fn to_xml_string(&self) -> String {
        serializer::to_flat_xml(self)
    }

    /// Write the flat ODF XML to `path`
    pub fn save_flat<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_xml_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_keeps_insertion_order() {
        let mut doc = TextDocument::new();
        doc.add_heading("h", 2);
        doc.add_paragraph("p", None);
        doc.add_list().add_item("i");
        doc.add_table(2);

        let kinds: Vec<_> = doc
            .body()
            .iter()
            .map(|node| crate::odf::elements::OdfNode::kind(node).element_name())
            .collect();
        assert_eq!(kinds, ["text:h", "text:p", "text:list", "table:table"]);
    }

    #[test]
    fn test_font_redeclaration_replaces() {
        let mut doc = TextDocument::new();
        doc.declare_font(FontFace::new("Mono", "Courier", FontPitch::Fixed));
        doc.declare_font(FontFace::new("Mono", "Ubuntu Mono", FontPitch::Fixed));
        assert_eq!(doc.fonts().len(), 1);
        assert_eq!(doc.fonts()[0].family, "Ubuntu Mono");
    }

    #[test]
    fn test_save_flat_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.fodt");

        let mut doc = TextDocument::new();
        doc.add_paragraph("saved", None);
        doc.save_flat(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.to_xml_string());
        assert!(written.contains("<text:p>saved</text:p>"));
    }

    #[test]
    fn test_save_flat_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.fodt");
        let doc = TextDocument::new();
        assert!(matches!(doc.save_flat(&path), Err(crate::common::Error::Io(_))));
    }
}
