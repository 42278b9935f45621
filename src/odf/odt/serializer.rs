//! Flat ODF serialization.
//!
//! The document is written as a single `office:document` in schema order:
//! metadata, font declarations, automatic styles, then the body. Styles are
//! collected while the body is walked, so the body is rendered first and the
//! style table is inserted ahead of it afterwards.

use super::document::{FontFace, TextDocument};
use crate::odf::elements::{Element, NodeKind, OdfNode};
use crate::odf::style::StyleRegistry;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const OFFICE_VERSION: &str = "1.2";
pub const MIME_TYPE: &str = "application/vnd.oasis.opendocument.text";

/// Namespace declarations of the root element
pub const NAMESPACES: &[(&str, &str)] = &[
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:draw", "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0"),
    ("xmlns:fo", "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0"),
    ("xmlns:meta", "urn:oasis:names:tc:opendocument:xmlns:meta:1.0"),
    ("xmlns:office", "urn:oasis:names:tc:opendocument:xmlns:office:1.0"),
    ("xmlns:style", "urn:oasis:names:tc:opendocument:xmlns:style:1.0"),
    ("xmlns:svg", "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0"),
    ("xmlns:table", "urn:oasis:names:tc:opendocument:xmlns:table:1.0"),
    ("xmlns:text", "urn:oasis:names:tc:opendocument:xmlns:text:1.0"),
    ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
];

impl OdfNode for TextDocument {
    fn kind(&self) -> NodeKind {
        NodeKind::Document
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        let mut root = Element::new(self.kind().element_name());
        for (name, uri) in NAMESPACES {
            root.set_attribute(name, uri);
        }
        root.set_attribute("office:mimetype", MIME_TYPE);
        root.set_attribute("office:version", OFFICE_VERSION);

        root.add_child(self.meta().to_element());

        if !self.fonts().is_empty() {
            let mut decls = Element::new("office:font-face-decls");
            for font in self.fonts() {
                decls.add_child(font_face_element(font));
            }
            root.add_child(decls);
        }

        let mut text = Element::new("office:text");
        self.body().write_into(&mut text, styles);
        let mut body = Element::new("office:body");
        body.add_child(text);

        root.add_child(styles.to_element());
        root.add_child(body);
        Some(root)
    }
}

fn font_face_element(font: &FontFace) -> Element {
    let family = if font.family.contains(' ') {
        format!("'{}'", font.family)
    } else {
        font.family.clone()
    };
    Element::new("style:font-face")
        .with_attribute("style:name", &font.name)
        .with_attribute("svg:font-family", &family)
        .with_attribute("style:font-pitch", font.pitch.as_str())
}

/// Render the document as flat ODF XML with a fresh style table.
pub fn to_flat_xml(document: &TextDocument) -> String {
    let mut styles = StyleRegistry::new();
    let mut xml = String::from(XML_DECLARATION);
    if let Some(root) = document.to_element(&mut styles) {
        xml.push_str(&root.to_xml_string());
    }
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::{TableCell, ValueType};
    use crate::odf::style::{FontPitch, ParagraphStyle};

    fn parse(document: &TextDocument) -> Element {
        let xml = to_flat_xml(document);
        let body = xml.strip_prefix(XML_DECLARATION).unwrap();
        Element::from_bytes(body.as_bytes()).unwrap()
    }

    #[test]
    fn test_root_and_section_order() {
        let mut doc = TextDocument::new();
        doc.declare_font(FontFace::new("Mono", "Ubuntu Mono", FontPitch::Fixed));
        doc.add_paragraph("x", None);

        let root = parse(&doc);
        assert_eq!(root.tag_name(), "office:document");
        assert_eq!(root.get_attribute("office:version"), Some("1.2"));
        assert_eq!(root.get_attribute("office:mimetype"), Some(MIME_TYPE));

        let sections: Vec<&str> = root.children().map(|c| c.tag_name()).collect();
        assert_eq!(
            sections,
            [
                "office:meta",
                "office:font-face-decls",
                "office:automatic-styles",
                "office:body"
            ]
        );

        let face = &root.find_all("style:font-face")[0];
        assert_eq!(face.get_attribute("svg:font-family"), Some("'Ubuntu Mono'"));
        assert_eq!(face.get_attribute("style:font-pitch"), Some("fixed"));
    }

    #[test]
    fn test_font_decls_omitted_without_fonts() {
        let root = parse(&TextDocument::new());
        assert!(root.find_child("office:font-face-decls").is_none());
        assert!(root.find_child("office:automatic-styles").is_some());
    }

    #[test]
    fn test_repeated_styles_emitted_once() {
        let mut style = ParagraphStyle::new();
        style.set_font_size(10.0);

        let mut doc = TextDocument::new();
        for text in ["a", "b", "c"] {
            doc.add_paragraph(text, Some(&style));
        }

        let root = parse(&doc);
        let styles = root.find_all("style:style");
        assert_eq!(styles.len(), 1);
        let name = styles[0].get_attribute("style:name").unwrap();
        for paragraph in root.find_all("text:p") {
            assert_eq!(paragraph.get_attribute("text:style-name"), Some(name));
        }
    }

    #[test]
    fn test_empty_containers_are_suppressed() {
        let mut doc = TextDocument::new();
        doc.add_table(3);
        let table = doc.add_table(1);
        table.add_row();
        table.add_row().add_cell(TableCell::new("only", ValueType::String));

        let root = parse(&doc);
        assert_eq!(root.find_all("table:table").len(), 1);
        assert_eq!(root.find_all("table:table-row").len(), 1);
    }

    #[test]
    fn test_serialization_is_repeatable() {
        let mut doc = TextDocument::new();
        let mut style = ParagraphStyle::new();
        style.set_font_name("Arial");
        doc.add_paragraph("x", Some(&style));
        assert_eq!(to_flat_xml(&doc), to_flat_xml(&doc));
    }
}
