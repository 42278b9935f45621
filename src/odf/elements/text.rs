//! Text-related ODF elements.
//!
//! This module provides headings and paragraphs, the two text-bearing leaf
//! nodes of the tree.

use super::draw::Image;
use super::element::Element;
use super::node::{Children, NodeKind, OdfNode};
use crate::odf::style::{ParagraphStyle, StyleRegistry};

/// Append `text` to `element`, expanding characters ODF does not keep as
/// literal text.
///
/// A newline becomes `text:line-break`, a tab becomes `text:tab`, and a run of
/// `n > 1` spaces becomes one space followed by `text:s` with `text:c = n - 1`.
pub(crate) fn write_text(element: &mut Element, text: &str) {
    let mut run = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                element.push_text(&run);
                run.clear();
                element.add_child(Element::new("text:line-break"));
            },
            '\t' => {
                element.push_text(&run);
                run.clear();
                element.add_child(Element::new("text:tab"));
            },
            ' ' => {
                let mut extra = 0usize;
                while chars.peek() == Some(&' ') {
                    chars.next();
                    extra += 1;
                }
                run.push(' ');
                if extra > 0 {
                    element.push_text(&run);
                    run.clear();
                    element.add_child(
                        Element::new("text:s").with_attribute("text:c", &extra.to_string()),
                    );
                }
            },
            _ => run.push(c),
        }
    }

    element.push_text(&run);
}

/// A heading element
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    text: String,
    level: u8,
}

impl Heading {
    /// Create a heading; levels below 1 are raised to 1
    pub fn new(text: &str, level: u8) -> Self {
        Self {
            text: text.to_string(),
            level: level.max(1),
        }
    }

    /// Get the heading text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the heading text
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the outline level
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set the outline level
    pub fn set_level(&mut self, level: u8) {
        self.level = level.max(1);
    }
}

impl OdfNode for Heading {
    fn kind(&self) -> NodeKind {
        NodeKind::Heading
    }

    fn to_element(&self, _styles: &mut StyleRegistry) -> Option<Element> {
        let mut element = Element::new(self.kind().element_name())
            .with_attribute("text:outline-level", &self.level.to_string());
        write_text(&mut element, &self.text);
        Some(element)
    }
}

/// A text paragraph element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    text: String,
    style: Option<ParagraphStyle>,
    images: Children<Image>,
}

impl Paragraph {
    /// Create a new paragraph
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    /// Create a paragraph with a style
    pub fn with_style(text: &str, style: Option<&ParagraphStyle>) -> Self {
        Self {
            text: text.to_string(),
            style: style.cloned(),
            images: Children::new(),
        }
    }

    /// Get the text content of the paragraph
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text content of the paragraph
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn style(&self) -> Option<&ParagraphStyle> {
        self.style.as_ref()
    }

    pub fn set_style(&mut self, style: Option<ParagraphStyle>) {
        self.style = style;
    }

    /// Anchor an image in this paragraph
    pub fn add_image(&mut self, image: Image) -> &mut Image {
        self.images.append(image)
    }

    pub fn images(&self) -> &Children<Image> {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut Children<Image> {
        &mut self.images
    }
}

impl OdfNode for Paragraph {
    fn kind(&self) -> NodeKind {
        NodeKind::Paragraph
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        let mut element = Element::new(self.kind().element_name());
        if let Some(style) = &self.style {
            element.set_attribute("text:style-name", &styles.resolve(style));
        }
        write_text(&mut element, &self.text);
        self.images.write_into(&mut element, styles);
        Some(element)
    }
}
