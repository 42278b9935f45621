//! Output XML element model.
//!
//! Every node of the document tree renders itself into an [`Element`], and the
//! serializer turns the resulting element tree into text. Attributes keep their
//! insertion order so that the output is deterministic.

use crate::common::xml::{escape_xml, resolve_reference, unescape_xml};
use crate::common::{Error, Result};
use quick_xml::events::Event;

/// A piece of mixed element content.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Character data
    Text(String),
    /// A child element
    Element(Element),
}

/// An XML element with ordered attributes and mixed content.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag_name: String,
    attributes: Vec<(String, String)>,
    content: Vec<Content>,
}

impl Element {
    /// Create a new element
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Get the tag name of this element
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Get the attributes in insertion order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Get attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set attribute value, replacing an existing value in place
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    /// Set an attribute and return the element, for building elements inline
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Check if element has attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(key, _)| key == name)
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.content.push(Content::Element(child));
    }

    /// Append character data, merging with preceding text
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Content::Text(last)) = self.content.last_mut() {
            last.push_str(text);
        } else {
            self.content.push(Content::Text(text.to_string()));
        }
    }

    /// Get the mixed content in document order
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Check whether the element has any content
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Iterate over child elements, skipping text
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.content.iter().filter_map(|content| match content {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Get the first child element with the given tag name
    pub fn find_child(&self, tag_name: &str) -> Option<&Element> {
        self.children().find(|child| child.tag_name == tag_name)
    }

    /// Collect all descendants with the given tag name in document order
    pub fn find_all(&self, tag_name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(tag_name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, tag_name: &str, found: &mut Vec<&'a Element>) {
        for child in self.children() {
            if child.tag_name == tag_name {
                found.push(child);
            }
            child.collect_descendants(tag_name, found);
        }
    }

    /// Get the direct character data of this element
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }

    /// Get text recursively from this element and all children
    pub fn get_text_recursive(&self) -> String {
        let mut text = String::new();
        for content in &self.content {
            match content {
                Content::Text(t) => text.push_str(t),
                Content::Element(child) => text.push_str(&child.get_text_recursive()),
            }
        }
        text
    }

    /// Create element from XML bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let tag_name = String::from_utf8(e.name().as_ref().to_vec())?;
                    let mut element = Element::new(&tag_name);
                    for attr_result in e.attributes() {
                        let attr = attr_result?;
                        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
                        let value = String::from_utf8(attr.value.to_vec())?;
                        element.set_attribute(&key, &unescape_xml(&value));
                    }
                    stack.push(element);
                },
                Ok(Event::Empty(ref e)) => {
                    let tag_name = String::from_utf8(e.name().as_ref().to_vec())?;
                    let mut element = Element::new(&tag_name);
                    for attr_result in e.attributes() {
                        let attr = attr_result?;
                        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
                        let value = String::from_utf8(attr.value.to_vec())?;
                        element.set_attribute(&key, &unescape_xml(&value));
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.add_child(element),
                        None => return Ok(element),
                    }
                },
                Ok(Event::Text(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = String::from_utf8(t.to_vec())?;
                        current.push_text(&unescape_xml(&text));
                    }
                },
                Ok(Event::CData(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8(t.to_vec())?);
                    }
                },
                Ok(Event::GeneralRef(ref r)) => {
                    if let Some(current) = stack.last_mut() {
                        let name = String::from_utf8(r.to_vec())?;
                        match resolve_reference(&name) {
                            Some(text) => current.push_text(&text),
                            None => current.push_text(&format!("&{};", name)),
                        }
                    }
                },
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.add_child(element),
                            None => return Ok(element),
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlError(format!("XML parsing error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Err(Error::XmlError("No root element found".to_string()))
    }

    /// Serialize element to XML string
    pub fn to_xml_string(&self) -> String {
        let mut xml = String::with_capacity(self.estimated_xml_len());
        self.write_xml(&mut xml);
        xml
    }

    fn estimated_xml_len(&self) -> usize {
        let mut len = 1 + self.tag_name.len();

        for (key, value) in &self.attributes {
            len += key.len() + value.len() + 4;
        }

        if self.content.is_empty() {
            return len + 2;
        }

        len += 1;
        for content in &self.content {
            len += match content {
                Content::Text(text) => text.len() + 8,
                Content::Element(child) => child.estimated_xml_len(),
            };
        }

        len + 3 + self.tag_name.len()
    }

    fn write_xml(&self, output: &mut String) {
        output.push('<');
        output.push_str(&self.tag_name);

        for (key, value) in &self.attributes {
            output.push(' ');
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(&escape_xml(value));
            output.push('"');
        }

        if self.content.is_empty() {
            output.push_str("/>");
            return;
        }

        output.push('>');
        for content in &self.content {
            match content {
                Content::Text(text) => output.push_str(&escape_xml(text)),
                Content::Element(child) => child.write_xml(output),
            }
        }
        output.push_str("</");
        output.push_str(&self.tag_name);
        output.push('>');
    }
}
