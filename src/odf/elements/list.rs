//! Lists and list items.

use super::element::Element;
use super::node::{Children, Node, NodeKind, OdfNode};
use super::text::Paragraph;
use crate::odf::style::StyleRegistry;

/// A `text:list` holding items in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    items: Children<ListItem>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item holding one paragraph with `text`
    pub fn add_item(&mut self, text: &str) -> &mut ListItem {
        self.items.append(ListItem::with_text(text))
    }

    /// Add an already built item
    pub fn append_item(&mut self, item: ListItem) -> &mut ListItem {
        self.items.append(item)
    }

    pub fn get_item(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    pub fn get_item_mut(&mut self, index: usize) -> Option<&mut ListItem> {
        self.items.get_mut(index)
    }

    pub fn get_items(&self) -> &[ListItem] {
        self.items.get_all()
    }

    pub fn remove_item_at(&mut self, index: usize) -> Option<ListItem> {
        self.items.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of items
    pub fn size(&self) -> usize {
        self.items.len()
    }
}

impl OdfNode for List {
    fn kind(&self) -> NodeKind {
        NodeKind::List
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        let mut element = Element::new(self.kind().element_name());
        self.items.write_into(&mut element, styles);
        Some(element)
    }
}

/// A `text:list-item`; holds block nodes, usually one paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    content: Children<Node>,
}

impl ListItem {
    /// Create an empty item
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self::with_paragraph(Paragraph::new(text))
    }

    pub fn with_paragraph(paragraph: Paragraph) -> Self {
        let mut item = Self::new();
        item.content.append_paragraph(paragraph);
        item
    }

    pub fn content(&self) -> &Children<Node> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Children<Node> {
        &mut self.content
    }

    /// Text of the first paragraph, if any
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find_map(|node| node.as_paragraph())
            .map(|paragraph| paragraph.text())
    }
}

impl OdfNode for ListItem {
    fn kind(&self) -> NodeKind {
        NodeKind::ListItem
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        let mut element = Element::new(self.kind().element_name());
        self.content.write_into(&mut element, styles);
        Some(element)
    }
}
