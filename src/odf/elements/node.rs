//! Document tree nodes.
//!
//! The tree is made of typed owners: a document body, a list item and a table
//! cell hold block [`Node`]s, a list holds items, a table holds rows and a row
//! holds cells. Every composite keeps its children in a [`Children`]
//! container, which preserves insertion order.

use super::element::Element;
use super::list::List;
use super::table::Table;
use super::text::{Heading, Paragraph};
use crate::odf::style::StyleRegistry;

/// Kind of a document tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Heading,
    Paragraph,
    List,
    ListItem,
    Table,
    TableColumnDef,
    TableRow,
    TableCell,
    Image,
}

impl NodeKind {
    /// Name of the element a node of this kind is written as
    pub fn element_name(self) -> &'static str {
        match self {
            NodeKind::Document => "office:document",
            NodeKind::Heading => "text:h",
            NodeKind::Paragraph => "text:p",
            NodeKind::List => "text:list",
            NodeKind::ListItem => "text:list-item",
            NodeKind::Table => "table:table",
            NodeKind::TableColumnDef => "table:table-column",
            NodeKind::TableRow => "table:table-row",
            NodeKind::TableCell => "table:table-cell",
            NodeKind::Image => "draw:frame",
        }
    }
}

/// A node that renders to an output element.
pub trait OdfNode {
    fn kind(&self) -> NodeKind;

    /// Render the node, resolving its styles through `styles`.
    ///
    /// Returns `None` for nodes that are not written, such as tables without
    /// rows.
    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element>;
}

/// Ordered children of a composite node.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::elements::{Children, Node, Paragraph};
///
/// let mut body: Children<Node> = Children::new();
/// body.append_paragraph(Paragraph::new("first"));
/// body.append_paragraph(Paragraph::new("second"));
///
/// let removed = body.remove_at(0).unwrap();
/// assert_eq!(removed.as_paragraph().unwrap().text(), "first");
/// assert!(body.remove_at(5).is_none());
/// assert_eq!(body.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Children<T> {
    items: Vec<T>,
}

impl<T> Default for Children<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Children<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child and return a reference to it
    pub fn append(&mut self, child: T) -> &mut T {
        let index = self.items.len();
        self.items.push(child);
        &mut self.items[index]
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// All children in insertion order
    pub fn get_all(&self) -> &[T] {
        &self.items
    }

    /// Detach the child at `index`; out-of-range indices yield `None`
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        while self.remove_at(0).is_some() {}
    }

    pub fn has_children(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<'a, T> IntoIterator for &'a Children<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: OdfNode> Children<T> {
    /// Render every child into `parent`, skipping children that are not written
    pub fn write_into(&self, parent: &mut Element, styles: &mut StyleRegistry) {
        for child in &self.items {
            if let Some(element) = child.to_element(styles) {
                parent.add_child(element);
            }
        }
    }
}

impl Children<Node> {
    pub fn append_heading(&mut self, heading: Heading) -> &mut Heading {
        match self.append(Node::Heading(heading)) {
            Node::Heading(heading) => heading,
            _ => unreachable!(),
        }
    }

    pub fn append_paragraph(&mut self, paragraph: Paragraph) -> &mut Paragraph {
        match self.append(Node::Paragraph(paragraph)) {
            Node::Paragraph(paragraph) => paragraph,
            _ => unreachable!(),
        }
    }

    pub fn append_list(&mut self, list: List) -> &mut List {
        match self.append(Node::List(list)) {
            Node::List(list) => list,
            _ => unreachable!(),
        }
    }

    pub fn append_table(&mut self, table: Table) -> &mut Table {
        match self.append(Node::Table(table)) {
            Node::Table(table) => table,
            _ => unreachable!(),
        }
    }
}

/// A block-level node of a body, list item or table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    Table(Table),
}

impl Node {
    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Node::Heading(heading) => Some(heading),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Node::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Node::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl OdfNode for Node {
    fn kind(&self) -> NodeKind {
        match self {
            Node::Heading(heading) => heading.kind(),
            Node::Paragraph(paragraph) => paragraph.kind(),
            Node::List(list) => list.kind(),
            Node::Table(table) => table.kind(),
        }
    }

    fn to_element(&self, styles: &mut StyleRegistry) -> Option<Element> {
        match self {
            Node::Heading(heading) => heading.to_element(styles),
            Node::Paragraph(paragraph) => paragraph.to_element(styles),
            Node::List(list) => list.to_element(styles),
            Node::Table(table) => table.to_element(styles),
        }
    }
}

impl From<Heading> for Node {
    fn from(heading: Heading) -> Self {
        Node::Heading(heading)
    }
}

impl From<Paragraph> for Node {
    fn from(paragraph: Paragraph) -> Self {
        Node::Paragraph(paragraph)
    }
}

impl From<List> for Node {
    fn from(list: List) -> Self {
        Node::List(list)
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Table(table)
    }
}
