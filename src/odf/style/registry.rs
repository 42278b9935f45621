//! Content-addressed registry of automatic styles.
//!
//! Styles carry no names of their own. When a node that references a style is
//! serialized, the style's properties are hashed into a canonical name and the
//! rendered record is stored once per name; every later style with the same
//! content maps to the existing record.

use super::types::TabStop;
use crate::odf::elements::element::Element;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Style family, rendered as `style:family`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamily {
    Paragraph,
    Table,
    TableColumn,
    TableCell,
}

impl StyleFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleFamily::Paragraph => "paragraph",
            StyleFamily::Table => "table",
            StyleFamily::TableColumn => "table-column",
            StyleFamily::TableCell => "table-cell",
        }
    }

    /// Prefix of canonical names; keeps names valid NCNames and readable
    fn name_prefix(self) -> &'static str {
        match self {
            StyleFamily::Paragraph => "P",
            StyleFamily::Table => "Ta",
            StyleFamily::TableColumn => "Co",
            StyleFamily::TableCell => "Ce",
        }
    }
}

/// Properties element a property belongs to.
///
/// The declaration order is the order in which the property elements are
/// written inside `style:style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyGroup {
    Paragraph,
    Text,
    Table,
    TableColumn,
    TableCell,
}

impl PropertyGroup {
    pub fn element_name(self) -> &'static str {
        match self {
            PropertyGroup::Paragraph => "style:paragraph-properties",
            PropertyGroup::Text => "style:text-properties",
            PropertyGroup::Table => "style:table-properties",
            PropertyGroup::TableColumn => "style:table-column-properties",
            PropertyGroup::TableCell => "style:table-cell-properties",
        }
    }
}

/// The flattened, ordered property content of a style.
///
/// Keys are kept sorted, so two sets that received the same properties in a
/// different order compare and hash equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    groups: BTreeMap<PropertyGroup, BTreeMap<String, String>>,
    tab_stops: Vec<TabStop>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value
    pub fn set(&mut self, group: PropertyGroup, name: &str, value: &str) {
        self.groups
            .entry(group)
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, group: PropertyGroup, name: &str) -> Option<&str> {
        self.groups.get(&group)?.get(name).map(|value| value.as_str())
    }

    /// Add tab stops; they are rendered inside the paragraph properties
    pub fn set_tab_stops(&mut self, tab_stops: &[TabStop]) {
        self.tab_stops = tab_stops.to_vec();
    }

    pub fn tab_stops(&self) -> &[TabStop] {
        &self.tab_stops
    }

    pub fn groups(&self) -> impl Iterator<Item = (PropertyGroup, &BTreeMap<String, String>)> {
        self.groups.iter().map(|(group, props)| (*group, props))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|props| props.is_empty()) && self.tab_stops.is_empty()
    }
}

/// Anything that can be registered as an automatic style.
pub trait StyleDefinition {
    fn family(&self) -> StyleFamily;

    /// Current property content of the style
    fn properties(&self) -> PropertySet;
}

/// Compute the canonical name of a style from its family and properties.
///
/// The name is the family prefix followed by the hex SHA-256 digest of the
/// length-prefixed (group, name, value) triples in sorted order and the tab
/// stops.
pub fn canonical_name(family: StyleFamily, properties: &PropertySet) -> String {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, family.as_str());

    for (group, props) in properties.groups() {
        update_field(&mut hasher, group.element_name());
        for (name, value) in props {
            update_field(&mut hasher, name);
            update_field(&mut hasher, value);
        }
    }

    for tab_stop in properties.tab_stops() {
        update_field(&mut hasher, "style:tab-stop");
        update_field(&mut hasher, &tab_stop.position().to_string());
        update_field(&mut hasher, tab_stop.kind().as_str());
    }

    let digest = hasher.finalize();
    let prefix = family.name_prefix();
    let mut name = String::with_capacity(prefix.len() + digest.len() * 2);
    name.push_str(prefix);
    for byte in digest.iter() {
        name.push(HEX[(byte >> 4) as usize] as char);
        name.push(HEX[(byte & 0x0f) as usize] as char);
    }
    name
}

fn update_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

/// A registered style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    name: String,
    family: StyleFamily,
    properties: PropertySet,
}

impl StyleRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> StyleFamily {
        self.family
    }

    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// Render the record as `style:style`
    pub fn to_element(&self) -> Element {
        let mut style = Element::new("style:style")
            .with_attribute("style:name", &self.name)
            .with_attribute("style:family", self.family.as_str());

        let tab_stops = self.properties.tab_stops();
        let has_paragraph_group = self
            .properties
            .groups()
            .any(|(group, _)| group == PropertyGroup::Paragraph);
        // tab stops live inside the paragraph properties, which sort first
        if !tab_stops.is_empty() && !has_paragraph_group {
            let mut element = Element::new(PropertyGroup::Paragraph.element_name());
            append_tab_stops(&mut element, tab_stops);
            style.add_child(element);
        }

        for (group, props) in self.properties.groups() {
            let mut element = Element::new(group.element_name());
            for (name, value) in props {
                element.set_attribute(name, value);
            }
            if group == PropertyGroup::Paragraph {
                append_tab_stops(&mut element, tab_stops);
            }
            style.add_child(element);
        }

        style
    }
}

fn append_tab_stops(element: &mut Element, tab_stops: &[TabStop]) {
    if tab_stops.is_empty() {
        return;
    }
    let mut stops = Element::new("style:tab-stops");
    for tab_stop in tab_stops {
        let mut stop = Element::new("style:tab-stop")
            .with_attribute("style:position", &format!("{}cm", tab_stop.position()));
        if tab_stop.kind() != super::types::TabStopType::Left {
            stop.set_attribute("style:type", tab_stop.kind().as_str());
        }
        stops.add_child(stop);
    }
    element.add_child(stops);
}

/// Document-scoped table of automatic styles.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::style::{Direction, StyleRegistry, TableCellStyle};
///
/// let mut first = TableCellStyle::new();
/// first.add_border(Direction::Top, "1pt solid #000000");
/// first.add_border(Direction::Left, "none");
///
/// let mut second = TableCellStyle::new();
/// second.add_border(Direction::Left, "none");
/// second.add_border(Direction::Top, "1pt solid #000000");
///
/// let mut registry = StyleRegistry::new();
/// let name = registry.resolve(&first);
/// assert_eq!(registry.resolve(&second), name);
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    records: Vec<StyleRecord>,
    index: HashMap<String, usize>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical name of `style`, registering it on first sight.
    ///
    /// A record already stored under the computed name is kept as is.
    pub fn resolve<S: StyleDefinition + ?Sized>(&mut self, style: &S) -> String {
        let family = style.family();
        let properties = style.properties();
        let name = canonical_name(family, &properties);

        if !self.index.contains_key(&name) {
            self.index.insert(name.clone(), self.records.len());
            self.records.push(StyleRecord {
                name: name.clone(),
                family,
                properties,
            });
        }

        name
    }

    /// Look up a registered style by name
    pub fn get(&self, name: &str) -> Option<&StyleRecord> {
        self.index.get(name).map(|&position| &self.records[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered styles in registration order
    pub fn iter(&self) -> impl Iterator<Item = &StyleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the table as `office:automatic-styles`
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("office:automatic-styles");
        for record in &self.records {
            element.add_child(record.to_element());
        }
        element
    }
}
