//! Paragraph styles.

use super::registry::{PropertyGroup, PropertySet, StyleDefinition, StyleFamily};
use super::types::{HorizontalAlignment, TabStop, TextTransformation, Typeface};

/// Character and paragraph formatting of a `text:p` or `text:h`.
///
/// Only properties that were set are written; a fresh style renders as an
/// empty `style:style`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphStyle {
    font_name: Option<String>,
    font_size: Option<f64>,
    typeface: Typeface,
    color: Option<String>,
    alignment: HorizontalAlignment,
    transformation: TextTransformation,
    keep_together: bool,
    page_break_before: bool,
    tab_stops: Vec<TabStop>,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of a font declared in the document's font-face list
    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    pub fn set_font_name(&mut self, name: &str) {
        self.font_name = Some(name.to_string());
    }

    /// Font size in points
    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = Some(size);
    }

    pub fn typeface(&self) -> Typeface {
        self.typeface
    }

    pub fn set_typeface(&mut self, typeface: Typeface) {
        self.typeface = typeface;
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Set the text color as a `#rrggbb` string
    pub fn set_color(&mut self, color: &str) {
        self.color = Some(color.to_string());
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: HorizontalAlignment) {
        self.alignment = alignment;
    }

    pub fn transformation(&self) -> TextTransformation {
        self.transformation
    }

    pub fn set_transformation(&mut self, transformation: TextTransformation) {
        self.transformation = transformation;
    }

    pub fn keep_together(&self) -> bool {
        self.keep_together
    }

    /// Keep all lines of the paragraph on one page
    pub fn set_keep_together(&mut self, keep: bool) {
        self.keep_together = keep;
    }

    pub fn page_break_before(&self) -> bool {
        self.page_break_before
    }

    pub fn set_page_break_before(&mut self, page_break: bool) {
        self.page_break_before = page_break;
    }

    pub fn tab_stops(&self) -> &[TabStop] {
        &self.tab_stops
    }

    /// Add a tab stop, keeping the stops ordered by position
    pub fn add_tab_stop(&mut self, tab_stop: TabStop) {
        let at = self
            .tab_stops
            .iter()
            .position(|existing| existing.position() > tab_stop.position())
            .unwrap_or(self.tab_stops.len());
        self.tab_stops.insert(at, tab_stop);
    }

    pub fn clear_tab_stops(&mut self) {
        self.tab_stops.clear();
    }
}

impl StyleDefinition for ParagraphStyle {
    fn family(&self) -> StyleFamily {
        StyleFamily::Paragraph
    }

    fn properties(&self) -> PropertySet {
        let mut properties = PropertySet::new();

        if let Some(name) = &self.font_name {
            properties.set(PropertyGroup::Text, "style:font-name", name);
        }
        if let Some(size) = self.font_size {
            properties.set(PropertyGroup::Text, "fo:font-size", &format!("{}pt", size));
        }
        if self.typeface.is_bold() {
            properties.set(PropertyGroup::Text, "fo:font-weight", "bold");
        }
        if self.typeface.is_italic() {
            properties.set(PropertyGroup::Text, "fo:font-style", "italic");
        }
        if let Some(color) = &self.color {
            properties.set(PropertyGroup::Text, "fo:color", color);
        }
        if let Some(transform) = self.transformation.as_str() {
            properties.set(PropertyGroup::Text, "fo:text-transform", transform);
        }

        if let Some(align) = self.alignment.as_str() {
            properties.set(PropertyGroup::Paragraph, "fo:text-align", align);
        }
        if self.keep_together {
            properties.set(PropertyGroup::Paragraph, "fo:keep-together", "always");
        }
        if self.page_break_before {
            properties.set(PropertyGroup::Paragraph, "fo:break-before", "page");
        }
        properties.set_tab_stops(&self.tab_stops);

        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::style::TabStopType;

    #[test]
    fn test_unset_style_has_no_properties() {
        assert!(ParagraphStyle::new().properties().is_empty());
    }

    #[test]
    fn test_property_mapping() {
        let mut style = ParagraphStyle::new();
        style.set_font_name("Arial");
        style.set_font_size(12.0);
        style.set_typeface(Typeface::BoldItalic);
        style.set_alignment(HorizontalAlignment::Center);
        style.set_page_break_before(true);

        let props = style.properties();
        assert_eq!(props.get(PropertyGroup::Text, "style:font-name"), Some("Arial"));
        assert_eq!(props.get(PropertyGroup::Text, "fo:font-size"), Some("12pt"));
        assert_eq!(props.get(PropertyGroup::Text, "fo:font-weight"), Some("bold"));
        assert_eq!(props.get(PropertyGroup::Text, "fo:font-style"), Some("italic"));
        assert_eq!(props.get(PropertyGroup::Paragraph, "fo:text-align"), Some("center"));
        assert_eq!(props.get(PropertyGroup::Paragraph, "fo:break-before"), Some("page"));
        assert_eq!(props.get(PropertyGroup::Paragraph, "fo:keep-together"), None);
    }

    #[test]
    fn test_tab_stops_stay_sorted() {
        let mut style = ParagraphStyle::new();
        style.add_tab_stop(TabStop::new(5.0, TabStopType::Left));
        style.add_tab_stop(TabStop::new(1.5, TabStopType::Center));
        style.add_tab_stop(TabStop::new(3.0, TabStopType::Right));

        let positions: Vec<f64> = style.tab_stops().iter().map(|t| t.position()).collect();
        assert_eq!(positions, [1.5, 3.0, 5.0]);
    }
}
