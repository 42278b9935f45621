//! Report builder configuration.
//!
//! The defaults reproduce the classic report layout: Arial body text, small
//! table text, bold table headers and a tiny monospace code font. Any part can
//! be overridden from YAML; missing keys keep their default.
//!
//! ```yaml
//! standard:
//!   font_name: Liberation Serif
//!   font_size: 11.0
//! borders:
//!   thick: "1.5pt solid #000000"
//! list_nesting: flat
//! ```

use super::document::FontFace;
use super::layout::BorderLines;
use super::markup::ListNesting;
use crate::common::{Error, Result};
use crate::odf::style::{FontPitch, Padding, ParagraphStyle, Typeface};
use serde::Deserialize;

/// Font settings of one default paragraph style.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextStyleConfig {
    pub font_name: String,
    pub font_size: f64,
    #[serde(default)]
    pub bold: bool,
}

impl TextStyleConfig {
    fn new(font_name: &str, font_size: f64, bold: bool) -> Self {
        Self {
            font_name: font_name.to_string(),
            font_size,
            bold,
        }
    }

    /// Build the paragraph style these settings describe
    pub fn to_style(&self) -> ParagraphStyle {
        let mut style = ParagraphStyle::new();
        style.set_font_size(self.font_size);
        style.set_font_name(&self.font_name);
        if self.bold {
            style.set_typeface(Typeface::Bold);
        }
        style
    }
}

/// Settings of a [`ReportBuilder`](super::ReportBuilder).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Fonts declared in every report
    pub fonts: Vec<FontFace>,
    /// Body text outside of tables
    pub standard: TextStyleConfig,
    /// Text of regular table rows
    pub table: TextStyleConfig,
    /// Text of header rows
    pub table_header: TextStyleConfig,
    /// Code paragraphs
    pub code: TextStyleConfig,
    pub borders: BorderLines,
    /// Cell padding used by [`ReportBuilder::table_options`](super::ReportBuilder::table_options)
    pub table_padding: Padding,
    pub list_nesting: ListNesting,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fonts: vec![
                FontFace::new("Ubuntu Mono", "monospace", FontPitch::Variable),
                FontFace::new("Arial", "Arial", FontPitch::Variable),
            ],
            standard: TextStyleConfig::new("Arial", 10.0, false),
            table: TextStyleConfig::new("Arial", 8.0, false),
            table_header: TextStyleConfig::new("Arial", 12.0, true),
            code: TextStyleConfig::new("Ubuntu Mono", 6.0, false),
            borders: BorderLines::default(),
            table_padding: Padding::uniform("1pt"),
            list_nesting: ListNesting::default(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.fonts.len(), 2);
        assert_eq!(config.table_header.to_style().typeface(), Typeface::Bold);
        assert_eq!(config.code.to_style().font_name(), Some("Ubuntu Mono"));
        assert_eq!(config.standard.to_style().font_size(), Some(10.0));
        assert_eq!(config.table_padding.all.as_deref(), Some("1pt"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ReportConfig::from_yaml_str(
            "standard:\n  font_name: Liberation Serif\n  font_size: 11.0\n\
             borders:\n  thick: \"2pt solid #ff0000\"\n\
             list_nesting: flat\n",
        )
        .unwrap();

        assert_eq!(config.standard.font_name, "Liberation Serif");
        assert_eq!(config.standard.font_size, 11.0);
        assert!(!config.standard.bold);
        assert_eq!(config.borders.thick, "2pt solid #ff0000");
        assert_eq!(config.borders.thin, "0.5pt solid #000000");
        assert_eq!(config.list_nesting, ListNesting::Flat);
        assert_eq!(config.table, ReportConfig::default().table);
    }

    #[test]
    fn test_fonts_from_yaml() {
        let config = ReportConfig::from_yaml_str(
            "fonts:\n  - name: Mono\n    family: DejaVu Sans Mono\n    pitch: fixed\n",
        )
        .unwrap();
        assert_eq!(
            config.fonts,
            [FontFace::new("Mono", "DejaVu Sans Mono", FontPitch::Fixed)]
        );
    }

    #[test]
    fn test_invalid_yaml_is_a_config_error() {
        let result = ReportConfig::from_yaml_str("standard: [1, 2");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yaml");
        std::fs::write(&path, "code:\n  font_name: Courier\n  font_size: 7.0\n").unwrap();

        let config = ReportConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.code.font_size, 7.0);
    }
}
