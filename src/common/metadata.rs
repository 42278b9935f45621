//! Document metadata.
//!
//! This module provides the metadata record written as `office:meta` at the
//! top of every flat document.

use crate::odf::elements::element::Element;
use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Document metadata record.
///
/// Every field is optional except the generator, the creation date (set when
/// the record is created) and the editing cycle count.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    generator: String,
    title: Option<String>,
    description: Option<String>,
    subject: Option<String>,
    keywords: Vec<String>,
    initial_creator: Option<String>,
    creator: Option<String>,
    printed_by: Option<String>,
    creation_date: Option<DateTime<Utc>>,
    date: Option<DateTime<Utc>>,
    print_date: Option<DateTime<Utc>>,
    language: Option<String>,
    editing_cycles: u32,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            generator: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            title: None,
            description: None,
            subject: None,
            keywords: Vec::new(),
            initial_creator: None,
            creator: None,
            printed_by: None,
            creation_date: Some(Utc::now()),
            date: None,
            print_date: None,
            language: None,
            editing_cycles: 1,
        }
    }
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn set_generator(&mut self, generator: &str) {
        self.generator = generator.to_string();
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = Some(description.to_string());
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn set_subject(&mut self, subject: &str) {
        self.subject = Some(subject.to_string());
    }

    /// Keywords, each written as its own `meta:keyword`
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn add_keyword(&mut self, keyword: &str) {
        self.keywords.push(keyword.to_string());
    }

    pub fn clear_keywords(&mut self) {
        self.keywords.clear();
    }

    pub fn initial_creator(&self) -> Option<&str> {
        self.initial_creator.as_deref()
    }

    pub fn set_initial_creator(&mut self, creator: &str) {
        self.initial_creator = Some(creator.to_string());
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    pub fn set_creator(&mut self, creator: &str) {
        self.creator = Some(creator.to_string());
    }

    pub fn printed_by(&self) -> Option<&str> {
        self.printed_by.as_deref()
    }

    pub fn set_printed_by(&mut self, printed_by: &str) {
        self.printed_by = Some(printed_by.to_string());
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    pub fn set_creation_date(&mut self, date: Option<DateTime<Utc>>) {
        self.creation_date = date;
    }

    /// Date of the last modification
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<DateTime<Utc>>) {
        self.date = date;
    }

    pub fn print_date(&self) -> Option<DateTime<Utc>> {
        self.print_date
    }

    pub fn set_print_date(&mut self, date: Option<DateTime<Utc>>) {
        self.print_date = date;
    }

    /// Language tag such as `en-US`
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = Some(language.to_string());
    }

    pub fn editing_cycles(&self) -> u32 {
        self.editing_cycles
    }

    pub fn set_editing_cycles(&mut self, cycles: u32) {
        self.editing_cycles = cycles;
    }

    /// Render the record as `office:meta`
    pub fn to_element(&self) -> Element {
        let mut meta = Element::new("office:meta");
        push_field(&mut meta, "meta:generator", Some(&self.generator));
        push_field(&mut meta, "dc:title", self.title.as_deref());
        push_field(&mut meta, "dc:description", self.description.as_deref());
        push_field(&mut meta, "dc:subject", self.subject.as_deref());
        for keyword in &self.keywords {
            push_field(&mut meta, "meta:keyword", Some(keyword));
        }
        push_field(&mut meta, "meta:initial-creator", self.initial_creator.as_deref());
        push_field(&mut meta, "dc:creator", self.creator.as_deref());
        push_field(&mut meta, "meta:printed-by", self.printed_by.as_deref());
        push_date(&mut meta, "meta:creation-date", self.creation_date);
        push_date(&mut meta, "dc:date", self.date);
        push_date(&mut meta, "meta:print-date", self.print_date);
        push_field(&mut meta, "dc:language", self.language.as_deref());
        push_field(
            &mut meta,
            "meta:editing-cycles",
            Some(&self.editing_cycles.to_string()),
        );
        meta
    }
}

fn push_field(parent: &mut Element, tag: &str, value: Option<&str>) {
    if let Some(value) = value {
        let mut field = Element::new(tag);
        field.push_text(value);
        parent.add_child(field);
    }
}

fn push_date(parent: &mut Element, tag: &str, value: Option<DateTime<Utc>>) {
    if let Some(date) = value {
        push_field(parent, tag, Some(&date.format(DATE_FORMAT).to_string()));
    }
}
