//! Streaming conversion of loosely structured markup into document nodes.
//!
//! [`MarkupTokenizer`] turns an HTML-like string into open/text/close events
//! and [`MarkupConverter`] consumes those events in one pass, appending
//! headings, paragraphs and lists to a target container. Text is buffered
//! until the enclosing block tag closes, so inline tags such as `<b>` or `<br>`
//! never split a paragraph.

use crate::common::xml::{resolve_reference, unescape_xml};
use crate::common::{Error, Result};
use crate::odf::elements::{Children, Heading, List, ListItem, Node, Paragraph};
use crate::odf::style::ParagraphStyle;
use log::{debug, warn};
use phf::{phf_map, phf_set};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Deserialize;
use std::collections::VecDeque;

/// Heading tags and their level relative to the base level
static HEADING_TAGS: phf::Map<&'static str, u8> = phf_map! {
    "h1" => 1,
    "h2" => 2,
    "h3" => 3,
    "h4" => 4,
    "h5" => 5,
    "h6" => 6,
};

/// Tags whose text belongs to the enclosing block
static TRANSPARENT_TAGS: phf::Set<&'static str> = phf_set! {
    "a", "abbr", "b", "br", "cite", "code", "em", "font", "i", "kbd", "mark",
    "q", "s", "small", "span", "strike", "strong", "sub", "sup", "tt", "u",
};

/// Elements that never have content, with or without a closing slash
static VOID_TAGS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
};

/// One event of a markup stream.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupEvent {
    Open {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Close {
        name: String,
    },
}

impl MarkupEvent {
    /// Open event without attributes
    pub fn open(name: &str) -> Self {
        MarkupEvent::Open {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn text(text: &str) -> Self {
        MarkupEvent::Text(text.to_string())
    }

    pub fn close(name: &str) -> Self {
        MarkupEvent::Close {
            name: name.to_string(),
        }
    }
}

/// Where list items go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListNesting {
    /// A list opened inside an item belongs to that item
    #[default]
    Nested,
    /// Every list goes to the target; items go to the newest list
    Flat,
}

/// Options of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Outline level of `h1`
    pub base_level: u8,
    /// Style given to paragraphs, including those of list items
    pub paragraph_style: Option<ParagraphStyle>,
    pub list_nesting: ListNesting,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            base_level: 1,
            paragraph_style: None,
            list_nesting: ListNesting::default(),
        }
    }
}

/// Position of a list inside the target: the index of the root list, then
/// (item, node) steps down through nested lists.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListPath {
    root: usize,
    steps: Vec<(usize, usize)>,
}

fn list_at<'a>(target: &'a mut Children<Node>, path: &ListPath) -> Option<&'a mut List> {
    let mut list = target.get_mut(path.root)?.as_list_mut()?;
    for &(item, node) in &path.steps {
        list = list
            .get_item_mut(item)?
            .content_mut()
            .get_mut(node)?
            .as_list_mut()?;
    }
    Some(list)
}

fn detached() -> Error {
    Error::DetachedTarget("list under construction".to_string())
}

#[derive(Debug)]
struct ListFrame {
    path: ListPath,
    /// Tag stack length right after the list tag was pushed
    depth: usize,
    current_item: Option<usize>,
}

/// Event-driven markup to node converter.
///
/// # Examples
///
/// ```
/// use flat_odt::odf::elements::{Children, Node};
/// use flat_odt::odf::odt::{ConvertOptions, MarkupConverter};
///
/// let mut body: Children<Node> = Children::new();
/// MarkupConverter::new(&mut body, ConvertOptions::default())
///     .convert("<h1>Title</h1><p>Fish &amp; <b>chips</b></p>")
///     .unwrap();
///
/// assert_eq!(body.get(0).unwrap().as_heading().unwrap().text(), "Title");
/// assert_eq!(body.get(1).unwrap().as_paragraph().unwrap().text(), "Fish & chips");
/// ```
pub struct MarkupConverter<'t> {
    target: &'t mut Children<Node>,
    options: ConvertOptions,
    tags: Vec<String>,
    pending: String,
    lists: Vec<ListFrame>,
    current_list: Option<ListPath>,
}

impl<'t> MarkupConverter<'t> {
    pub fn new(target: &'t mut Children<Node>, options: ConvertOptions) -> Self {
        Self {
            target,
            options,
            tags: Vec::new(),
            pending: String::new(),
            lists: Vec::new(),
            current_list: None,
        }
    }

    /// Convert a whole markup string.
    ///
    /// Input that does not start with `<` becomes a single paragraph. Text
    /// still pending when the input ends is dropped.
    pub fn convert(&mut self, markup: &str) -> Result<()> {
        if markup.is_empty() {
            return Ok(());
        }
        if !markup.starts_with('<') {
            let paragraph = self.paragraph(markup);
            self.target.append_paragraph(paragraph);
            return Ok(());
        }

        for event in MarkupTokenizer::new(markup) {
            self.feed(event?)?;
        }
        Ok(())
    }

    /// Consume one event
    pub fn feed(&mut self, event: MarkupEvent) -> Result<()> {
        match event {
            MarkupEvent::Open { name, .. } => self.open(name),
            MarkupEvent::Text(text) => {
                self.pending.push_str(&text);
                Ok(())
            },
            MarkupEvent::Close { name } => self.close(&name),
        }
    }

    fn open(&mut self, name: String) -> Result<()> {
        if TRANSPARENT_TAGS.contains(name.as_str()) {
            self.tags.push(name);
            return Ok(());
        }

        let is_list = name == "ul" || name == "ol";
        match (is_list, self.options.list_nesting) {
            (true, ListNesting::Flat) => {
                self.target.append_list(List::new());
                self.current_list = Some(ListPath {
                    root: self.target.len() - 1,
                    steps: Vec::new(),
                });
                self.flush_pending()?;
                self.tags.push(name);
            },
            (true, ListNesting::Nested) => {
                self.flush_pending()?;
                let path = self.open_nested_list()?;
                self.tags.push(name);
                self.lists.push(ListFrame {
                    path,
                    depth: self.tags.len(),
                    current_item: None,
                });
            },
            (false, _) => {
                self.flush_pending()?;
                if name == "li" {
                    if let Some(frame) = self.lists.last_mut() {
                        frame.current_item = None;
                    }
                }
                self.tags.push(name);
            },
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        if name == "br" {
            self.pending.push('\n');
        } else if !TRANSPARENT_TAGS.contains(name) {
            let text = std::mem::take(&mut self.pending);
            if let Some(tag) = self.block_tag() {
                self.flush(&tag, text)?;
            }
        }
        self.pop_tag(name);
        Ok(())
    }

    /// Flush non-empty pending text before a block tag opens
    fn flush_pending(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.pending);
        match self.block_tag() {
            Some(tag) => self.flush(&tag, text),
            None => Ok(()),
        }
    }

    /// Innermost open tag that is not transparent
    fn block_tag(&self) -> Option<String> {
        self.tags
            .iter()
            .rev()
            .find(|tag| !TRANSPARENT_TAGS.contains(tag.as_str()))
            .cloned()
    }

    fn pop_tag(&mut self, name: &str) {
        if self.tags.last().is_some_and(|top| top == name) {
            self.tags.pop();
        } else if let Some(at) = self.tags.iter().rposition(|tag| tag == name) {
            self.tags.truncate(at);
        } else {
            debug!("Ignoring unmatched closing tag </{}>", name);
        }

        while self
            .lists
            .last()
            .is_some_and(|frame| frame.depth > self.tags.len())
        {
            self.lists.pop();
        }
    }

    fn flush(&mut self, tag: &str, text: String) -> Result<()> {
        if let Some(&n) = HEADING_TAGS.get(tag) {
            let level = self.options.base_level.saturating_add(n - 1);
            self.block_target()?.append_heading(Heading::new(&text, level));
        } else if tag == "p" {
            let paragraph = self.paragraph(&text);
            self.block_target()?.append_paragraph(paragraph);
        } else if tag == "li" {
            self.flush_item(text)?;
        } else if !text.trim().is_empty() {
            debug!("Dropping text inside <{}>", tag);
        }
        Ok(())
    }

    fn flush_item(&mut self, text: String) -> Result<()> {
        match self.options.list_nesting {
            ListNesting::Flat => {
                let Some(path) = self.current_list.clone() else {
                    self.orphan_item(text);
                    return Ok(());
                };
                let item = ListItem::with_paragraph(self.paragraph(&text));
                list_at(self.target, &path)
                    .ok_or_else(detached)?
                    .append_item(item);
            },
            ListNesting::Nested => {
                let Some(frame) = self.lists.last() else {
                    self.orphan_item(text);
                    return Ok(());
                };
                // an item that already has content ignores whitespace-only text
                if frame.current_item.is_none() || !text.trim().is_empty() {
                    let paragraph = self.paragraph(&text);
                    let (_, item) = self.current_item()?;
                    item.content_mut().append_paragraph(paragraph);
                }
            },
        }
        Ok(())
    }

    fn orphan_item(&mut self, text: String) {
        warn!("List item outside of a list; writing it as a paragraph");
        let paragraph = self.paragraph(&text);
        self.target.append_paragraph(paragraph);
    }

    fn paragraph(&self, text: &str) -> Paragraph {
        Paragraph::with_style(text, self.options.paragraph_style.as_ref())
    }

    /// Current item of the innermost list, created when missing
    fn current_item(&mut self) -> Result<(usize, &mut ListItem)> {
        let frame = self.lists.last_mut().ok_or_else(detached)?;
        let list = list_at(self.target, &frame.path).ok_or_else(detached)?;
        let index = match frame.current_item {
            Some(index) => index,
            None => {
                list.append_item(ListItem::new());
                let index = list.size() - 1;
                frame.current_item = Some(index);
                index
            },
        };
        let item = list.get_item_mut(index).ok_or_else(detached)?;
        Ok((index, item))
    }

    /// Whether the innermost list-related open tag is an item
    fn inside_item(&self) -> bool {
        !self.lists.is_empty()
            && self
                .tags
                .iter()
                .rev()
                .find(|tag| matches!(tag.as_str(), "li" | "ul" | "ol"))
                .is_some_and(|tag| tag == "li")
    }

    /// Container that headings and paragraphs go to
    fn block_target(&mut self) -> Result<&mut Children<Node>> {
        if self.options.list_nesting == ListNesting::Nested && self.inside_item() {
            let (_, item) = self.current_item()?;
            return Ok(item.content_mut());
        }
        Ok(&mut *self.target)
    }

    fn open_nested_list(&mut self) -> Result<ListPath> {
        if !self.inside_item() {
            self.target.append_list(List::new());
            return Ok(ListPath {
                root: self.target.len() - 1,
                steps: Vec::new(),
            });
        }

        let mut path = self
            .lists
            .last()
            .map(|frame| frame.path.clone())
            .ok_or_else(detached)?;
        let (item_index, item) = self.current_item()?;
        item.content_mut().append_list(List::new());
        path.steps.push((item_index, item.content().len() - 1));
        Ok(path)
    }
}

/// Tokenizer producing [`MarkupEvent`]s from a markup string.
///
/// Tag names are lowercased, `<x/>` yields an open and a close event, and void
/// elements such as `<br>` written without a slash are closed immediately.
/// Entity and character references are decoded. The first syntax error ends
/// the stream with [`Error::Markup`].
///
/// # Examples
///
/// ```
/// use flat_odt::odf::odt::{MarkupEvent, MarkupTokenizer};
///
/// let events: Vec<MarkupEvent> = MarkupTokenizer::new("<P>a<BR>b</P>")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     events,
///     [
///         MarkupEvent::open("p"),
///         MarkupEvent::text("a"),
///         MarkupEvent::open("br"),
///         MarkupEvent::close("br"),
///         MarkupEvent::text("b"),
///         MarkupEvent::close("p"),
///     ]
/// );
/// ```
pub struct MarkupTokenizer<'a> {
    reader: Reader<&'a [u8]>,
    queue: VecDeque<MarkupEvent>,
    done: bool,
}

impl<'a> MarkupTokenizer<'a> {
    pub fn new(markup: &'a str) -> Self {
        let mut reader = Reader::from_str(markup);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        Self {
            reader,
            queue: VecDeque::new(),
            done: false,
        }
    }

    fn read_next(&mut self) -> Result<bool> {
        match self.reader.read_event()? {
            Event::Start(e) => {
                let (name, attributes) = read_tag(&e)?;
                let void = VOID_TAGS.contains(name.as_str());
                self.queue.push_back(MarkupEvent::Open {
                    name: name.clone(),
                    attributes,
                });
                if void {
                    self.queue.push_back(MarkupEvent::Close { name });
                }
            },
            Event::Empty(e) => {
                let (name, attributes) = read_tag(&e)?;
                self.queue.push_back(MarkupEvent::Open {
                    name: name.clone(),
                    attributes,
                });
                self.queue.push_back(MarkupEvent::Close { name });
            },
            Event::End(e) => {
                let name = String::from_utf8(e.name().as_ref().to_vec())?.to_lowercase();
                if !VOID_TAGS.contains(name.as_str()) {
                    self.queue.push_back(MarkupEvent::Close { name });
                }
            },
            Event::Text(t) => {
                let text = String::from_utf8(t.to_vec())?;
                if !text.is_empty() {
                    self.queue.push_back(MarkupEvent::Text(text));
                }
            },
            Event::CData(t) => {
                self.queue
                    .push_back(MarkupEvent::Text(String::from_utf8(t.to_vec())?));
            },
            Event::GeneralRef(r) => {
                let name = String::from_utf8(r.to_vec())?;
                let text = resolve_reference(&name).unwrap_or_else(|| format!("&{};", name));
                self.queue.push_back(MarkupEvent::Text(text));
            },
            Event::Eof => return Ok(false),
            _ => {},
        }
        Ok(true)
    }
}

fn read_tag(e: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>)> {
    let name = String::from_utf8(e.name().as_ref().to_vec())?.to_lowercase();
    let mut attributes = Vec::new();
    for attr in e.html_attributes() {
        let attr = attr?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())?.to_lowercase();
        let value = String::from_utf8(attr.value.to_vec())?;
        attributes.push((key, unescape_xml(&value)));
    }
    Ok((name, attributes))
}

impl Iterator for MarkupTokenizer<'_> {
    type Item = Result<MarkupEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(Ok(event));
            }
            if self.done {
                return None;
            }
            match self.read_next() {
                Ok(true) => {},
                Ok(false) => self.done = true,
                Err(err) => {
                    self.done = true;
                    return Some(Err(Error::Markup(format!(
                        "{} at position {}",
                        err,
                        self.reader.error_position()
                    ))));
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::OdfNode;

    fn convert(markup: &str, options: ConvertOptions) -> Children<Node> {
        let mut body = Children::new();
        MarkupConverter::new(&mut body, options).convert(markup).unwrap();
        body
    }

    fn item_texts(list: &List) -> Vec<&str> {
        list.get_items().iter().filter_map(|item| item.text()).collect()
    }

    #[test]
    fn test_headings_paragraph_and_list() {
        let body = convert(
            "<h1>Title</h1><p>Body<br/>More</p><ul><li>One</li><li>Two</li></ul>",
            ConvertOptions::default(),
        );

        assert_eq!(body.len(), 3);
        let heading = body.get(0).unwrap().as_heading().unwrap();
        assert_eq!((heading.text(), heading.level()), ("Title", 1));
        assert_eq!(body.get(1).unwrap().as_paragraph().unwrap().text(), "Body\nMore");
        assert_eq!(item_texts(body.get(2).unwrap().as_list().unwrap()), ["One", "Two"]);
    }

    #[test]
    fn test_base_level_offsets_headings() {
        let options = ConvertOptions {
            base_level: 3,
            ..ConvertOptions::default()
        };
        let body = convert("<h1>a</h1><h2>b</h2><h6>c</h6>", options);
        let levels: Vec<u8> = body
            .iter()
            .filter_map(|node| node.as_heading())
            .map(|h| h.level())
            .collect();
        assert_eq!(levels, [3, 4, 8]);
    }

    #[test]
    fn test_plain_and_empty_input() {
        let mut style = ParagraphStyle::new();
        style.set_font_size(8.0);
        let options = ConvertOptions {
            paragraph_style: Some(style.clone()),
            ..ConvertOptions::default()
        };

        let body = convert("just <b>text</b>", options.clone());
        let paragraph = body.get(0).unwrap().as_paragraph().unwrap();
        assert_eq!(paragraph.text(), "just <b>text</b>");
        assert_eq!(paragraph.style(), Some(&style));

        assert!(convert("", options).is_empty());
    }

    #[test]
    fn test_inline_tags_do_not_split_paragraphs() {
        let body = convert(
            "<p>a <b>bold</b> and <i>italic</i> word</p>",
            ConvertOptions::default(),
        );
        assert_eq!(body.len(), 1);
        assert_eq!(
            body.get(0).unwrap().as_paragraph().unwrap().text(),
            "a bold and italic word"
        );
    }

    #[test]
    fn test_text_outside_blocks_is_dropped() {
        let body = convert("<div>loose</div><p>kept</p>trailing", ConvertOptions::default());
        assert_eq!(body.len(), 1);
        assert_eq!(body.get(0).unwrap().as_paragraph().unwrap().text(), "kept");
    }

    #[test]
    fn test_nested_lists_attach_to_items() {
        let body = convert(
            "<ul><li>One<ul><li>Sub</li></ul></li><li>Two</li></ul>",
            ConvertOptions::default(),
        );

        assert_eq!(body.len(), 1);
        let outer = body.get(0).unwrap().as_list().unwrap();
        assert_eq!(item_texts(outer), ["One", "Two"]);

        let first = outer.get_item(0).unwrap();
        let inner = first.content().get(1).unwrap().as_list().unwrap();
        assert_eq!(item_texts(inner), ["Sub"]);
    }

    #[test]
    fn test_text_after_nested_list_stays_in_item() {
        let body = convert(
            "<ol><li>A<ol><li>x</li></ol>B</li></ol>",
            ConvertOptions::default(),
        );
        let item = body.get(0).unwrap().as_list().unwrap().get_item(0).unwrap();
        let kinds: Vec<&str> = item
            .content()
            .iter()
            .map(|node| node.kind().element_name())
            .collect();
        assert_eq!(kinds, ["text:p", "text:list", "text:p"]);
    }

    #[test]
    fn test_whitespace_after_nested_list_is_ignored() {
        let body = convert(
            "<ul>\n  <li>A<ul><li>x</li></ul>\n  </li>\n</ul>",
            ConvertOptions::default(),
        );
        let item = body.get(0).unwrap().as_list().unwrap().get_item(0).unwrap();
        let kinds: Vec<&str> = item
            .content()
            .iter()
            .map(|node| node.kind().element_name())
            .collect();
        assert_eq!(kinds, ["text:p", "text:list"]);
        assert_eq!(item.text(), Some("A"));
    }

    #[test]
    fn test_empty_item_keeps_its_paragraph() {
        let body = convert("<ul><li></li><li> </li></ul>", ConvertOptions::default());
        let list = body.get(0).unwrap().as_list().unwrap();
        assert_eq!(item_texts(list), ["", " "]);
    }

    #[test]
    fn test_flat_lists_go_to_target() {
        let options = ConvertOptions {
            list_nesting: ListNesting::Flat,
            ..ConvertOptions::default()
        };
        let body = convert(
            "<ul><li>One<ul><li>Sub</li></ul></li><li>Two</li></ul>",
            options,
        );

        assert_eq!(body.len(), 2);
        assert_eq!(item_texts(body.get(0).unwrap().as_list().unwrap()), Vec::<&str>::new());
        assert_eq!(
            item_texts(body.get(1).unwrap().as_list().unwrap()),
            ["One", "Sub", "", "Two"]
        );
    }

    #[test]
    fn test_paragraph_inside_item() {
        let body = convert("<ul><li><p>inner</p></li></ul>", ConvertOptions::default());
        let list = body.get(0).unwrap().as_list().unwrap();
        assert_eq!(list.size(), 1);
        assert_eq!(item_texts(list), ["inner"]);
    }

    #[test]
    fn test_item_without_list_becomes_paragraph() {
        let body = convert("<li>stray</li>", ConvertOptions::default());
        assert_eq!(body.get(0).unwrap().as_paragraph().unwrap().text(), "stray");
    }

    #[test]
    fn test_feeding_events_directly() {
        let mut body = Children::new();
        let mut converter = MarkupConverter::new(&mut body, ConvertOptions::default());
        for event in [
            MarkupEvent::open("p"),
            MarkupEvent::text("one"),
            MarkupEvent::text(" two"),
            MarkupEvent::close("p"),
            MarkupEvent::open("p"),
            MarkupEvent::text("never closed"),
        ] {
            converter.feed(event).unwrap();
        }
        assert_eq!(body.len(), 1);
        assert_eq!(body.get(0).unwrap().as_paragraph().unwrap().text(), "one two");
    }

    #[test]
    fn test_tokenizer_entities_and_attributes() {
        let events: Vec<MarkupEvent> =
            MarkupTokenizer::new(r#"<A HREF="x?a=1&amp;b=2">&lt;&#65;&nbsp;</A><img src='i.png'>"#)
                .collect::<Result<_>>()
                .unwrap();

        assert_eq!(
            events[0],
            MarkupEvent::Open {
                name: "a".to_string(),
                attributes: vec![("href".to_string(), "x?a=1&b=2".to_string())],
            }
        );
        let text: String = events
            .iter()
            .filter_map(|e| match e {
                MarkupEvent::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "<A\u{a0}");
        assert_eq!(events.last(), Some(&MarkupEvent::close("img")));
    }

    #[test]
    fn test_html_named_entities_are_decoded() {
        let body = convert(
            "<p>Gr&uuml;&szlig;e &auml; &deg; &euro;</p><ul><li>&Ouml;l &amp; &eacute;t&eacute;</li></ul>",
            ConvertOptions::default(),
        );
        assert_eq!(body.get(0).unwrap().as_paragraph().unwrap().text(), "Grüße ä ° €");
        assert_eq!(item_texts(body.get(1).unwrap().as_list().unwrap()), ["Öl & été"]);
    }

    #[test]
    fn test_unknown_entity_is_kept_literally() {
        let body = convert("<p>&notanentity;</p>", ConvertOptions::default());
        assert_eq!(body.get(0).unwrap().as_paragraph().unwrap().text(), "&notanentity;");
    }

    #[test]
    fn test_malformed_markup_is_an_error() {
        let mut body = Children::new();
        let result = MarkupConverter::new(&mut body, ConvertOptions::default()).convert("<p <<");
        assert!(matches!(result, Err(Error::Markup(_))));
    }
}
