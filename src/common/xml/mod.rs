//! XML text helpers shared by the serializer and the markup tokenizer.

mod escape;

pub use escape::{escape_xml, resolve_reference, unescape_xml};
