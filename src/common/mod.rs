//! Shared infrastructure: the error type, XML text helpers and document
//! metadata.

pub mod error;
pub mod metadata;
pub mod xml;

pub use error::{Error, Result};
pub use metadata::Meta;
