//! Unified error types for the document writer.
//!
//! This module provides a single error type shared by the element tree, the
//! builders and the serializer, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
