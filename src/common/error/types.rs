//! Unified error types for the document writer.
//!
//! Structural misuse of the builders is reported through this type. Lookup
//! misses are `Option::None` and recoverable inconsistencies are logged, so
//! neither shows up here.
use thiserror::Error;

/// Main error type for document building and serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A table operation was requested while no table is open
    #[error("Cannot {operation}: no table is open")]
    NoOpenTable { operation: &'static str },

    /// A cell operation was requested before any row was started
    #[error("Cannot {operation}: the open table has no current row")]
    NoOpenRow { operation: &'static str },

    /// The node a builder cursor pointed at has been removed from the tree
    #[error("Insertion target no longer exists: {0}")]
    DetachedTarget(String),

    /// Markup could not be tokenized
    #[error("Markup error: {0}")]
    Markup(String),

    /// XML reading or writing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Image data could not be decoded or measured
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Feature disabled at compile time
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(String),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
