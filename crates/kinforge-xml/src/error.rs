//! Error types for markup parsing and schema-checked tree mutation.

use std::path::PathBuf;

use crate::schema::AttrType;

/// Errors raised by the element tree and its parser.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// The source text is not well-formed markup.
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),

    /// The schema does not allow `child` directly under `parent`.
    #[error("<{child}> is not allowed inside <{parent}>")]
    NotAllowedChild { parent: String, child: String },

    /// The schema has no rule for this element type.
    #[error("unknown element <{0}>")]
    UnknownElement(String),

    /// The schema does not declare this attribute on this element type.
    #[error("attribute '{attribute}' is not allowed on <{element}>")]
    NotAllowedAttribute { element: String, attribute: String },

    /// A value of the wrong type was written to a declared attribute.
    #[error("attribute '{attribute}' on <{element}> expects {expected}")]
    AttributeType {
        element: String,
        attribute: String,
        expected: AttrType,
    },

    /// Failed to read a markup file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl XmlError {
    /// Whether this error comes from a schema check on the write path.
    pub const fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Self::NotAllowedChild { .. }
                | Self::UnknownElement(_)
                | Self::NotAllowedAttribute { .. }
                | Self::AttributeType { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
