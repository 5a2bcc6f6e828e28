//! Error types for XML serialization.

use tagwright_reflect::AccessError;
use thiserror::Error;

/// The primary error type for serialization operations.
///
/// Every failure is fatal to the current serialization call; there is no
/// partial-document recovery. The only sanctioned omission path is the
/// skip-if-empty directive, which is not an error.
#[derive(Debug, Error)]
pub enum XmlError {
    /// A member marked as a raw XML fragment produced content that is
    /// neither well-formed XML nor eligible for empty-skip.
    #[error("invalid XML fragment from `{member}`: {reason}")]
    InvalidFragment { member: String, reason: String },

    /// Reading a matched member failed at runtime.
    #[error("failed to read `{member}`")]
    MemberAccess {
        member: String,
        #[source]
        source: AccessError,
    },

    /// A member's annotations are contradictory or violate a placement
    /// invariant.
    #[error("invalid directive for `{member}`: {reason}")]
    InvalidDirective { member: String, reason: String },

    /// A value landed in a position that only accepts text.
    #[error("unsupported value for `{member}`: {reason}")]
    UnsupportedValue { member: String, reason: String },

    /// An attribute was written after its start tag had been flushed.
    #[error("attribute `{name}` written outside an open start tag")]
    MisplacedAttribute { name: String },

    /// XML event error from the underlying writer or reader.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error during serialization.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for serialization operations.
pub type Result<T> = std::result::Result<T, XmlError>;
