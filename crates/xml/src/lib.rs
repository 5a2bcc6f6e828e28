//! Annotation-driven XML serialization for reflected object graphs.
//!
//! Application types describe themselves through the `tagwright-reflect`
//! member-descriptor model; this crate turns those descriptions into a
//! streamed XML document. No per-class serialization code is needed: the
//! engine inspects public properties and zero-argument public methods,
//! interprets their declared annotations and writes the result through a
//! quick-xml-backed streaming writer.
//!
//! ## Architecture
//!
//! The engine is a small pipeline:
//!
//! - **Matcher** ([`matcher`]): decides which reflected members participate
//!   (visibility, staticness, arity, reserved names, the `ignore` marker).
//! - **Resolver** ([`directive`]): turns a member's annotations into a
//!   [`Directive`] — tag name, attribute placement, skip-empty policy,
//!   raw-fragment flag.
//! - **Delegates** ([`delegate`]): one strategy per value treatment
//!   (attribute, fragment, sequence, element, nested object), selected by a
//!   single exhaustive match with the precedence
//!   attribute > fragment > sequence > element.
//! - **Orchestrator / facade** ([`serializer`]): walks an object's matched
//!   members (properties before methods, declaration order), consults the
//!   custom-serializer registry, and recurses into nested objects.
//! - **Writer** ([`writer`]): the streaming output seam; the shipped
//!   [`XmlWriter`] emits quick-xml events.
//!
//! ## Annotation vocabulary
//!
//! | Annotation  | Effect                                                  |
//! |-------------|---------------------------------------------------------|
//! | `tag`       | Element name override; `false` suppresses the tag       |
//! | `attribute` | Value becomes an attribute of the parent element        |
//! | `skipEmpty` | Empty values are omitted instead of emitted             |
//! | `rawXml`    | Value is pre-formed XML, inlined without escaping       |
//! | `ignore`    | Member never serializes                                 |
//!
//! ## Example
//!
//! ```ignore
//! use tagwright_reflect::Value;
//! use tagwright_xml::XmlSerializer;
//!
//! let serializer = XmlSerializer::new();
//! let xml = serializer.to_xml_string(&Value::object(book))?;
//! ```
//!
//! ## Limits
//!
//! Serialization is one-way; there is no deserializer. The traversal is
//! depth-first with no cycle detection, so a self-referential object graph
//! recurses until the stack is exhausted.

pub mod delegate;
pub mod directive;
pub mod error;
pub mod matcher;
pub mod serializer;
mod utils;
pub mod writer;

pub use delegate::Delegate;
pub use directive::{Directive, TagName, resolve};
pub use error::{Result, XmlError};
pub use matcher::{
    AnnotationMatcher, CompositeMatcher, Matcher, StructuralMatcher, default_matcher,
};
pub use serializer::{CustomSerializer, ROOT_TAG, XmlSerializer};
pub use writer::{XmlWrite, XmlWriter};
