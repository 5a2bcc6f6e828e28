//! Member descriptors and runtime values for annotation-driven serialization.
//!
//! This crate is the reflection capability underneath the `tagwright-xml`
//! serializer: the embedding application describes each serializable type as
//! a table of members (properties and zero-argument methods) carrying
//! declared annotations, and exposes reads of those members as [`Value`]s.
//!
//! ## Architecture
//!
//! - [`MemberInfo`] captures one method or property: name, kind, visibility,
//!   staticness, arity and declared [`Annotations`].
//! - [`TypeDescriptor`] is the per-type member table, built once (typically
//!   in a `once_cell::sync::Lazy`) and never invalidated — types are static
//!   at runtime.
//! - [`Reflect`] is the trait the serializer consumes: static metadata via
//!   `members`, dynamic reads via `read`, and `Any` as a supertrait so a
//!   registry can key on the concrete `TypeId`.
//!
//! ## Example
//!
//! ```ignore
//! static DESCRIPTOR: Lazy<TypeDescriptor> = Lazy::new(|| {
//!     TypeDescriptor::new("book")
//!         .with_member(MemberInfo::property("title"))
//!         .with_member(
//!             MemberInfo::property("isbn").annotate(Annotation::new("attribute")),
//!         )
//! });
//!
//! impl Reflect for Book {
//!     fn type_name(&self) -> &str {
//!         DESCRIPTOR.type_name()
//!     }
//!
//!     fn members(&self) -> &[MemberInfo] {
//!         DESCRIPTOR.members()
//!     }
//!
//!     fn read(&self, index: usize) -> Result<Value, AccessError> {
//!         match index {
//!             0 => Ok(self.title.clone().into()),
//!             1 => Ok(self.isbn.clone().into()),
//!             _ => Err(AccessError::NoSuchMember { index }),
//!         }
//!     }
//! }
//! ```

use std::any::Any;

use thiserror::Error;

pub mod annotation;
pub mod member;
pub mod value;

pub use annotation::{Annotation, AnnotationValue, Annotations, VALUE_PARAM};
pub use member::{MemberInfo, MemberKind, TypeDescriptor, Visibility};
pub use value::Value;

/// A member read or invocation failure.
///
/// Raised by [`Reflect::read`] implementations when the underlying logic of
/// a method fails at runtime; the serializer propagates it without retrying.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The index does not name a member of the type.
    #[error("no member at index {index}")]
    NoSuchMember { index: usize },

    /// The member's underlying logic failed.
    #[error("invoking `{member}` failed: {message}")]
    Invocation { member: String, message: String },
}

/// The reflection capability the serializer traverses.
///
/// `Any` is a supertrait so callers can recover the concrete `TypeId` of a
/// value behind `dyn Reflect` for exact-type registry lookups.
pub trait Reflect: Any {
    /// The type-derived default element name.
    fn type_name(&self) -> &str;

    /// The captured member table, in declaration order.
    fn members(&self) -> &[MemberInfo];

    /// Reads the member at `index` in [`Reflect::members`] order: a property
    /// read, or a method invocation with no arguments.
    fn read(&self, index: usize) -> Result<Value, AccessError>;
}
