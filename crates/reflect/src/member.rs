//! Reflected member descriptors and per-type descriptor tables.

use crate::annotation::{Annotation, Annotations};

/// What kind of member a descriptor describes.
///
/// Constructors and destructors are classified by the descriptor author so
/// the serializer can exclude them without name heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
    Constructor,
    Destructor,
}

/// Declared visibility of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// A method or property discovered on a type.
///
/// Immutable once captured; a type builds its members once into a
/// [`TypeDescriptor`] with process lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberInfo {
    name: String,
    kind: MemberKind,
    visibility: Visibility,
    is_static: bool,
    arity: usize,
    annotations: Annotations,
}

impl MemberInfo {
    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            is_static: false,
            arity: 0,
            annotations: Annotations::new(),
        }
    }

    /// A public, non-static property.
    pub fn property(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Property)
    }

    /// A public, non-static, zero-argument method.
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Method)
    }

    /// A constructor. Never eligible for serialization.
    pub fn constructor(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Constructor)
    }

    /// A destructor. Never eligible for serialization.
    pub fn destructor(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Destructor)
    }

    /// Marks the member as private.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Marks the member as static.
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Sets the declared parameter count of a method.
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    /// Attaches a declared annotation.
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Declared parameter count. Always 0 for properties.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

/// The captured member table of one type.
///
/// Built once per type, typically inside a `once_cell::sync::Lazy` so the
/// descriptor is constructed on first use and lives for the process:
///
/// ```ignore
/// static DESCRIPTOR: Lazy<TypeDescriptor> = Lazy::new(|| {
///     TypeDescriptor::new("book")
///         .with_member(MemberInfo::property("title"))
///         .with_member(MemberInfo::method("getAuthor"))
/// });
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDescriptor {
    type_name: String,
    members: Vec<MemberInfo>,
}

impl TypeDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            members: Vec::new(),
        }
    }

    /// Appends a member. Declaration order is the order of these calls.
    pub fn with_member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }
}
