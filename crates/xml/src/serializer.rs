//! Object-graph orchestration and the public serializer facade.
//!
//! [`XmlSerializer`] is the entry point: it owns the custom-serializer
//! registry and the member matcher, dispatches a root value to the right
//! treatment, and provides the `to_xml_*` conveniences that pair it with the
//! shipped [`XmlWriter`]. The private orchestrator walks one object's
//! matched members, resolves their directives and hands each value to its
//! delegate; delegates re-enter the facade for nested objects, bounding the
//! recursion by the depth of the object graph.
//!
//! The registry and matcher are populated while the serializer is still
//! `&mut` and only read during serialization, so fully configured
//! serializers can be shared across threads.

use std::any::TypeId;
use std::collections::HashMap;
use std::io::Write;

use once_cell::sync::Lazy;
use tracing::debug;

use tagwright_reflect::{MemberKind, Reflect, Value};

use crate::delegate::Delegate;
use crate::directive::{self, Directive};
use crate::error::{Result, XmlError};
use crate::matcher::{CompositeMatcher, Matcher, default_matcher};
use crate::writer::{XmlWrite, XmlWriter};

/// Element name wrapping a scalar or sequence root when the caller does not
/// supply one.
pub const ROOT_TAG: &str = "root";

static DEFAULT_MATCHER: Lazy<CompositeMatcher> = Lazy::new(default_matcher);

/// A per-type serialization override.
///
/// A registered custom serializer replaces annotation-based traversal for
/// its type entirely; it receives the facade back for recursing into any
/// nested values it chooses to.
pub trait CustomSerializer: Send + Sync {
    fn serialize(
        &self,
        object: &dyn Reflect,
        facade: &XmlSerializer,
        writer: &mut dyn XmlWrite,
        tag: Option<&str>,
    ) -> Result<()>;
}

/// The public serialization entry point.
pub struct XmlSerializer {
    serializers: HashMap<TypeId, Box<dyn CustomSerializer>>,
    matcher: Option<Box<dyn Matcher>>,
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlSerializer {
    pub fn new() -> Self {
        Self {
            serializers: HashMap::new(),
            matcher: None,
        }
    }

    /// Replaces the default member matcher.
    pub fn with_matcher(mut self, matcher: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Registers a custom serializer for `T`.
    ///
    /// Lookup is by exact concrete type; subtypes or related types are not
    /// matched. Registration happens at configuration time, before the
    /// serializer is shared.
    pub fn register<T: Reflect>(&mut self, serializer: impl CustomSerializer + 'static) {
        debug!(type_name = std::any::type_name::<T>(), "Registering custom serializer");
        self.serializers.insert(TypeId::of::<T>(), Box::new(serializer));
    }

    /// Serializes a root value to an XML string.
    pub fn to_xml_string(&self, root: &Value) -> Result<String> {
        let mut buffer = Vec::new();
        self.to_xml_writer(root, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| XmlError::Custom(e.to_string()))
    }

    /// Serializes a root value to an XML byte vector.
    pub fn to_xml_vec(&self, root: &Value) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.to_xml_writer(root, &mut buffer)?;
        Ok(buffer)
    }

    /// Serializes a root value to any IO sink.
    pub fn to_xml_writer<W: Write>(&self, root: &Value, sink: W) -> Result<()> {
        let mut writer = XmlWriter::new(sink);
        self.serialize_value(root, None, &mut writer)?;
        writer.finish()?;
        Ok(())
    }

    /// Top-level dispatch onto an already-open writer.
    ///
    /// A scalar root becomes a single element holding the scalar's text, an
    /// object root goes through member traversal, and a sequence root is
    /// written as items under the root tag. `tag` overrides the element
    /// name; scalars and sequences fall back to [`ROOT_TAG`], objects to
    /// their type name.
    pub fn serialize_value(
        &self,
        value: &Value,
        tag: Option<&str>,
        writer: &mut dyn XmlWrite,
    ) -> Result<()> {
        match value {
            Value::Object(object) => self.serialize_object(object.as_ref(), tag, writer),
            Value::List(_) => {
                let directive = Directive {
                    member_name: tag.unwrap_or(ROOT_TAG).to_string(),
                    tag: directive::TagName::Named(tag.unwrap_or(ROOT_TAG).to_string()),
                    attribute: false,
                    skip_empty: false,
                    raw_fragment: false,
                    item_tag: directive::DEFAULT_ITEM_TAG.to_string(),
                };
                Delegate::Iterator.serialize(value, &directive, self, writer)
            }
            scalar => {
                let name = tag.unwrap_or(ROOT_TAG);
                let text = scalar.scalar_text().unwrap_or(std::borrow::Cow::Borrowed(""));
                writer.write_element(name, &[], &text)
            }
        }
    }

    /// Serializes one reflected object through the orchestrator.
    pub fn serialize_object(
        &self,
        object: &dyn Reflect,
        tag: Option<&str>,
        writer: &mut dyn XmlWrite,
    ) -> Result<()> {
        ObjectSerializer { facade: self }.serialize(object, tag, writer)
    }

    fn custom_for(&self, type_id: TypeId) -> Option<&dyn CustomSerializer> {
        self.serializers.get(&type_id).map(|serializer| serializer.as_ref())
    }

    fn matcher(&self) -> &dyn Matcher {
        match &self.matcher {
            Some(matcher) => matcher.as_ref(),
            None => &*DEFAULT_MATCHER,
        }
    }
}

/// Walks one object's matched members and coordinates the delegates.
struct ObjectSerializer<'a> {
    facade: &'a XmlSerializer,
}

impl ObjectSerializer<'_> {
    fn serialize(
        &self,
        object: &dyn Reflect,
        tag: Option<&str>,
        writer: &mut dyn XmlWrite,
    ) -> Result<()> {
        if let Some(custom) = self.facade.custom_for(object.type_id()) {
            debug!(type_name = object.type_name(), "Dispatching to custom serializer");
            return custom.serialize(object, self.facade, writer, tag);
        }

        let name = tag.unwrap_or_else(|| object.type_name());
        debug!(type_name = object.type_name(), element = name, "Serializing object");
        writer.write_start_element(name)?;

        let members = object.members();
        let matcher = self.facade.matcher();
        let mut ordered: Vec<usize> = (0..members.len())
            .filter(|&index| matcher.matches(&members[index]))
            .collect();
        // Properties before methods; declaration order within each group.
        ordered.sort_by_key(|&index| match members[index].kind() {
            MemberKind::Property => 0,
            _ => 1,
        });

        let mut resolved = Vec::with_capacity(ordered.len());
        for index in ordered {
            resolved.push((index, directive::resolve(&members[index])?));
        }

        // Attributes must land on the still-open start tag, so they are
        // written ahead of all content members.
        for (index, directive) in resolved.iter().filter(|(_, d)| d.attribute) {
            self.write_member(object, *index, directive, writer)?;
        }
        for (index, directive) in resolved.iter().filter(|(_, d)| !d.attribute) {
            self.write_member(object, *index, directive, writer)?;
        }

        writer.write_end_element()
    }

    fn write_member(
        &self,
        object: &dyn Reflect,
        index: usize,
        directive: &Directive,
        writer: &mut dyn XmlWrite,
    ) -> Result<()> {
        let member = &object.members()[index];
        let value = object.read(index).map_err(|source| XmlError::MemberAccess {
            member: member.name().to_string(),
            source,
        })?;
        Delegate::select(directive, &value).serialize(&value, directive, self.facade, writer)
    }
}
