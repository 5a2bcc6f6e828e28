//! Resolution of declared annotations into per-member serialization
//! directives.
//!
//! The annotation vocabulary is small and fixed:
//!
//! | Annotation  | Meaning                                                |
//! |-------------|--------------------------------------------------------|
//! | `tag`       | Overrides the element name; the explicit `false` value |
//! |             | suppresses the wrapping tag entirely. The `item`       |
//! |             | parameter names sequence items.                        |
//! | `attribute` | Writes the value as an attribute of the parent element |
//! | `skipEmpty` | Omits the member when its text coerces to empty        |
//! | `rawXml`    | Inlines the value verbatim as a pre-formed fragment    |
//! | `ignore`    | Excludes the member from serialization                 |
//!
//! Everything else is defaulted from the member itself: an unannotated
//! member always resolves to a valid directive.

use tagwright_reflect::{Annotation, AnnotationValue, MemberInfo};

use crate::error::{Result, XmlError};
use crate::utils;

/// Overrides the element name; `false` suppresses the tag.
pub const TAG: &str = "tag";
/// Requests attribute placement on the parent element.
pub const ATTRIBUTE: &str = "attribute";
/// Requests omission of empty values.
pub const SKIP_EMPTY: &str = "skipEmpty";
/// Marks the member as producing pre-formed XML.
pub const RAW_XML: &str = "rawXml";
/// Excludes the member from serialization.
pub const IGNORE: &str = "ignore";

/// Parameter of `tag` naming sequence items.
pub const ITEM_PARAM: &str = "item";
/// Item element name used when `tag` does not provide one.
pub const DEFAULT_ITEM_TAG: &str = "item";

/// Tag disposition of a resolved directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagName {
    /// Wrap the value in an element of this name.
    Named(String),
    /// No wrapping tag: the value goes out as an attribute, an inline
    /// fragment, or bare sequence items.
    Suppressed,
}

impl TagName {
    pub fn as_named(&self) -> Option<&str> {
        match self {
            TagName::Named(name) => Some(name),
            TagName::Suppressed => None,
        }
    }
}

/// Resolved serialization metadata for one member.
///
/// A pure function of the member's static metadata: resolving the same
/// member any number of times yields equal directives.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    /// The default-derived member name, used for attribute naming when the
    /// tag is suppressed and for error reporting.
    pub member_name: String,
    pub tag: TagName,
    pub attribute: bool,
    pub skip_empty: bool,
    pub raw_fragment: bool,
    /// Element name for items of a sequence value.
    pub item_tag: String,
}

/// Resolves a member's declared annotations into a [`Directive`].
///
/// Fails only on contradictory annotations: `attribute` and `rawXml`
/// together have no defined placement.
pub fn resolve(member: &MemberInfo) -> Result<Directive> {
    let member_name = utils::default_tag_name(member);
    let annotations = member.annotations();

    let mut tag = TagName::Named(member_name.clone());
    let mut item_tag = DEFAULT_ITEM_TAG.to_string();
    if let Some(annotation) = annotations.get(TAG) {
        if let Some(value) = annotation.value() {
            if value.is_false() {
                tag = TagName::Suppressed;
            } else if let Some(name) = value.as_str() {
                tag = TagName::Named(name.to_string());
            }
        }
        if let Some(item) = annotation.param(ITEM_PARAM).and_then(AnnotationValue::as_str) {
            item_tag = item.to_string();
        }
    }

    let flag = |name: &str| {
        annotations
            .get(name)
            .map(|a: &Annotation| !a.value().is_some_and(AnnotationValue::is_false))
            .unwrap_or(false)
    };
    let attribute = flag(ATTRIBUTE);
    let skip_empty = flag(SKIP_EMPTY);
    let raw_fragment = flag(RAW_XML);

    if attribute && raw_fragment {
        return Err(XmlError::InvalidDirective {
            member: member.name().to_string(),
            reason: "`attribute` and `rawXml` cannot be combined".to_string(),
        });
    }

    Ok(Directive {
        member_name,
        tag,
        attribute,
        skip_empty,
        raw_fragment,
        item_tag,
    })
}
