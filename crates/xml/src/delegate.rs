//! Delegate strategies writing one member value each.
//!
//! Selection precedence when several could apply: attribute, then raw
//! fragment, then the value's own shape (sequence, object, scalar). The
//! dispatch is a single exhaustive match so the precedence lives in exactly
//! one place.

use std::borrow::Cow;

use tracing::trace;

use tagwright_reflect::{Reflect, Value};

use crate::directive::{Directive, TagName};
use crate::error::{Result, XmlError};
use crate::serializer::XmlSerializer;
use crate::utils;
use crate::writer::XmlWrite;

/// The serialization strategy chosen for one member value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delegate {
    Attribute,
    Fragment,
    Iterator,
    Element,
    Object,
}

impl Delegate {
    /// Selects the delegate for a directive/value pair.
    pub fn select(directive: &Directive, value: &Value) -> Delegate {
        if directive.attribute {
            Delegate::Attribute
        } else if directive.raw_fragment {
            Delegate::Fragment
        } else {
            match value {
                Value::List(_) => Delegate::Iterator,
                Value::Object(_) => Delegate::Object,
                _ => Delegate::Element,
            }
        }
    }

    /// Writes the value through this strategy.
    pub fn serialize(
        self,
        value: &Value,
        directive: &Directive,
        facade: &XmlSerializer,
        writer: &mut dyn XmlWrite,
    ) -> Result<()> {
        trace!(member = %directive.member_name, delegate = ?self, "Writing member");
        match self {
            Delegate::Attribute => write_attribute_value(value, directive, writer),
            Delegate::Fragment => write_fragment_value(value, directive, writer),
            Delegate::Iterator => match value {
                Value::List(items) => write_sequence(items, directive, facade, writer),
                other => Err(unsupported(directive, other, "a sequence")),
            },
            Delegate::Element => write_scalar_element(value, directive, writer),
            Delegate::Object => match value {
                Value::Object(object) => write_object_value(object.as_ref(), directive, facade, writer),
                other => Err(unsupported(directive, other, "an object")),
            },
        }
    }
}

fn unsupported(directive: &Directive, value: &Value, expected: &str) -> XmlError {
    XmlError::UnsupportedValue {
        member: directive.member_name.clone(),
        reason: format!("expected {expected}, found {value:?}"),
    }
}

fn attribute_name(directive: &Directive) -> &str {
    directive.tag.as_named().unwrap_or(&directive.member_name)
}

fn write_attribute_value(
    value: &Value,
    directive: &Directive,
    writer: &mut dyn XmlWrite,
) -> Result<()> {
    let name = attribute_name(directive);

    // Booleans are literal and unconditional; skipEmpty never applies.
    if let Value::Bool(b) = value {
        return writer.write_attribute(name, utils::bool_to_string(*b));
    }

    let Some(text) = value.scalar_text() else {
        return Err(XmlError::UnsupportedValue {
            member: directive.member_name.clone(),
            reason: "only scalar values can be placed in an attribute".to_string(),
        });
    };
    if text.is_empty() && directive.skip_empty {
        return Ok(());
    }
    writer.write_attribute(name, &text)
}

fn write_scalar_element(
    value: &Value,
    directive: &Directive,
    writer: &mut dyn XmlWrite,
) -> Result<()> {
    let TagName::Named(name) = &directive.tag else {
        return Err(XmlError::InvalidDirective {
            member: directive.member_name.clone(),
            reason: "a suppressed tag requires attribute or fragment placement".to_string(),
        });
    };

    if let Value::Bool(b) = value {
        return writer.write_element(name, &[], utils::bool_to_string(*b));
    }

    let Some(text) = value.scalar_text() else {
        return Err(XmlError::UnsupportedValue {
            member: directive.member_name.clone(),
            reason: "element content must be scalar".to_string(),
        });
    };
    if text.is_empty() && directive.skip_empty {
        return Ok(());
    }
    writer.write_element(name, &[], &text)
}

fn write_fragment_value(
    value: &Value,
    directive: &Directive,
    writer: &mut dyn XmlWrite,
) -> Result<()> {
    let Some(text) = value.scalar_text() else {
        return Err(XmlError::UnsupportedValue {
            member: directive.member_name.clone(),
            reason: "only text values can be inlined as XML fragments".to_string(),
        });
    };

    if text.is_empty() {
        if directive.skip_empty {
            return Ok(());
        }
        return Err(XmlError::InvalidFragment {
            member: directive.member_name.clone(),
            reason: "fragment is empty".to_string(),
        });
    }

    if let Err(reason) = utils::check_fragment(&text) {
        return Err(XmlError::InvalidFragment {
            member: directive.member_name.clone(),
            reason,
        });
    }

    match &directive.tag {
        TagName::Named(name) => {
            writer.write_start_element(name)?;
            writer.write_xml_fragment(&text)?;
            writer.write_end_element()
        }
        TagName::Suppressed => writer.write_xml_fragment(&text),
    }
}

fn write_sequence(
    items: &[Value],
    directive: &Directive,
    facade: &XmlSerializer,
    writer: &mut dyn XmlWrite,
) -> Result<()> {
    // Null entries never produce an item element.
    let live: Vec<&Value> = items.iter().filter(|v| !matches!(v, Value::Null)).collect();

    if live.is_empty() {
        if directive.skip_empty {
            return Ok(());
        }
        if let Some(name) = directive.tag.as_named() {
            return writer.write_element(name, &[], "");
        }
        return Ok(());
    }

    let wrapped = directive.tag.as_named().is_some();
    if let Some(name) = directive.tag.as_named() {
        writer.write_start_element(name)?;
    }

    for item in live {
        match item {
            Value::Object(object) => {
                facade.serialize_object(object.as_ref(), Some(&directive.item_tag), writer)?;
            }
            Value::List(inner) => {
                let nested = Directive {
                    member_name: directive.member_name.clone(),
                    tag: TagName::Named(directive.item_tag.clone()),
                    attribute: false,
                    skip_empty: false,
                    raw_fragment: false,
                    item_tag: directive.item_tag.clone(),
                };
                write_sequence(inner, &nested, facade, writer)?;
            }
            Value::Bool(b) => {
                writer.write_element(&directive.item_tag, &[], utils::bool_to_string(*b))?;
            }
            scalar => {
                let text = scalar.scalar_text().unwrap_or(Cow::Borrowed(""));
                writer.write_element(&directive.item_tag, &[], &text)?;
            }
        }
    }

    if wrapped {
        writer.write_end_element()?;
    }
    Ok(())
}

fn write_object_value(
    object: &dyn Reflect,
    directive: &Directive,
    facade: &XmlSerializer,
    writer: &mut dyn XmlWrite,
) -> Result<()> {
    let TagName::Named(name) = &directive.tag else {
        return Err(XmlError::InvalidDirective {
            member: directive.member_name.clone(),
            reason: "a suppressed tag cannot wrap a nested object".to_string(),
        });
    };
    facade.serialize_object(object, Some(name), writer)
}
