//! Declared annotation metadata attached to reflected members.
//!
//! Annotations are the declarative side of serialization: the embedding
//! application attaches them to member descriptors, and the serializer
//! interprets a fixed vocabulary of names when resolving how a member is
//! written. Parameter values arrive pre-parsed — the descriptor layer never
//! deals in raw annotation strings.

use std::collections::BTreeMap;

/// The conventional parameter name carrying an annotation's main value.
pub const VALUE_PARAM: &str = "value";

/// A pre-parsed annotation parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationValue {
    /// A string parameter.
    Str(String),
    /// A boolean parameter. `Bool(false)` doubles as the explicit "false"
    /// sentinel an annotation author writes to suppress a wrapping tag.
    Bool(bool),
}

impl AnnotationValue {
    /// Returns the string content, if this is a string parameter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(s) => Some(s),
            AnnotationValue::Bool(_) => None,
        }
    }

    /// Returns the boolean content, if this is a boolean parameter.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            AnnotationValue::Str(_) => None,
        }
    }

    /// True only for the explicit `false` sentinel.
    pub fn is_false(&self) -> bool {
        matches!(self, AnnotationValue::Bool(false))
    }
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        AnnotationValue::Str(s.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(s: String) -> Self {
        AnnotationValue::Str(s)
    }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        AnnotationValue::Bool(b)
    }
}

/// A single declared annotation: a name plus key/value parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    name: String,
    params: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    /// Creates an annotation with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Sets the conventional `value` parameter.
    pub fn with_value(self, value: impl Into<AnnotationValue>) -> Self {
        self.with_param(VALUE_PARAM, value)
    }

    /// Sets an arbitrary named parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The annotation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The conventional `value` parameter, if present.
    pub fn value(&self) -> Option<&AnnotationValue> {
        self.param(VALUE_PARAM)
    }

    /// Looks up a parameter by key.
    pub fn param(&self, key: &str) -> Option<&AnnotationValue> {
        self.params.get(key)
    }
}

/// The ordered set of annotations declared on one member.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    /// Looks up an annotation by name. First declaration wins.
    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.0.iter().find(|a| a.name() == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }
}

impl From<Vec<Annotation>> for Annotations {
    fn from(annotations: Vec<Annotation>) -> Self {
        Self(annotations)
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
