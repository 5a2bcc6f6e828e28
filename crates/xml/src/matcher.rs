//! Predicates deciding which reflected members participate in serialization.

use tagwright_reflect::{MemberInfo, MemberKind, Visibility};

use crate::directive::IGNORE;

/// Reserved method-name prefix, never serialized.
pub const RESERVED_PREFIX: &str = "__";

/// A predicate over reflected members.
///
/// Matchers are pure: they never fail and have no side effects. A member
/// lacking required metadata simply does not match.
pub trait Matcher: Send + Sync {
    fn matches(&self, member: &MemberInfo) -> bool;
}

/// Structural eligibility: public, non-static, and for methods zero-argument
/// with no reserved name prefix. Constructors and destructors never match.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralMatcher;

impl Matcher for StructuralMatcher {
    fn matches(&self, member: &MemberInfo) -> bool {
        if member.visibility() != Visibility::Public || member.is_static() {
            return false;
        }
        match member.kind() {
            MemberKind::Property => true,
            MemberKind::Method => {
                member.arity() == 0 && !member.name().starts_with(RESERVED_PREFIX)
            }
            MemberKind::Constructor | MemberKind::Destructor => false,
        }
    }
}

/// Annotation eligibility: excludes members carrying the explicit ignore
/// marker, regardless of structural eligibility.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnotationMatcher;

impl Matcher for AnnotationMatcher {
    fn matches(&self, member: &MemberInfo) -> bool {
        !member.annotations().has(IGNORE)
    }
}

/// Conjunction of matchers: a member must satisfy every one.
#[derive(Default)]
pub struct CompositeMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl CompositeMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, matcher: impl Matcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl Matcher for CompositeMatcher {
    fn matches(&self, member: &MemberInfo) -> bool {
        self.matchers.iter().all(|m| m.matches(member))
    }
}

/// The standard member filter: structural and annotation checks combined.
pub fn default_matcher() -> CompositeMatcher {
    CompositeMatcher::new()
        .with(StructuralMatcher)
        .with(AnnotationMatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagwright_reflect::Annotation;

    #[test]
    fn test_public_property_matches() {
        assert!(default_matcher().matches(&MemberInfo::property("title")));
    }

    #[test]
    fn test_private_and_static_members_never_match() {
        let matcher = default_matcher();
        assert!(!matcher.matches(&MemberInfo::property("title").private()));
        assert!(!matcher.matches(&MemberInfo::property("title").static_member()));
        assert!(!matcher.matches(&MemberInfo::method("getTitle").private()));
        assert!(!matcher.matches(&MemberInfo::method("getTitle").static_member()));
    }

    #[test]
    fn test_method_arity_rules() {
        let matcher = default_matcher();
        assert!(matcher.matches(&MemberInfo::method("getTitle")));
        assert!(!matcher.matches(&MemberInfo::method("setTitle").with_arity(1)));
    }

    #[test]
    fn test_reserved_prefix_and_lifecycle_members() {
        let matcher = default_matcher();
        assert!(!matcher.matches(&MemberInfo::method("__toString")));
        assert!(!matcher.matches(&MemberInfo::constructor("new")));
        assert!(!matcher.matches(&MemberInfo::destructor("drop")));
    }

    #[test]
    fn test_ignore_marker_excludes_eligible_member() {
        let member = MemberInfo::property("internal").annotate(Annotation::new(IGNORE));
        assert!(StructuralMatcher.matches(&member));
        assert!(!default_matcher().matches(&member));
    }
}
