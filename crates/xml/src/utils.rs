//! Utility functions for name derivation and fragment validation.

use quick_xml::Reader;
use quick_xml::events::Event;
use tagwright_reflect::{MemberInfo, MemberKind};

/// Converts a boolean to its XML string representation.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Derives the default tag name of a member.
///
/// Properties keep their name verbatim. Method names lose a leading `get`
/// prefix (and a separator underscore) and the remainder is lower-cased;
/// a name that would become empty is kept as-is.
pub fn default_tag_name(member: &MemberInfo) -> String {
    match member.kind() {
        MemberKind::Method => strip_get_prefix(member.name()),
        _ => member.name().to_string(),
    }
}

fn strip_get_prefix(name: &str) -> String {
    let Some(rest) = name.strip_prefix("get") else {
        return name.to_string();
    };
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    if rest.is_empty() {
        return name.to_string();
    }
    rest.to_lowercase()
}

/// Checks that a string is a well-formed XML fragment: parseable, balanced,
/// rooted in element content, with no text outside an element.
///
/// Returns the reason on rejection.
pub fn check_fragment(xml: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(xml);
    let mut depth: usize = 0;
    let mut seen_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(_)) => {
                depth += 1;
                seen_element = true;
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return Err("unbalanced end tag".to_string());
                }
                depth -= 1;
            }
            Ok(Event::Empty(_)) => {
                seen_element = true;
            }
            Ok(Event::Text(text)) => {
                if depth == 0 && !String::from_utf8_lossy(&text).trim().is_empty() {
                    return Err("text content outside a root element".to_string());
                }
            }
            Ok(Event::CData(_)) => {
                if depth == 0 {
                    return Err("CDATA outside a root element".to_string());
                }
            }
            Ok(Event::Decl(_) | Event::DocType(_)) => {
                return Err("document-level markup in fragment".to_string());
            }
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    if depth != 0 {
        return Err("unclosed element".to_string());
    }
    if !seen_element {
        return Err("no element content".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_to_string() {
        assert_eq!(bool_to_string(true), "true");
        assert_eq!(bool_to_string(false), "false");
    }

    #[test]
    fn test_property_name_kept_verbatim() {
        assert_eq!(default_tag_name(&MemberInfo::property("noXml")), "noXml");
        assert_eq!(default_tag_name(&MemberInfo::property("getaway")), "getaway");
    }

    #[test]
    fn test_method_get_prefix_stripped() {
        assert_eq!(default_tag_name(&MemberInfo::method("getTitle")), "title");
        assert_eq!(default_tag_name(&MemberInfo::method("get_title")), "title");
        assert_eq!(default_tag_name(&MemberInfo::method("getISBN")), "isbn");
        assert_eq!(default_tag_name(&MemberInfo::method("noXml")), "noXml");
        assert_eq!(default_tag_name(&MemberInfo::method("get")), "get");
    }

    #[test]
    fn test_well_formed_fragments() {
        assert!(check_fragment("<p/>").is_ok());
        assert!(check_fragment("<p>hello</p>").is_ok());
        assert!(check_fragment("<a><b>x</b></a>").is_ok());
        assert!(check_fragment("<a/><b/>").is_ok());
        assert!(check_fragment("  <p>spaced</p>  ").is_ok());
        assert!(check_fragment("<!-- note --><p/>").is_ok());
    }

    #[test]
    fn test_malformed_fragments() {
        assert!(check_fragment("").is_err());
        assert!(check_fragment("   ").is_err());
        assert!(check_fragment("bar").is_err());
        assert!(check_fragment("<a>").is_err());
        assert!(check_fragment("</a>").is_err());
        assert!(check_fragment("<a></b>").is_err());
        assert!(check_fragment("text<b/>").is_err());
        assert!(check_fragment("<?xml version=\"1.0\"?><a/>").is_err());
    }
}
