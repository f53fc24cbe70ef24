//! Search criteria.
//!
//! [`QueryElement`] is a small criteria tree that executors can either
//! evaluate directly ([`QueryElement::matches`]) or render as an RFC 4515
//! filter string through its `Display` implementation.

use crate::guid::Guid;
use crate::search::GUID_ATTRIBUTE;
use crate::value::{AttributeValue, FieldMap};
use std::fmt;

/// A search predicate over directory entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryElement {
    /// Attribute has a value equal to `value`.
    Equals { attribute: String, value: String },
    /// Attribute has a value matching `pattern`, where `*` matches any run
    /// of characters.
    Substring { attribute: String, pattern: String },
    /// Attribute is present.
    Present { attribute: String },
    /// Every element matches.
    And(Vec<QueryElement>),
    /// At least one element matches.
    Or(Vec<QueryElement>),
    /// The element does not match.
    Not(Box<QueryElement>),
}

impl QueryElement {
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn substring(attribute: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Substring {
            attribute: attribute.into(),
            pattern: pattern.into(),
        }
    }

    pub fn present(attribute: impl Into<String>) -> Self {
        Self::Present {
            attribute: attribute.into(),
        }
    }

    pub fn and(elements: Vec<QueryElement>) -> Self {
        Self::And(elements)
    }

    pub fn or(elements: Vec<QueryElement>) -> Self {
        Self::Or(elements)
    }

    pub fn negate(element: QueryElement) -> Self {
        Self::Not(Box::new(element))
    }

    /// Evaluate the predicate against an entry.
    ///
    /// Attribute names compare case-insensitively, values exactly. The
    /// `guid` pseudo-attribute refers to the entry's own GUID.
    pub fn matches(&self, guid: &Guid, entry: &FieldMap) -> bool {
        match self {
            Self::Equals { attribute, value } => {
                attribute_values(guid, entry, attribute).is_some_and(|v| v.contains(value))
            }
            Self::Substring { attribute, pattern } => attribute_values(guid, entry, attribute)
                .is_some_and(|v| v.values().iter().any(|candidate| wildcard_match(pattern, candidate))),
            Self::Present { attribute } => {
                attribute_values(guid, entry, attribute).is_some_and(|v| !v.is_empty())
            }
            Self::And(elements) => elements.iter().all(|e| e.matches(guid, entry)),
            Self::Or(elements) => elements.iter().any(|e| e.matches(guid, entry)),
            Self::Not(element) => !element.matches(guid, entry),
        }
    }
}

impl fmt::Display for QueryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { attribute, value } => {
                write!(f, "({}={})", attribute, escape_filter_value(value))
            }
            Self::Substring { attribute, pattern } => {
                let escaped: Vec<String> = pattern.split('*').map(escape_filter_value).collect();
                write!(f, "({}={})", attribute, escaped.join("*"))
            }
            Self::Present { attribute } => write!(f, "({}=*)", attribute),
            Self::And(elements) => write_composite(f, '&', elements),
            Self::Or(elements) => write_composite(f, '|', elements),
            Self::Not(element) => write!(f, "(!{})", element),
        }
    }
}

fn write_composite(f: &mut fmt::Formatter<'_>, operator: char, elements: &[QueryElement]) -> fmt::Result {
    write!(f, "({}", operator)?;
    for element in elements {
        write!(f, "{}", element)?;
    }
    write!(f, ")")
}

fn attribute_values(guid: &Guid, entry: &FieldMap, attribute: &str) -> Option<AttributeValue> {
    if attribute.eq_ignore_ascii_case(GUID_ATTRIBUTE) {
        return Some(AttributeValue::Single(guid.to_string()));
    }
    entry
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(attribute))
        .map(|(_, value)| value.clone())
}

/// Match `value` against a pattern where `*` matches any run of characters.
fn wildcard_match(pattern: &str, value: &str) -> bool {
    let segments: Vec<&str> = pattern.split('*').collect();
    if segments.len() == 1 {
        return pattern == value;
    }

    let first = segments[0];
    let last = segments[segments.len() - 1];
    if !value.starts_with(first) || value.len() < first.len() + last.len() {
        return false;
    }
    if !value.ends_with(last) {
        return false;
    }

    let mut remaining = &value[first.len()..value.len() - last.len()];
    for segment in &segments[1..segments.len() - 1] {
        match remaining.find(segment) {
            Some(position) => remaining = &remaining[position + segment.len()..],
            None => return false,
        }
    }
    true
}

/// Escape a filter assertion value per RFC 4515.
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\\' => escaped.push_str("\\5c"),
            '\0' => escaped.push_str("\\00"),
            _ => escaped.push(c),
        }
    }
    escaped
}
