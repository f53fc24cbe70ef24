//! Attribute values and field-value maps.
//!
//! Directory attributes hold either a single scalar or an ordered sequence of
//! scalars. Multi-valued attributes follow replace-not-merge semantics: the
//! value supplied on save is the complete desired set, and an empty sequence
//! removes the attribute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from attribute name to value.
///
/// A `BTreeMap` keeps iteration order, and therefore error messages and
/// search projections, deterministic.
pub type FieldMap = BTreeMap<String, AttributeValue>;

/// A single- or multi-valued attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// One scalar value.
    Single(String),
    /// An ordered sequence of scalar values.
    Multi(Vec<String>),
}

impl AttributeValue {
    /// Get the first value, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Multi(values) => values.first().map(String::as_str),
        }
    }

    /// Get every value as a slice-like vector of string references.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(values) => values.len(),
        }
    }

    /// True for an empty multi-value, which means "remove the attribute".
    ///
    /// A single empty string is still a value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Multi(values) if values.is_empty())
    }

    /// Whether any value equals `candidate`.
    pub fn contains(&self, candidate: &str) -> bool {
        self.values().iter().any(|value| *value == candidate)
    }

    /// Apply `f` to every value, keeping the single/multi shape.
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        match self {
            Self::Single(value) => Self::Single(f(value)),
            Self::Multi(values) => Self::Multi(values.iter().map(|v| f(v)).collect()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{}", value),
            Self::Multi(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// Build a [`FieldMap`] from `(name, value)` pairs.
///
/// ```rust
/// use directory_entity::value::{field_map, AttributeValue};
///
/// let info = field_map([("cn", "Jane Doe"), ("sn", "Doe")]);
/// assert_eq!(info["cn"], AttributeValue::from("Jane Doe"));
/// ```
pub fn field_map<I, K, V>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeValue>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}
