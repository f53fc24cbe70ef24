//! Entity type hooks.
//!
//! An [`EntityType`] names a schema and customizes how caller input is
//! normalized and how the entry's identifier is derived.

use crate::error::{EntityError, EntityResult};
use crate::guid::escape_rdn_value;
use crate::value::{AttributeValue, FieldMap};
use std::fmt::Debug;

/// Per-type behavior of an entity.
pub trait EntityType: Debug + Send + Sync {
    /// Name of the entity type; also the id of its schema.
    fn name(&self) -> &str;

    /// Normalize caller input before handlers see it.
    fn prepare(&self, info: &mut FieldMap) {
        let _ = info;
    }

    /// Internal attribute whose value names the entry.
    fn identifying_attribute(&self) -> &str {
        "cn"
    }

    /// Derive the entry identifier (an RDN) from the internal dataset.
    ///
    /// The default is `attr=value` built from the first value of
    /// [`identifying_attribute`](EntityType::identifying_attribute), escaped
    /// for use in a distinguished name.
    fn generate_id(&self, internal: &FieldMap) -> EntityResult<String> {
        let attribute = self.identifying_attribute();
        internal
            .get(attribute)
            .and_then(AttributeValue::first)
            .filter(|value| !value.is_empty())
            .map(|value| format!("{}={}", attribute, escape_rdn_value(value)))
            .ok_or_else(|| EntityError::MissingIdentifier {
                entity_type: self.name().to_string(),
                attribute: attribute.to_string(),
            })
    }
}

/// A person, named by `cn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Person;

impl Person {
    pub const NAME: &'static str = "person";
}

impl EntityType for Person {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// Trims surrounding whitespace from the name attributes.
    fn prepare(&self, info: &mut FieldMap) {
        for attribute in ["cn", "sn", "givenName"] {
            if let Some(AttributeValue::Single(value)) = info.get_mut(attribute) {
                let trimmed = value.trim();
                if trimmed.len() != value.len() {
                    *value = trimmed.to_string();
                }
            }
        }
    }
}

/// A group of entries, named by `cn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Group;

impl Group {
    pub const NAME: &'static str = "group";
}

impl EntityType for Group {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// Drops repeated `member` values, keeping the first occurrence.
    fn prepare(&self, info: &mut FieldMap) {
        if let Some(AttributeValue::Multi(members)) = info.get_mut("member") {
            let mut seen = std::collections::BTreeSet::new();
            members.retain(|member| seen.insert(member.clone()));
        }
    }
}
