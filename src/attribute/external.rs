//! Handlers for external attributes, derived from stored state.

use super::{AttributeBinding, AttributeHandler, EntityAccess};
use crate::error::{EntityError, EntityResult};
use crate::value::AttributeValue;

/// The entity GUID.
#[derive(Debug, Clone)]
pub struct IdHandler {
    attribute: String,
}

impl IdHandler {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn construct(binding: &AttributeBinding) -> Box<dyn AttributeHandler> {
        Box::new(Self::new(&binding.attribute))
    }
}

impl AttributeHandler for IdHandler {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue> {
        Ok(AttributeValue::Single(entity.guid()?.to_string()))
    }
}

/// Display name: `givenName sn` when both are stored, otherwise `cn`.
#[derive(Debug, Clone)]
pub struct FullnameHandler {
    attribute: String,
}

impl FullnameHandler {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn construct(binding: &AttributeBinding) -> Box<dyn AttributeHandler> {
        Box::new(Self::new(&binding.attribute))
    }
}

impl AttributeHandler for FullnameHandler {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue> {
        let stored = entity.read_internal()?;
        let first = |name: &str| stored.get(name).and_then(AttributeValue::first);

        match (first("givenName"), first("sn"), first("cn")) {
            (Some(given), Some(surname), _) => Ok(format!("{} {}", given, surname).into()),
            (_, _, Some(cn)) => Ok(cn.into()),
            _ => Err(EntityError::no_value("cn")),
        }
    }
}

/// Number of values stored in `member`.
#[derive(Debug, Clone)]
pub struct MembercountHandler {
    attribute: String,
}

impl MembercountHandler {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn construct(binding: &AttributeBinding) -> Box<dyn AttributeHandler> {
        Box::new(Self::new(&binding.attribute))
    }
}

impl AttributeHandler for MembercountHandler {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue> {
        let count = match entity.get_internal("member") {
            Ok(members) => members.len(),
            Err(EntityError::NoValue { .. }) => 0,
            Err(e) => return Err(e),
        };
        Ok(count.to_string().into())
    }
}
