//! Attribute handlers.
//!
//! An [`AttributeHandler`] knows how to read, update and claim one semantic
//! attribute of an entity type. Internal handlers map caller-supplied fields
//! onto attributes stored verbatim in the directory; external handlers
//! compute derived values from the entity's stored state.
//!
//! Handlers are looked up by implementation name through the
//! [`HandlerRegistry`]. Names are capitalization-normalized with
//! [`normalize_handler_name`], so `fullName`, `FULLNAME` and `Fullname`
//! resolve to the same implementation.
//!
//! # Built-in handlers
//!
//! | Name | Kind | Behavior |
//! |---|---|---|
//! | `Value` | internal | pass-through |
//! | `Lowercase` | internal | lower-cases every value |
//! | `Password` | internal | stores a `{SHA256}` hash, also claims `password` |
//! | `Objectclass` | internal | always writes the schema's object classes, rejects undeclared ones |
//! | `Id` | external | the entity GUID |
//! | `Fullname` | external | `givenName sn`, falling back to `cn` |
//! | `Membercount` | external | number of `member` values |

pub mod external;
pub mod internal;
pub mod registry;

pub use registry::{HandlerConstructor, HandlerRegistry, normalize_handler_name};

use crate::error::EntityResult;
use crate::guid::Guid;
use crate::value::{AttributeValue, FieldMap};
use std::fmt::Debug;

/// Read access to the entity a handler is bound to.
///
/// External handlers use this to derive their values; it may trigger
/// directory reads.
pub trait EntityAccess {
    /// Name of the entity's type.
    fn entity_type(&self) -> &str;

    /// The entity GUID.
    fn guid(&self) -> EntityResult<&Guid>;

    /// The persisted values of every declared internal attribute.
    fn read_internal(&self) -> EntityResult<FieldMap>;

    /// The persisted value of one declared internal attribute.
    fn get_internal(&self, name: &str) -> EntityResult<AttributeValue>;

    /// The computed value of one declared external attribute.
    fn get_external(&self, name: &str) -> EntityResult<AttributeValue>;
}

/// The attribute and entity type a handler instance is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding {
    /// Attribute name: the stored name for internal attributes, the
    /// normalized capability name for external ones.
    pub attribute: String,
    /// Name of the entity type.
    pub entity_type: String,
    /// Object classes declared by the entity type's schema.
    pub object_classes: Vec<String>,
}

impl AttributeBinding {
    pub fn new(
        attribute: impl Into<String>,
        entity_type: impl Into<String>,
        object_classes: Vec<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            entity_type: entity_type.into(),
            object_classes,
        }
    }
}

/// Resolution logic for one attribute of one entity type.
pub trait AttributeHandler: Debug + Send + Sync {
    /// The attribute this handler is bound to.
    fn attribute(&self) -> &str;

    /// Compute the attribute's current value.
    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue>;

    /// The fragment of the internal dataset this attribute contributes for
    /// the proposed changes in `info`.
    ///
    /// Must not depend on anything but `info` and the binding.
    fn update(&self, info: &FieldMap) -> FieldMap {
        let _ = info;
        FieldMap::new()
    }

    /// Reject proposed changes this handler would otherwise store
    /// incompletely. Runs before anything is written.
    fn check(&self, info: &FieldMap) -> EntityResult<()> {
        let _ = info;
        Ok(())
    }

    /// Caller-supplied keys this handler takes ownership of.
    ///
    /// A save fails if any supplied key is claimed by no handler.
    fn claims(&self) -> Vec<String> {
        Vec::new()
    }
}
