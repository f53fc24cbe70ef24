//! Directory-backed entities.
//!
//! An [`Entity`] is a typed view of one directory entry. It resolves its
//! attributes through the handlers of its type's schema, and persists caller
//! changes through a [`DirectoryGateway`], deriving the entry's GUID with an
//! [`IdentityResolver`].
//!
//! # Saving
//!
//! [`Entity::save`] takes the complete desired value of every attribute it
//! mentions (multi-valued attributes are replaced, not merged):
//!
//! 1. the entity type normalizes the input,
//! 2. every internal handler contributes its part of the dataset and claims
//!    its caller keys; unclaimed keys or input a handler rejects fail the
//!    save,
//! 3. the contributions are overlaid on the current record and required
//!    attributes are checked,
//! 4. the GUID is derived from the merged dataset,
//! 5. an existing entry is renamed first if its GUID changed and then
//!    written; a new entry is created.
//!
//! A rename followed by a failed write leaves the entry renamed with its
//! previous content. No compensation is attempted.
//!
//! # Example
//!
//! ```rust
//! use directory_entity::directory::InMemoryDirectory;
//! use directory_entity::entity::{EntityBuilder, Person};
//! use directory_entity::identity::StructureResolver;
//! use directory_entity::schema::SchemaRegistry;
//! use directory_entity::value::field_map;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = Arc::new(InMemoryDirectory::new());
//! let schema = Arc::new(SchemaRegistry::new()?);
//! let resolver = Arc::new(StructureResolver::default());
//!
//! let mut jane = EntityBuilder::new(Arc::new(Person), directory.clone(), schema, resolver)
//!     .build()?;
//! jane.save(field_map([("cn", "Jane Doe"), ("sn", "Doe"), ("password", "secret")]))?;
//!
//! assert_eq!(jane.guid()?.as_str(), "cn=Jane Doe,dc=example,dc=org");
//! assert_eq!(jane.get_external("Fullname")?.to_string(), "Jane Doe");
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod types;


pub use types::{EntityType, Group, Person};

use crate::attribute::EntityAccess;
use crate::directory::DirectoryGateway;
use crate::error::{EntityError, EntityResult, SchemaError};
use crate::guid::Guid;
use crate::identity::IdentityResolver;
use crate::schema::SchemaRegistry;
use crate::value::{AttributeValue, FieldMap};
use log::{debug, info, trace, warn};
use std::fmt;
use std::sync::Arc;

/// Builder for [`Entity`].
pub struct EntityBuilder {
    entity_type: Arc<dyn EntityType>,
    gateway: Arc<dyn DirectoryGateway>,
    schema: Arc<SchemaRegistry>,
    resolver: Arc<dyn IdentityResolver>,
    guid: Option<Guid>,
}

impl EntityBuilder {
    pub fn new(
        entity_type: Arc<dyn EntityType>,
        gateway: Arc<dyn DirectoryGateway>,
        schema: Arc<SchemaRegistry>,
        resolver: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            entity_type,
            gateway,
            schema,
            resolver,
            guid: None,
        }
    }

    /// Bind the entity to an existing entry. The entry is not read until
    /// first needed.
    pub fn with_guid(mut self, guid: Guid) -> Self {
        self.guid = Some(guid);
        self
    }

    /// Build the entity, failing if no schema is registered for its type.
    pub fn build(self) -> EntityResult<Entity> {
        let name = self.entity_type.name();
        if !self.schema.contains(name) {
            return Err(SchemaError::UnknownEntityType(name.to_string()).into());
        }
        Ok(Entity {
            entity_type: self.entity_type,
            gateway: self.gateway,
            schema: self.schema,
            resolver: self.resolver,
            guid: self.guid,
        })
    }
}

/// A persistable object stored as a directory entry.
pub struct Entity {
    entity_type: Arc<dyn EntityType>,
    gateway: Arc<dyn DirectoryGateway>,
    schema: Arc<SchemaRegistry>,
    resolver: Arc<dyn IdentityResolver>,
    guid: Option<Guid>,
}

impl Entity {
    /// Name of the entity type.
    pub fn entity_type(&self) -> &str {
        self.entity_type.name()
    }

    /// The entry GUID. Fails with [`EntityError::MissingGuid`] before the
    /// first save of a new entity.
    pub fn guid(&self) -> EntityResult<&Guid> {
        self.guid.as_ref().ok_or(EntityError::MissingGuid)
    }

    /// Whether the entry can currently be read.
    ///
    /// This is a probe: any failure, including a directory failure, yields
    /// `false` instead of an error.
    pub fn exists(&self) -> bool {
        self.probe().is_some()
    }

    fn probe(&self) -> Option<FieldMap> {
        self.guid.as_ref()?;
        match self.read_internal() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Treating {} entity as absent: {}", self.entity_type(), e);
                None
            }
        }
    }

    /// Read the persisted values of every declared internal attribute.
    ///
    /// Attributes the entry does not carry are absent from the result.
    pub fn read_internal(&self) -> EntityResult<FieldMap> {
        let guid = self.guid()?;
        let names: Vec<&str> = self
            .schema
            .get_internal_attributes(self.entity_type())?
            .iter()
            .map(|definition| definition.name.as_str())
            .collect();

        debug!("Reading {} internal attributes of {}", names.len(), guid);
        Ok(self.gateway.read_attributes(guid, &names)?)
    }

    /// Read one declared internal attribute.
    ///
    /// Fails with [`EntityError::UnsupportedAttribute`] if `name` is not
    /// declared and with [`EntityError::NoValue`] if the entry does not
    /// carry it.
    pub fn get_internal(&self, name: &str) -> EntityResult<AttributeValue> {
        let declared = self
            .schema
            .get_internal_attributes(self.entity_type())?
            .iter()
            .any(|definition| definition.name == name);
        if !declared {
            return Err(EntityError::unsupported(self.entity_type(), name));
        }

        self.read_internal()?
            .remove(name)
            .ok_or_else(|| EntityError::no_value(name))
    }

    /// Compute one declared external attribute.
    pub fn get_external(&self, name: &str) -> EntityResult<AttributeValue> {
        let handler = self.schema.external_handler(self.entity_type(), name)?;
        handler.value(self)
    }

    /// Persist `info`, creating, modifying or renaming the entry.
    pub fn save(&mut self, mut info: FieldMap) -> EntityResult<()> {
        let entity_type = self.entity_type.name().to_string();
        self.entity_type.prepare(&mut info);

        let handlers = self.schema.internal_handlers(&entity_type)?;
        let contributions = dataset::build_internal_dataset(handlers, &info)?;
        trace!(
            "Internal dataset for {} contributes {:?}",
            entity_type,
            contributions.keys().collect::<Vec<_>>()
        );

        let current = self.probe();
        let existing = current.is_some();
        let merged = dataset::merge(current.unwrap_or_default(), contributions);
        let schema = self
            .schema
            .get_schema(&entity_type)
            .ok_or_else(|| SchemaError::UnknownEntityType(entity_type.clone()))?;
        dataset::check_required(schema, &merged)?;

        let id = self.entity_type.generate_id(&merged)?;
        let target = self
            .resolver
            .generate_server_guid(&entity_type, &id, &merged)?;

        match self.guid.take() {
            Some(current_guid) if existing => {
                if current_guid != target {
                    if let Err(e) = self.gateway.rename(&current_guid, &target) {
                        self.guid = Some(current_guid);
                        return Err(e.into());
                    }
                    info!("Renamed {} {} to {}", entity_type, current_guid, target);
                }
                self.guid = Some(target.clone());
                self.gateway.save(&target, &merged)?;
                debug!("Modified {} {}", entity_type, target);
            }
            _ => {
                self.guid = Some(target.clone());
                self.gateway.add(&target, &merged)?;
                info!("Created {} {}", entity_type, target);
            }
        }

        Ok(())
    }

    /// Remove the entry. The entity is consumed.
    pub fn delete(self) -> EntityResult<()> {
        let guid = self.guid()?;
        self.gateway.delete(guid)?;
        info!("Deleted {} {}", self.entity_type(), guid);
        Ok(())
    }
}

impl EntityAccess for Entity {
    fn entity_type(&self) -> &str {
        Entity::entity_type(self)
    }

    fn guid(&self) -> EntityResult<&Guid> {
        Entity::guid(self)
    }

    fn read_internal(&self) -> EntityResult<FieldMap> {
        Entity::read_internal(self)
    }

    fn get_internal(&self, name: &str) -> EntityResult<AttributeValue> {
        Entity::get_internal(self, name)
    }

    fn get_external(&self, name: &str) -> EntityResult<AttributeValue> {
        Entity::get_external(self, name)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("entity_type", &self.entity_type.name())
            .field("guid", &self.guid)
            .finish()
    }
}
