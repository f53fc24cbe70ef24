//! Identity resolution: where in the directory an entry lives.
//!
//! An [`IdentityResolver`] turns an entity type, its generated identifier and
//! its resolved internal dataset into a GUID. Resolvers must be pure: the
//! same inputs always yield the same GUID, which is what lets
//! [`Entity::save`](crate::entity::Entity::save) detect renames by comparing
//! GUIDs.

use crate::config::DirectoryConfig;
use crate::error::{EntityError, EntityResult, SchemaResult};
use crate::guid::Guid;
use crate::value::FieldMap;

/// Derives the canonical GUID of an entry.
pub trait IdentityResolver: Send + Sync {
    /// Place an entry of `entity_type` identified by `id` (an RDN such as
    /// `cn=Jane Doe`) in the directory hierarchy.
    ///
    /// `internal` is the full internal dataset the entry will hold, for
    /// resolvers that place entries by more than their identifier.
    fn generate_server_guid(
        &self,
        entity_type: &str,
        id: &str,
        internal: &FieldMap,
    ) -> EntityResult<Guid>;
}

/// Places entries below a per-type container under the base DN.
///
/// With the default configuration a person `cn=Jane Doe` resolves to
/// `cn=Jane Doe,dc=example,dc=org` and a group `cn=staff` to
/// `cn=staff,ou=groups,dc=example,dc=org`.
#[derive(Debug, Clone)]
pub struct StructureResolver {
    config: DirectoryConfig,
}

impl StructureResolver {
    /// Create a resolver from a configuration, validating it first.
    pub fn new(config: DirectoryConfig) -> SchemaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }
}

impl Default for StructureResolver {
    fn default() -> Self {
        Self {
            config: DirectoryConfig::default(),
        }
    }
}

impl IdentityResolver for StructureResolver {
    fn generate_server_guid(
        &self,
        entity_type: &str,
        id: &str,
        _internal: &FieldMap,
    ) -> EntityResult<Guid> {
        let missing = || EntityError::MissingIdentifier {
            entity_type: entity_type.to_string(),
            attribute: "id".to_string(),
        };
        if id.trim().is_empty() {
            return Err(missing());
        }

        let path = match self.config.container_for(entity_type) {
            Some(container) => format!("{},{},{}", id, container, self.config.base_dn),
            None => format!("{},{}", id, self.config.base_dn),
        };
        Guid::new(path).map_err(|_| missing())
    }
}
