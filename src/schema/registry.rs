//! Schema registry for loading, validating and resolving entity schemas.
//!
//! Every schema is validated when it is registered and its handlers are
//! constructed once, so lookups at save or read time never fail on
//! configuration problems.

use super::embedded;
use super::types::{EntitySchema, InternalAttributeDefinition};
use crate::attribute::{AttributeBinding, AttributeHandler, HandlerRegistry, normalize_handler_name};
use crate::error::{EntityError, EntityResult, SchemaError, SchemaResult};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A registered schema with its bound handlers.
#[derive(Debug, Clone)]
struct ResolvedSchema {
    schema: EntitySchema,
    internal: Vec<Arc<dyn AttributeHandler>>,
    external: BTreeMap<String, Arc<dyn AttributeHandler>>,
}

/// Registry mapping entity types to their attribute declarations.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    handlers: HandlerRegistry,
    schemas: BTreeMap<String, ResolvedSchema>,
}

impl SchemaRegistry {
    /// Create a registry with the built-in handlers and the embedded person
    /// and group schemas.
    pub fn new() -> SchemaResult<Self> {
        Self::with_handlers(HandlerRegistry::new())
    }

    /// Create a registry with the embedded schemas resolved against a custom
    /// handler registry.
    pub fn with_handlers(handlers: HandlerRegistry) -> SchemaResult<Self> {
        let mut registry = Self::empty(handlers);
        registry.add_schema(Self::load_schema_from_str(embedded::person_schema())?)?;
        registry.add_schema(Self::load_schema_from_str(embedded::group_schema())?)?;
        Ok(registry)
    }

    /// Create a registry without any schema.
    pub fn empty(handlers: HandlerRegistry) -> Self {
        Self {
            handlers,
            schemas: BTreeMap::new(),
        }
    }

    /// Create a registry by loading every `*.json` schema in a directory,
    /// in file name order, using the built-in handlers.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> SchemaResult<Self> {
        let mut paths = fs::read_dir(schema_dir.as_ref())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.retain(|path| path.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        let mut registry = Self::empty(HandlerRegistry::new());
        for path in paths {
            debug!("Loading entity schema from {}", path.display());
            registry.add_schema(Self::load_schema_from_file(&path)?)?;
        }
        Ok(registry)
    }

    /// Load a schema from a JSON file.
    pub fn load_schema_from_file<P: AsRef<Path>>(path: P) -> SchemaResult<EntitySchema> {
        let content = fs::read_to_string(&path)?;
        Self::load_schema_from_str(&content)
    }

    /// Load a schema from a JSON string.
    pub fn load_schema_from_str(content: &str) -> SchemaResult<EntitySchema> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate a schema and add it to the registry.
    ///
    /// Fails if the entity type is already registered, if an attribute is
    /// declared twice or as both internal and external, or if an internal
    /// handler or external attribute names no registered implementation.
    pub fn add_schema(&mut self, schema: EntitySchema) -> SchemaResult<()> {
        if schema.id.trim().is_empty() {
            return Err(SchemaError::invalid_configuration(
                "entity schema id must not be empty",
            ));
        }
        if self.schemas.contains_key(&schema.id) {
            return Err(SchemaError::invalid_configuration(format!(
                "entity type '{}' is already registered",
                schema.id
            )));
        }

        let resolved = self.resolve(schema)?;
        debug!(
            "Registered entity schema '{}' ({} internal, {} external attributes)",
            resolved.schema.id,
            resolved.internal.len(),
            resolved.external.len()
        );
        self.schemas.insert(resolved.schema.id.clone(), resolved);
        Ok(())
    }

    fn resolve(&self, schema: EntitySchema) -> SchemaResult<ResolvedSchema> {
        let duplicate = |attribute: &str| SchemaError::DuplicateAttribute {
            entity_type: schema.id.clone(),
            attribute: attribute.to_string(),
        };

        let mut seen = BTreeSet::new();
        let mut internal: Vec<Arc<dyn AttributeHandler>> =
            Vec::with_capacity(schema.internal_attributes.len());
        for definition in &schema.internal_attributes {
            if definition.name.is_empty() {
                return Err(SchemaError::invalid_configuration(format!(
                    "entity type '{}' declares an internal attribute without a name",
                    schema.id
                )));
            }
            if !seen.insert(normalize_handler_name(&definition.name)) {
                return Err(duplicate(&definition.name));
            }
            let binding = AttributeBinding::new(
                &definition.name,
                &schema.id,
                schema.object_classes.clone(),
            );
            let handler = self
                .handlers
                .construct(&definition.handler, &binding)
                .ok_or_else(|| SchemaError::UnknownHandler {
                    entity_type: schema.id.clone(),
                    attribute: definition.name.clone(),
                    handler: definition.handler.clone(),
                })?;
            internal.push(Arc::from(handler));
        }

        let mut external: BTreeMap<String, Arc<dyn AttributeHandler>> = BTreeMap::new();
        for name in &schema.external_attributes {
            let normalized = normalize_handler_name(name);
            if !seen.insert(normalized.clone()) {
                return Err(duplicate(name));
            }
            let binding =
                AttributeBinding::new(&normalized, &schema.id, schema.object_classes.clone());
            let handler = self
                .handlers
                .construct(&normalized, &binding)
                .ok_or_else(|| SchemaError::UnknownHandler {
                    entity_type: schema.id.clone(),
                    attribute: name.clone(),
                    handler: normalized.clone(),
                })?;
            external.insert(normalized, Arc::from(handler));
        }

        Ok(ResolvedSchema {
            schema,
            internal,
            external,
        })
    }

    /// The handler registry schemas are resolved against.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Get all registered schemas, ordered by entity type.
    pub fn get_schemas(&self) -> Vec<&EntitySchema> {
        self.schemas.values().map(|resolved| &resolved.schema).collect()
    }

    /// Get the schema of an entity type.
    pub fn get_schema(&self, entity_type: &str) -> Option<&EntitySchema> {
        self.schemas.get(entity_type).map(|resolved| &resolved.schema)
    }

    /// Whether a schema is registered for the entity type.
    pub fn contains(&self, entity_type: &str) -> bool {
        self.schemas.contains_key(entity_type)
    }

    fn resolved(&self, entity_type: &str) -> SchemaResult<&ResolvedSchema> {
        self.schemas
            .get(entity_type)
            .ok_or_else(|| SchemaError::UnknownEntityType(entity_type.to_string()))
    }

    /// Internal attribute declarations of an entity type, in declaration
    /// order. The order is stable across calls.
    pub fn get_internal_attributes(
        &self,
        entity_type: &str,
    ) -> SchemaResult<&[InternalAttributeDefinition]> {
        Ok(&self.resolved(entity_type)?.schema.internal_attributes)
    }

    /// Normalized external attribute names of an entity type.
    pub fn get_external_attributes(&self, entity_type: &str) -> SchemaResult<BTreeSet<String>> {
        Ok(self.resolved(entity_type)?.external.keys().cloned().collect())
    }

    /// Internal attribute handlers of an entity type, in declaration order.
    pub fn internal_handlers(&self, entity_type: &str) -> SchemaResult<&[Arc<dyn AttributeHandler>]> {
        Ok(&self.resolved(entity_type)?.internal)
    }

    /// The handler computing an external attribute.
    ///
    /// `name` is capitalization-normalized before lookup. Fails with
    /// [`EntityError::UnsupportedAttribute`] if the entity type does not
    /// declare it.
    pub fn external_handler(
        &self,
        entity_type: &str,
        name: &str,
    ) -> EntityResult<Arc<dyn AttributeHandler>> {
        self.resolved(entity_type)?
            .external
            .get(&normalize_handler_name(name))
            .cloned()
            .ok_or_else(|| EntityError::unsupported(entity_type, name))
    }
}
