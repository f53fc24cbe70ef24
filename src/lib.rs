//! Directory-backed entity persistence for Rust.
//!
//! Models domain objects such as persons and groups whose canonical storage
//! is a hierarchical directory, with typed read/write access through
//! pluggable attribute handlers.
//!
//! # Core Components
//!
//! - [`Entity`] - a persistable object bound to one directory entry
//! - [`AttributeHandler`] - resolution logic for one attribute
//! - [`SchemaRegistry`] - internal and external attributes per entity type
//! - [`IdentityResolver`] - derives an entry's GUID from its data
//! - [`DirectoryGateway`] - primitives against raw directory entries
//! - [`RestrictGroups`] - group-restricted GUID searches
//!
//! # Quick Start
//!
//! ```rust
//! use directory_entity::{EntityBuilder, InMemoryDirectory, SchemaRegistry, StructureResolver};
//! use directory_entity::entity::Person;
//! use directory_entity::value::field_map;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = Arc::new(InMemoryDirectory::new());
//! let schema = Arc::new(SchemaRegistry::new()?);
//! let resolver = Arc::new(StructureResolver::default());
//!
//! let mut person = EntityBuilder::new(Arc::new(Person), directory, schema, resolver).build()?;
//! person.save(field_map([("cn", "Jane Doe"), ("sn", "Doe")]))?;
//! person.save(field_map([("cn", "Jane Roe")]))?;
//!
//! assert_eq!(person.guid()?.as_str(), "cn=Jane Roe,dc=example,dc=org");
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod config;
pub mod directory;
pub mod entity;
pub mod error;
pub mod guid;
pub mod identity;
pub mod schema;
pub mod search;
pub mod value;

// Re-export commonly used types for convenience
pub use attribute::{AttributeHandler, EntityAccess, HandlerRegistry};
pub use config::DirectoryConfig;
pub use directory::{DirectoryError, DirectoryGateway, InMemoryDirectory};
pub use entity::{Entity, EntityBuilder, EntityType};
pub use error::{EntityError, EntityResult, SchemaError, SchemaResult};
pub use guid::Guid;
pub use identity::{IdentityResolver, StructureResolver};
pub use schema::{EntitySchema, SchemaRegistry};
pub use search::{FindOptions, GuidLookup, QueryElement, QueryExecutor, RestrictGroups, SearchResult};
pub use value::{AttributeValue, FieldMap};
