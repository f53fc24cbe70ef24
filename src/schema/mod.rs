//! Entity schemas and the schema registry.
//!
//! A schema declares the internal and external attributes of one entity type
//! and names the handler implementation of each. The [`SchemaRegistry`]
//! validates schemas when they are registered and hands out the bound
//! handlers in a stable order.
//!
//! # Key Types
//!
//! - [`EntitySchema`] - attribute declarations of one entity type
//! - [`InternalAttributeDefinition`] - one stored attribute and its handler
//! - [`SchemaRegistry`] - registry of validated schemas
//!
//! # Examples
//!
//! ```rust
//! use directory_entity::schema::SchemaRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let names: Vec<&str> = registry
//!     .get_internal_attributes("person")?
//!     .iter()
//!     .map(|attr| attr.name.as_str())
//!     .collect();
//! assert_eq!(names[..3], ["objectClass", "cn", "sn"]);
//! assert!(registry.get_external_attributes("group")?.contains("Membercount"));
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;


pub use registry::SchemaRegistry;
pub use types::{EntitySchema, InternalAttributeDefinition};
