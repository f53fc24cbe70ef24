//! Directory gateway abstraction.
//!
//! The [`DirectoryGateway`] trait is the narrow interface through which
//! entities read and mutate raw directory entries. Transport, binding,
//! connection pooling and retries are the implementor's concern; this crate
//! only relies on the five primitives below.
//!
//! [`InMemoryDirectory`] is a reference implementation for tests and
//! development. It also implements
//! [`QueryExecutor`](crate::search::QueryExecutor).
//!
//! # Example Usage
//!
//! ```rust
//! use directory_entity::directory::{DirectoryGateway, InMemoryDirectory};
//! use directory_entity::guid::Guid;
//! use directory_entity::value::field_map;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = InMemoryDirectory::new();
//! let guid = Guid::new("cn=Jane Doe,dc=example,dc=org")?;
//!
//! directory.add(&guid, &field_map([("cn", "Jane Doe"), ("sn", "Doe")]))?;
//! let read = directory.read_attributes(&guid, &["sn"])?;
//! assert_eq!(read.len(), 1);
//!
//! directory.delete(&guid)?;
//! assert!(directory.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;


pub use errors::DirectoryError;
pub use in_memory::InMemoryDirectory;

use crate::guid::Guid;
use crate::value::FieldMap;

/// Read/write/rename/delete primitives against raw directory entries.
///
/// All calls are blocking round-trips. Implementations report any transport
/// or protocol failure as a [`DirectoryError`].
pub trait DirectoryGateway: Send + Sync {
    /// Read the named attributes of the entry at `guid`.
    ///
    /// Attributes the entry does not carry are omitted from the result.
    /// Fails if the entry does not exist.
    fn read_attributes(&self, guid: &Guid, names: &[&str]) -> Result<FieldMap, DirectoryError>;

    /// Create a new entry at `guid` holding `internal`.
    fn add(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError>;

    /// Replace every attribute in `internal` on the existing entry at `guid`.
    ///
    /// Each supplied attribute is replaced wholesale; an empty multi-value
    /// removes the attribute. Attributes not mentioned are left untouched.
    fn save(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError>;

    /// Move the entry at `old` to `new`.
    fn rename(&self, old: &Guid, new: &Guid) -> Result<(), DirectoryError>;

    /// Remove the entry at `guid`.
    fn delete(&self, guid: &Guid) -> Result<(), DirectoryError>;
}
