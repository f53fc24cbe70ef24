//! Search operations against the directory.
//!
//! The [`QueryExecutor`] trait is the seam to whatever evaluates queries
//! (an LDAP connection, or [`InMemoryDirectory`](crate::directory::InMemoryDirectory)).
//! The operations in this module are stateless compositions on top of it:
//!
//! - [`RestrictGroups`] - restrict arbitrary criteria to group entries
//! - [`GuidLookup`] - resolve criteria to at most one GUID
//!
//! # Examples
//!
//! ```rust
//! use directory_entity::search::{QueryElement, RestrictGroups};
//! use directory_entity::directory::InMemoryDirectory;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = Arc::new(InMemoryDirectory::new());
//! let search = RestrictGroups::new(directory);
//! let groups = search.search_restrict_groups(&QueryElement::present("cn"))?;
//! assert!(groups.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod guid_lookup;
pub mod query;
pub mod restrict_groups;

pub use guid_lookup::GuidLookup;
pub use query::QueryElement;
pub use restrict_groups::{GROUP_OBJECT_CLASS, RestrictGroups};

use crate::directory::DirectoryError;
use crate::guid::Guid;
use crate::value::FieldMap;
use std::collections::BTreeMap;

/// Pseudo-attribute naming the GUID of an entry in criteria and projections.
pub const GUID_ATTRIBUTE: &str = "guid";

/// Executes queries against the directory.
pub trait QueryExecutor: Send + Sync {
    /// Find the entries matching `criteria`, projecting the attributes named
    /// in `options`.
    fn find(&self, criteria: &QueryElement, options: &FindOptions)
    -> Result<SearchResult, DirectoryError>;
}

/// Options for [`QueryExecutor::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Attributes to return for every match.
    pub attributes: Vec<String>,
}

impl FindOptions {
    /// Request the given attributes.
    pub fn with_attributes<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Request only the entry GUID.
    pub fn guid_only() -> Self {
        Self::with_attributes([GUID_ATTRIBUTE])
    }
}

/// Entries returned by a search, keyed by GUID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    entries: BTreeMap<String, FieldMap>,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result holding only GUIDs.
    pub fn from_guids<I, S>(guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: guids
                .into_iter()
                .map(|guid| (guid.into(), FieldMap::new()))
                .collect(),
        }
    }

    /// Add an entry with its projected attributes.
    pub fn insert(&mut self, guid: impl Into<String>, attributes: FieldMap) {
        self.entries.insert(guid.into(), attributes);
    }

    /// Project the result to a GUID-to-GUID mapping.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.entries
            .keys()
            .map(|guid| (guid.clone(), guid.clone()))
            .collect()
    }

    /// The matching entries with their projected attributes.
    pub fn entries(&self) -> &BTreeMap<String, FieldMap> {
        &self.entries
    }

    /// The matching GUIDs in ascending order.
    pub fn guids(&self) -> Result<Vec<Guid>, DirectoryError> {
        self.as_map().into_keys().map(parse_guid).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn parse_guid(raw: String) -> Result<Guid, DirectoryError> {
    Guid::new(raw).map_err(|e| DirectoryError::invalid_data(format!("Search result GUID: {}", e)))
}
