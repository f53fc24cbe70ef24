//! In-memory directory implementation.
//!
//! This module provides a thread-safe in-memory implementation of the
//! [`DirectoryGateway`] and [`QueryExecutor`] traits using a `BTreeMap`
//! behind an `RwLock`. It is meant for tests, development and embedding
//! scenarios where no real directory server is available.
//!
//! # Behavior
//!
//! * `add` fails if the entry exists; `save`, `read_attributes`, `rename`
//!   and `delete` fail if it does not
//! * `rename` fails if the target exists
//! * `rename` and `delete` are only allowed on leaf entries
//! * `save` replaces each supplied attribute wholesale and drops attributes
//!   whose new value is an empty multi-value
//! * Searches are linear scans in GUID order
//! * A poisoned lock fails every gateway and query call with
//!   [`DirectoryError::Unavailable`]; the inspection helpers (`len`,
//!   `guids`, `entry`) still report the entries as they stand

use crate::directory::{DirectoryError, DirectoryGateway};
use crate::guid::Guid;
use crate::search::{FindOptions, GUID_ATTRIBUTE, QueryElement, QueryExecutor, SearchResult};
use crate::value::FieldMap;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Entries = BTreeMap<Guid, FieldMap>;

/// Thread-safe in-memory directory.
///
/// Clones share the same underlying entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    entries: Arc<RwLock<Entries>>,
}

impl InMemoryDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inspect().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// GUIDs of all entries in ascending order.
    pub fn guids(&self) -> Vec<Guid> {
        self.inspect().keys().cloned().collect()
    }

    /// Full stored record of an entry, bypassing attribute selection.
    pub fn entry(&self, guid: &Guid) -> Option<FieldMap> {
        self.inspect().get(guid).cloned()
    }

    /// Remove all entries (useful for testing).
    pub fn clear(&self) -> Result<(), DirectoryError> {
        self.write()?.clear();
        Ok(())
    }

    fn inspect(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Entries>, DirectoryError> {
        self.entries
            .read()
            .map_err(|_| DirectoryError::unavailable("In-memory directory lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Entries>, DirectoryError> {
        self.entries
            .write()
            .map_err(|_| DirectoryError::unavailable("In-memory directory lock poisoned"))
    }

    fn ensure_leaf(entries: &Entries, guid: &Guid) -> Result<(), DirectoryError> {
        if entries.keys().any(|candidate| candidate.is_descendant_of(guid)) {
            return Err(DirectoryError::NotAllowedOnNonLeaf {
                guid: guid.to_string(),
            });
        }
        Ok(())
    }

    /// Copy `data`, leaving out attributes that carry no values.
    fn without_empty(data: &FieldMap) -> FieldMap {
        data.iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl DirectoryGateway for InMemoryDirectory {
    fn read_attributes(&self, guid: &Guid, names: &[&str]) -> Result<FieldMap, DirectoryError> {
        let entries = self.read()?;
        let entry = entries
            .get(guid)
            .ok_or_else(|| DirectoryError::no_such_entry(guid))?;

        let result: FieldMap = names
            .iter()
            .filter_map(|name| entry.get(*name).map(|value| (name.to_string(), value.clone())))
            .collect();
        trace!("Read {} of {} attributes from {}", result.len(), names.len(), guid);
        Ok(result)
    }

    fn add(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError> {
        let mut entries = self.write()?;
        if entries.contains_key(guid) {
            return Err(DirectoryError::already_exists(guid));
        }
        entries.insert(guid.clone(), Self::without_empty(internal));
        debug!("Added entry {}", guid);
        Ok(())
    }

    fn save(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError> {
        let mut entries = self.write()?;
        let entry = entries
            .get_mut(guid)
            .ok_or_else(|| DirectoryError::no_such_entry(guid))?;

        for (name, value) in internal {
            if value.is_empty() {
                entry.remove(name);
            } else {
                entry.insert(name.clone(), value.clone());
            }
        }
        debug!("Replaced {} attributes on {}", internal.len(), guid);
        Ok(())
    }

    fn rename(&self, old: &Guid, new: &Guid) -> Result<(), DirectoryError> {
        let mut entries = self.write()?;
        if !entries.contains_key(old) {
            return Err(DirectoryError::no_such_entry(old));
        }
        if entries.contains_key(new) {
            return Err(DirectoryError::already_exists(new));
        }
        Self::ensure_leaf(&entries, old)?;

        if let Some(entry) = entries.remove(old) {
            entries.insert(new.clone(), entry);
        }
        debug!("Renamed {} to {}", old, new);
        Ok(())
    }

    fn delete(&self, guid: &Guid) -> Result<(), DirectoryError> {
        let mut entries = self.write()?;
        if !entries.contains_key(guid) {
            return Err(DirectoryError::no_such_entry(guid));
        }
        Self::ensure_leaf(&entries, guid)?;

        entries.remove(guid);
        debug!("Deleted entry {}", guid);
        Ok(())
    }
}

impl QueryExecutor for InMemoryDirectory {
    fn find(
        &self,
        criteria: &QueryElement,
        options: &FindOptions,
    ) -> Result<SearchResult, DirectoryError> {
        let entries = self.read()?;
        let mut result = SearchResult::new();

        for (guid, entry) in entries.iter() {
            if !criteria.matches(guid, entry) {
                continue;
            }

            let projected: FieldMap = options
                .attributes
                .iter()
                .filter(|name| !name.eq_ignore_ascii_case(GUID_ATTRIBUTE))
                .filter_map(|name| {
                    entry
                        .iter()
                        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
                        .map(|(candidate, value)| (candidate.clone(), value.clone()))
                })
                .collect();
            result.insert(guid.as_str(), projected);
        }

        debug!("Filter {} matched {} entries", criteria, result.len());
        Ok(result)
    }
}
