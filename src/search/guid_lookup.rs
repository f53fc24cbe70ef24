//! Resolve search criteria to a single GUID.

use crate::directory::DirectoryError;
use crate::guid::Guid;
use crate::search::{FindOptions, QueryElement, QueryExecutor, parse_guid};
use log::debug;
use std::sync::Arc;

/// Looks up the GUID of the one entry matching some criteria.
#[derive(Clone)]
pub struct GuidLookup {
    executor: Arc<dyn QueryExecutor>,
}

impl std::fmt::Debug for GuidLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidLookup").finish_non_exhaustive()
    }
}

impl GuidLookup {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Return the GUID of the matching entry, `None` if nothing matches.
    ///
    /// Fails with [`DirectoryError::AmbiguousResult`] when more than one
    /// entry matches.
    pub fn search_guid(&self, criteria: &QueryElement) -> Result<Option<Guid>, DirectoryError> {
        debug!("Looking up single GUID with filter {}", criteria);
        let result = self.executor.find(criteria, &FindOptions::guid_only())?;

        match result.len() {
            0 => Ok(None),
            1 => result.as_map().into_keys().next().map(parse_guid).transpose(),
            count => Err(DirectoryError::AmbiguousResult { count }),
        }
    }

    /// GUID of the entry whose common name is `cn`.
    pub fn guid_for_cn(&self, cn: &str) -> Result<Option<Guid>, DirectoryError> {
        self.search_guid(&QueryElement::equals("cn", cn))
    }
}
