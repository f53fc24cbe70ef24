//! Search restricted to group entries.

use crate::directory::DirectoryError;
use crate::guid::Guid;
use crate::search::{FindOptions, QueryElement, QueryExecutor, parse_guid};
use log::debug;
use std::sync::Arc;

/// Object class that marks an entry as a group.
pub const GROUP_OBJECT_CLASS: &str = "groupOfNames";

/// Runs searches whose results are limited to groups.
#[derive(Clone)]
pub struct RestrictGroups {
    executor: Arc<dyn QueryExecutor>,
}

impl std::fmt::Debug for RestrictGroups {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestrictGroups").finish_non_exhaustive()
    }
}

impl RestrictGroups {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// The predicate conjoined with every search.
    pub fn group_predicate() -> QueryElement {
        QueryElement::equals("objectClass", GROUP_OBJECT_CLASS)
    }

    /// Find the GUIDs of groups matching `criteria`.
    pub fn search_restrict_groups(
        &self,
        criteria: &QueryElement,
    ) -> Result<Vec<Guid>, DirectoryError> {
        let restricted = QueryElement::and(vec![criteria.clone(), Self::group_predicate()]);
        debug!("Searching groups with filter {}", restricted);

        let result = self.executor.find(&restricted, &FindOptions::guid_only())?;
        result.as_map().into_keys().map(parse_guid).collect()
    }
}
