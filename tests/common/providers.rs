//! Instrumented collaborators for entity tests.
//!
//! - [`RecordingDirectory`] logs every primitive call before delegating to an
//!   [`InMemoryDirectory`], so tests can assert call order.
//! - [`FailingDirectory`] fails selected primitives on demand.
//! - [`ScriptedExecutor`] answers every query with a fixed result and keeps
//!   the criteria it was asked.

use directory_entity::directory::{DirectoryError, DirectoryGateway, InMemoryDirectory};
use directory_entity::guid::Guid;
use directory_entity::search::{FindOptions, QueryElement, QueryExecutor, SearchResult};
use directory_entity::value::FieldMap;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// One call made against a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Read { guid: Guid, names: Vec<String> },
    Add { guid: Guid, data: FieldMap },
    Save { guid: Guid, data: FieldMap },
    Rename { from: Guid, to: Guid },
    Delete { guid: Guid },
}

impl Operation {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::Read { .. })
    }
}

/// Gateway that records every call before delegating.
#[derive(Debug, Default)]
pub struct RecordingDirectory {
    inner: InMemoryDirectory,
    operations: Mutex<Vec<Operation>>,
}

impl RecordingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backing directory, for seeding and inspection.
    pub fn inner(&self) -> &InMemoryDirectory {
        &self.inner
    }

    /// Every recorded call, oldest first.
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.lock().unwrap().clone()
    }

    /// Recorded calls that change the directory.
    pub fn mutations(&self) -> Vec<Operation> {
        self.operations()
            .into_iter()
            .filter(Operation::is_mutation)
            .collect()
    }

    pub fn renames(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, Operation::Rename { .. }))
            .count()
    }

    pub fn clear_operations(&self) {
        self.operations.lock().unwrap().clear();
    }

    fn record(&self, operation: Operation) {
        self.operations.lock().unwrap().push(operation);
    }
}

impl DirectoryGateway for RecordingDirectory {
    fn read_attributes(&self, guid: &Guid, names: &[&str]) -> Result<FieldMap, DirectoryError> {
        self.record(Operation::Read {
            guid: guid.clone(),
            names: names.iter().map(|name| name.to_string()).collect(),
        });
        self.inner.read_attributes(guid, names)
    }

    fn add(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError> {
        self.record(Operation::Add {
            guid: guid.clone(),
            data: internal.clone(),
        });
        self.inner.add(guid, internal)
    }

    fn save(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError> {
        self.record(Operation::Save {
            guid: guid.clone(),
            data: internal.clone(),
        });
        self.inner.save(guid, internal)
    }

    fn rename(&self, old: &Guid, new: &Guid) -> Result<(), DirectoryError> {
        self.record(Operation::Rename {
            from: old.clone(),
            to: new.clone(),
        });
        self.inner.rename(old, new)
    }

    fn delete(&self, guid: &Guid) -> Result<(), DirectoryError> {
        self.record(Operation::Delete { guid: guid.clone() });
        self.inner.delete(guid)
    }
}

/// Gateway primitives that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Primitive {
    Read,
    Add,
    Save,
    Rename,
    Delete,
}

/// Gateway that fails the selected primitives with
/// [`DirectoryError::Unavailable`] and delegates the rest.
#[derive(Debug, Default)]
pub struct FailingDirectory {
    inner: InMemoryDirectory,
    failing: Mutex<BTreeSet<Primitive>>,
}

impl FailingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory on which every primitive fails.
    pub fn unreachable() -> Self {
        let directory = Self::new();
        for primitive in [
            Primitive::Read,
            Primitive::Add,
            Primitive::Save,
            Primitive::Rename,
            Primitive::Delete,
        ] {
            directory.fail_on(primitive);
        }
        directory
    }

    pub fn inner(&self) -> &InMemoryDirectory {
        &self.inner
    }

    pub fn fail_on(&self, primitive: Primitive) {
        self.failing.lock().unwrap().insert(primitive);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn injected_error(primitive: Primitive) -> DirectoryError {
        DirectoryError::unavailable(format!("injected {:?} failure", primitive))
    }

    fn check(&self, primitive: Primitive) -> Result<(), DirectoryError> {
        if self.failing.lock().unwrap().contains(&primitive) {
            return Err(Self::injected_error(primitive));
        }
        Ok(())
    }
}

impl DirectoryGateway for FailingDirectory {
    fn read_attributes(&self, guid: &Guid, names: &[&str]) -> Result<FieldMap, DirectoryError> {
        self.check(Primitive::Read)?;
        self.inner.read_attributes(guid, names)
    }

    fn add(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError> {
        self.check(Primitive::Add)?;
        self.inner.add(guid, internal)
    }

    fn save(&self, guid: &Guid, internal: &FieldMap) -> Result<(), DirectoryError> {
        self.check(Primitive::Save)?;
        self.inner.save(guid, internal)
    }

    fn rename(&self, old: &Guid, new: &Guid) -> Result<(), DirectoryError> {
        self.check(Primitive::Rename)?;
        self.inner.rename(old, new)
    }

    fn delete(&self, guid: &Guid) -> Result<(), DirectoryError> {
        self.check(Primitive::Delete)?;
        self.inner.delete(guid)
    }
}

/// Query executor returning a scripted answer.
#[derive(Debug)]
pub struct ScriptedExecutor {
    answer: Result<SearchResult, DirectoryError>,
    calls: Mutex<Vec<(QueryElement, FindOptions)>>,
}

impl ScriptedExecutor {
    pub fn returning(result: SearchResult) -> Self {
        Self {
            answer: Ok(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DirectoryError) -> Self {
        Self {
            answer: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Criteria and options of every call, oldest first.
    pub fn calls(&self) -> Vec<(QueryElement, FindOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl QueryExecutor for ScriptedExecutor {
    fn find(
        &self,
        criteria: &QueryElement,
        options: &FindOptions,
    ) -> Result<SearchResult, DirectoryError> {
        self.calls
            .lock()
            .unwrap()
            .push((criteria.clone(), options.clone()));
        self.answer.clone()
    }
}
