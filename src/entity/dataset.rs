//! Building the internal dataset of a save.
//!
//! Handlers are folded in declaration order, each contributing a fragment of
//! the persisted record and claiming the caller keys it owns. Contributions
//! on the same attribute are resolved in favor of the later handler. Keys no
//! handler claimed fail the save.

use crate::attribute::AttributeHandler;
use crate::error::{EntityError, EntityResult};
use crate::schema::EntitySchema;
use crate::value::{AttributeValue, FieldMap};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of folding the handlers over caller input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reduction {
    /// Merged handler contributions.
    pub contributions: FieldMap,
    /// Caller keys claimed by at least one handler.
    pub claimed: BTreeSet<String>,
}

impl Reduction {
    /// Keys of `info` no handler claimed, in ascending order.
    pub fn unclaimed(&self, info: &FieldMap) -> Vec<String> {
        info.keys()
            .filter(|key| !self.claimed.contains(*key))
            .cloned()
            .collect()
    }
}

/// Fold `handlers` over `info`.
pub fn reduce(handlers: &[Arc<dyn AttributeHandler>], info: &FieldMap) -> Reduction {
    handlers
        .iter()
        .fold(Reduction::default(), |mut reduction, handler| {
            reduction.contributions.extend(handler.update(info));
            reduction.claimed.extend(handler.claims());
            reduction
        })
}

/// Build the internal dataset for `info`, failing with
/// [`EntityError::UnsavedData`] if any key is left unclaimed and with the
/// first handler check that rejects `info`.
pub fn build_internal_dataset(
    handlers: &[Arc<dyn AttributeHandler>],
    info: &FieldMap,
) -> EntityResult<FieldMap> {
    let reduction = reduce(handlers, info);
    let keys = reduction.unclaimed(info);
    if !keys.is_empty() {
        return Err(EntityError::UnsavedData { keys });
    }
    for handler in handlers {
        handler.check(info)?;
    }
    Ok(reduction.contributions)
}

/// Overlay `contributions` on the current record.
pub fn merge(current: FieldMap, contributions: FieldMap) -> FieldMap {
    let mut merged = current;
    merged.extend(contributions);
    merged
}

/// Whether a value counts as present for required-attribute checks.
pub fn has_value(value: &AttributeValue) -> bool {
    value.values().iter().any(|v| !v.is_empty())
}

/// Fail with [`EntityError::MissingRequiredAttribute`] for the first
/// required attribute without a value in `dataset`.
pub fn check_required(schema: &EntitySchema, dataset: &FieldMap) -> EntityResult<()> {
    match schema
        .required_attributes()
        .find(|definition| !dataset.get(&definition.name).is_some_and(has_value))
    {
        Some(definition) => Err(EntityError::missing_required(&definition.name)),
        None => Ok(()),
    }
}
