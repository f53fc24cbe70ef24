//! Integration tests for directory-backed entities.
//!
//! ## Test Organization
//!
//! - `person_lifecycle` - create, partial update, rename and delete
//! - `group_lifecycle` - replace-not-merge membership
//! - `failures` - directory failures and the existence probe
//! - `search` - query composition and result projection
//! - `properties` - property-based tests over generated field maps

pub mod person_lifecycle;
pub mod properties;
pub mod search;
