//! Directory-level error types.
//!
//! These errors describe failures of the directory gateway itself, separate
//! from attribute resolution errors. The entity layer passes them through to
//! callers without modification.

/// Errors that can occur during directory operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// No entry exists at the GUID.
    #[error("No such entry: {guid}")]
    NoSuchEntry { guid: String },

    /// An entry already exists at the GUID.
    #[error("Entry already exists: {guid}")]
    AlreadyExists { guid: String },

    /// The operation is only allowed on leaf entries.
    #[error("Operation not allowed on non-leaf entry: {guid}")]
    NotAllowedOnNonLeaf { guid: String },

    /// A search expected at most one result.
    #[error("Search returned {count} results where at most one was expected")]
    AmbiguousResult { count: usize },

    /// The directory returned or was given malformed data.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// The directory could not be reached or is in an unusable state.
    #[error("Directory unavailable: {message}")]
    Unavailable { message: String },
}

impl DirectoryError {
    /// Create a no such entry error.
    pub fn no_such_entry(guid: impl ToString) -> Self {
        Self::NoSuchEntry {
            guid: guid.to_string(),
        }
    }

    /// Create an already exists error.
    pub fn already_exists(guid: impl ToString) -> Self {
        Self::AlreadyExists {
            guid: guid.to_string(),
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
