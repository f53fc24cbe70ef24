//! Error types for entity persistence operations.
//!
//! Callers must be able to tell three outcomes apart when reading an
//! attribute: the attribute is not allowed for the entity type
//! ([`EntityError::UnsupportedAttribute`]), it is allowed but has no stored
//! value ([`EntityError::NoValue`]), or the directory itself failed
//! ([`EntityError::Directory`]). Directory failures are wrapped without
//! modification so the inner [`DirectoryError`] stays inspectable.

use crate::directory::DirectoryError;

/// Main error type for entity operations.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// The operation needs a GUID but the entity has not been saved or
    /// constructed with one.
    #[error("Uninitialized object is missing GUID")]
    MissingGuid,

    /// The attribute is not declared for the entity type, or no handler
    /// implementation exists for it.
    #[error("Attribute \"{attribute}\" not supported by entity type '{entity_type}'")]
    UnsupportedAttribute {
        entity_type: String,
        attribute: String,
    },

    /// The attribute is declared but absent from the persisted record.
    #[error("No value for attribute \"{attribute}\"")]
    NoValue { attribute: String },

    /// Caller supplied fields that no attribute handler claimed.
    #[error("Not all data would be saved. Leftover keys: {}", .keys.join(","))]
    UnsavedData { keys: Vec<String> },

    /// A supplied value cannot be stored as given.
    #[error("Invalid value for attribute \"{attribute}\": {message}")]
    InvalidData { attribute: String, message: String },

    /// A required internal attribute has no value after the update.
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// The identifying attribute needed to derive a GUID has no value.
    #[error("Cannot derive an identifier for '{entity_type}': attribute '{attribute}' has no value")]
    MissingIdentifier {
        entity_type: String,
        attribute: String,
    },

    /// Schema or configuration problem detected while resolving attributes.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Failure reported by the directory gateway, passed through unchanged.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl EntityError {
    /// Create an unsupported attribute error.
    pub fn unsupported(entity_type: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnsupportedAttribute {
            entity_type: entity_type.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a no value error.
    pub fn no_value(attribute: impl Into<String>) -> Self {
        Self::NoValue {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create a missing required attribute error.
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Whether the error originated in the directory gateway.
    pub fn is_directory_error(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// Errors raised while loading or validating entity schemas and configuration.
///
/// These are configuration-time failures: a registry that was built
/// successfully only references handlers that exist.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// No schema is registered for the entity type.
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    /// A declared attribute references a handler implementation that is not
    /// registered.
    #[error("No handler '{handler}' registered for attribute '{attribute}' of entity type '{entity_type}'")]
    UnknownHandler {
        entity_type: String,
        attribute: String,
        handler: String,
    },

    /// An attribute name is declared twice, or as both internal and external.
    #[error("Attribute '{attribute}' declared more than once for entity type '{entity_type}'")]
    DuplicateAttribute {
        entity_type: String,
        attribute: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Schema or configuration document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema or configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result type alias for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Result type alias for schema and configuration operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
