//! Entity schema type definitions.
//!
//! An entity schema declares, for one entity type, the directory object
//! classes its entries carry, the ordered internal attributes stored verbatim
//! in the directory and the external attributes computed from them.

use serde::{Deserialize, Serialize};

/// Schema of one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    /// Entity type name, e.g. `person`.
    pub id: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Object classes written to every entry of this type
    #[serde(default)]
    pub object_classes: Vec<String>,
    /// Internal attributes in handler execution order
    #[serde(default)]
    pub internal_attributes: Vec<InternalAttributeDefinition>,
    /// External attribute names, each naming its handler implementation
    #[serde(default)]
    pub external_attributes: Vec<String>,
}

impl EntitySchema {
    /// Find an internal attribute by its exact name.
    pub fn internal_attribute(&self, name: &str) -> Option<&InternalAttributeDefinition> {
        self.internal_attributes.iter().find(|attr| attr.name == name)
    }

    /// Internal attributes that must hold a value after every save.
    pub fn required_attributes(&self) -> impl Iterator<Item = &InternalAttributeDefinition> {
        self.internal_attributes.iter().filter(|attr| attr.required)
    }
}

/// Declaration of one internal attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAttributeDefinition {
    /// Attribute name as stored in the directory
    pub name: String,
    /// Handler implementation name
    #[serde(default = "default_handler")]
    pub handler: String,
    /// Whether the attribute must hold a value
    #[serde(default)]
    pub required: bool,
}

impl InternalAttributeDefinition {
    pub fn new(name: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: handler.into(),
            required: false,
        }
    }

    /// Mark the attribute as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

fn default_handler() -> String {
    "Value".to_string()
}
