//! Directory layout configuration.
//!
//! The configuration tells the identity resolver where entries of each
//! entity type live in the directory tree.
//!
//! ```rust
//! use directory_entity::config::DirectoryConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DirectoryConfig::from_json_str(
//!     r#"{"baseDn": "dc=example,dc=com", "containers": {"group": "ou=groups"}}"#,
//! )?;
//! assert_eq!(config.container_for("group"), Some("ou=groups"));
//! assert_eq!(config.container_for("person"), None);
//! # Ok(())
//! # }
//! ```

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default base DN used when none is configured.
pub const DEFAULT_BASE_DN: &str = "dc=example,dc=org";

/// Where entries are placed in the directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryConfig {
    /// Root of the tree managed by this layer, e.g. `dc=example,dc=org`.
    pub base_dn: String,

    /// Container RDN below the base DN, keyed by entity type name.
    /// Types without an entry are placed directly below the base DN.
    #[serde(default)]
    pub containers: BTreeMap<String, String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        let mut containers = BTreeMap::new();
        containers.insert("group".to_string(), "ou=groups".to_string());
        Self {
            base_dn: DEFAULT_BASE_DN.to_string(),
            containers,
        }
    }
}

impl DirectoryConfig {
    /// Create a configuration with the given base DN and no containers.
    pub fn new(base_dn: impl Into<String>) -> Self {
        Self {
            base_dn: base_dn.into(),
            containers: BTreeMap::new(),
        }
    }

    /// Add or replace the container for an entity type.
    pub fn with_container(
        mut self,
        entity_type: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        self.containers.insert(entity_type.into(), container.into());
        self
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(content: &str) -> SchemaResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SchemaResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The container RDN for an entity type, if one is configured.
    pub fn container_for(&self, entity_type: &str) -> Option<&str> {
        self.containers.get(entity_type).map(String::as_str)
    }

    /// Validate the configuration.
    ///
    /// The base DN and every container must be non-empty and in
    /// `attr=value` form.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.base_dn.trim().is_empty() {
            return Err(SchemaError::invalid_configuration("Base DN cannot be empty"));
        }
        if !self.base_dn.contains('=') {
            return Err(SchemaError::invalid_configuration(format!(
                "Base DN '{}' is not a distinguished name",
                self.base_dn
            )));
        }

        for (entity_type, container) in &self.containers {
            if container.trim().is_empty() || !container.contains('=') {
                return Err(SchemaError::invalid_configuration(format!(
                    "Container '{}' for entity type '{}' is not a relative distinguished name",
                    container, entity_type
                )));
            }
        }

        Ok(())
    }
}
