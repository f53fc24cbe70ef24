//! Registry mapping handler names to handler constructors.

use super::external::{FullnameHandler, IdHandler, MembercountHandler};
use super::internal::{LowercaseHandler, ObjectClassHandler, PasswordHandler, ValueHandler};
use super::{AttributeBinding, AttributeHandler};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Function creating a handler bound to an attribute.
pub type HandlerConstructor =
    Arc<dyn Fn(&AttributeBinding) -> Box<dyn AttributeHandler> + Send + Sync>;

/// Normalize a handler or external attribute name: first letter upper case,
/// the rest lower case.
///
/// ```rust
/// use directory_entity::attribute::normalize_handler_name;
///
/// assert_eq!(normalize_handler_name("fullName"), "Fullname");
/// assert_eq!(normalize_handler_name("ID"), "Id");
/// ```
pub fn normalize_handler_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Registry of handler implementations keyed by normalized name.
#[derive(Clone)]
pub struct HandlerRegistry {
    constructors: BTreeMap<String, HandlerConstructor>,
}

impl HandlerRegistry {
    /// Create a registry holding the built-in handlers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_default_constructors();
        registry
    }

    /// Create a registry with no handlers.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register a constructor under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&AttributeBinding) -> Box<dyn AttributeHandler> + Send + Sync + 'static,
    {
        self.constructors
            .insert(normalize_handler_name(name), Arc::new(constructor));
    }

    /// Whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&normalize_handler_name(name))
    }

    /// Create the handler registered under `name`, bound to `binding`.
    pub fn construct(
        &self,
        name: &str,
        binding: &AttributeBinding,
    ) -> Option<Box<dyn AttributeHandler>> {
        self.constructors
            .get(&normalize_handler_name(name))
            .map(|constructor| constructor(binding))
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    fn register_default_constructors(&mut self) {
        self.register("Value", ValueHandler::construct);
        self.register("Lowercase", LowercaseHandler::construct);
        self.register("Password", PasswordHandler::construct);
        self.register("Objectclass", ObjectClassHandler::construct);
        self.register("Id", IdHandler::construct);
        self.register("Fullname", FullnameHandler::construct);
        self.register("Membercount", MembercountHandler::construct);
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
