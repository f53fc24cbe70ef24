//! Handlers for internal attributes, stored verbatim in the directory.

use super::{AttributeBinding, AttributeHandler, EntityAccess};
use crate::error::{EntityError, EntityResult};
use crate::value::{AttributeValue, FieldMap};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use sha2::{Digest, Sha256};

/// Caller-facing key accepted by [`PasswordHandler`] in addition to its
/// attribute name.
pub const PASSWORD_ALIAS: &str = "password";

/// Scheme prefix of hashes produced by [`hash_password`].
pub const PASSWORD_SCHEME: &str = "{SHA256}";

/// Schemes of `userPassword` values that are stored as already hashed.
pub const KNOWN_PASSWORD_SCHEMES: &[&str] = &[
    "SHA", "SSHA", "SHA256", "SSHA256", "SHA384", "SSHA384", "SHA512", "SSHA512", "MD5", "SMD5",
    "CRYPT",
];

/// Pass-through handler: the caller's value is stored unchanged.
#[derive(Debug, Clone)]
pub struct ValueHandler {
    attribute: String,
}

impl ValueHandler {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn construct(binding: &AttributeBinding) -> Box<dyn AttributeHandler> {
        Box::new(Self::new(&binding.attribute))
    }
}

impl AttributeHandler for ValueHandler {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue> {
        entity.get_internal(&self.attribute)
    }

    fn update(&self, info: &FieldMap) -> FieldMap {
        info.get(&self.attribute)
            .map(|value| FieldMap::from([(self.attribute.clone(), value.clone())]))
            .unwrap_or_default()
    }

    fn claims(&self) -> Vec<String> {
        vec![self.attribute.clone()]
    }
}

/// Stores every value lower-cased, e.g. for mail addresses.
#[derive(Debug, Clone)]
pub struct LowercaseHandler {
    attribute: String,
}

impl LowercaseHandler {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn construct(binding: &AttributeBinding) -> Box<dyn AttributeHandler> {
        Box::new(Self::new(&binding.attribute))
    }
}

impl AttributeHandler for LowercaseHandler {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue> {
        entity.get_internal(&self.attribute)
    }

    fn update(&self, info: &FieldMap) -> FieldMap {
        info.get(&self.attribute)
            .map(|value| {
                FieldMap::from([(self.attribute.clone(), value.map_values(str::to_lowercase))])
            })
            .unwrap_or_default()
    }

    fn claims(&self) -> Vec<String> {
        vec![self.attribute.clone()]
    }
}

/// Stores passwords as unsalted SHA-256 hashes in `{SHA256}` scheme.
///
/// Accepts a value under its attribute name or a plaintext under
/// [`PASSWORD_ALIAS`]; the attribute name wins if both are given. Values
/// under the attribute name that carry a known scheme prefix are stored
/// as given; the alias is always hashed.
#[derive(Debug, Clone)]
pub struct PasswordHandler {
    attribute: String,
}

impl PasswordHandler {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn construct(binding: &AttributeBinding) -> Box<dyn AttributeHandler> {
        Box::new(Self::new(&binding.attribute))
    }
}

impl AttributeHandler for PasswordHandler {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue> {
        entity.get_internal(&self.attribute)
    }

    fn update(&self, info: &FieldMap) -> FieldMap {
        let stored = match (info.get(&self.attribute), info.get(PASSWORD_ALIAS)) {
            (Some(value), _) => value.map_values(store_password),
            (None, Some(plain)) => plain.map_values(hash_password),
            (None, None) => return FieldMap::new(),
        };
        FieldMap::from([(self.attribute.clone(), stored)])
    }

    fn claims(&self) -> Vec<String> {
        vec![self.attribute.clone(), PASSWORD_ALIAS.to_string()]
    }
}

/// Hash a plaintext password as `{SHA256}` + base64 digest.
pub fn hash_password(plain: &str) -> String {
    let digest = Sha256::digest(plain.as_bytes());
    format!("{}{}", PASSWORD_SCHEME, BASE64.encode(digest))
}

/// Whether `value` is a hash in one of [`KNOWN_PASSWORD_SCHEMES`].
pub fn is_hashed_password(value: &str) -> bool {
    value
        .strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .is_some_and(|(scheme, hash)| {
            !hash.is_empty()
                && KNOWN_PASSWORD_SCHEMES
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(scheme))
        })
}

fn store_password(value: &str) -> String {
    if is_hashed_password(value) {
        value.to_string()
    } else {
        hash_password(value)
    }
}

/// Always writes the object classes declared by the entity schema.
///
/// Caller-supplied values are accepted only if every class is declared
/// by the schema (compared case-insensitively).
#[derive(Debug, Clone)]
pub struct ObjectClassHandler {
    attribute: String,
    object_classes: Vec<String>,
}

impl ObjectClassHandler {
    pub fn new(attribute: impl Into<String>, object_classes: Vec<String>) -> Self {
        Self {
            attribute: attribute.into(),
            object_classes,
        }
    }

    pub fn construct(binding: &AttributeBinding) -> Box<dyn AttributeHandler> {
        Box::new(Self::new(&binding.attribute, binding.object_classes.clone()))
    }
}

impl AttributeHandler for ObjectClassHandler {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn value(&self, entity: &dyn EntityAccess) -> EntityResult<AttributeValue> {
        entity.get_internal(&self.attribute)
    }

    fn update(&self, _info: &FieldMap) -> FieldMap {
        if self.object_classes.is_empty() {
            return FieldMap::new();
        }
        FieldMap::from([(
            self.attribute.clone(),
            AttributeValue::Multi(self.object_classes.clone()),
        )])
    }

    fn check(&self, info: &FieldMap) -> EntityResult<()> {
        let Some(supplied) = info.get(&self.attribute) else {
            return Ok(());
        };
        let undeclared: Vec<&str> = supplied
            .values()
            .into_iter()
            .filter(|class| {
                !self
                    .object_classes
                    .iter()
                    .any(|declared| declared.eq_ignore_ascii_case(class))
            })
            .collect();
        if undeclared.is_empty() {
            Ok(())
        } else {
            Err(EntityError::invalid_data(
                &self.attribute,
                format!("undeclared object classes: {}", undeclared.join(",")),
            ))
        }
    }

    fn claims(&self) -> Vec<String> {
        vec![self.attribute.clone()]
    }
}
