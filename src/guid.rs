//! GUID value object for directory entries.
//!
//! A GUID is the distinguished path of an entry, e.g.
//! `cn=Jane Doe,dc=example,dc=org`. The type only requires a non-empty
//! string so that opaque identifiers handed out by other backends stay
//! representable; [`Guid::rdn`] and [`Guid::parent`] interpret DN syntax when
//! it is present.
//!
//! RDN values are escaped following RFC 4514 section 2.4.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters that must always be escaped inside an RDN value.
const SPECIAL_CHARACTERS: &[char] = &[',', '+', '"', '\\', '<', '>', ';', '='];

/// A validated, non-empty entry GUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Guid(String);

/// Error returned when constructing a [`Guid`] from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("GUID cannot be empty")]
pub struct EmptyGuid;

impl Guid {
    /// Create a GUID, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyGuid> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EmptyGuid);
        }
        Ok(Self(value))
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split off the leading RDN and return its attribute name and unescaped
    /// value. Returns `None` if the GUID is not in `attr=value` form.
    pub fn rdn(&self) -> Option<(String, String)> {
        let (first, _) = split_first_rdn(&self.0);
        let (attribute, value) = first.split_once('=')?;
        Some((attribute.trim().to_string(), unescape_rdn_value(value)))
    }

    /// The GUID of the containing entry, if any.
    pub fn parent(&self) -> Option<Guid> {
        let (_, rest) = split_first_rdn(&self.0);
        rest.and_then(|parent| Guid::new(parent).ok())
    }

    /// Whether this GUID lies directly or indirectly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &Guid) -> bool {
        let mut current = self.parent();
        while let Some(guid) = current {
            if guid.0.eq_ignore_ascii_case(&ancestor.0) {
                return true;
            }
            current = guid.parent();
        }
        false
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Guid {
    type Error = EmptyGuid;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Guid::new(value)
    }
}

impl TryFrom<&str> for Guid {
    type Error = EmptyGuid;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Guid::new(value)
    }
}

impl From<Guid> for String {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl AsRef<str> for Guid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split a DN at the first unescaped comma.
fn split_first_rdn(dn: &str) -> (&str, Option<&str>) {
    let mut escaped = false;
    for (index, c) in dn.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ',' => return (&dn[..index], Some(&dn[index + 1..])),
            _ => {}
        }
    }
    (dn, None)
}

/// Escape a value for use inside an RDN.
///
/// ```rust
/// use directory_entity::guid::escape_rdn_value;
///
/// assert_eq!(escape_rdn_value("Doe, Jane"), "Doe\\, Jane");
/// assert_eq!(escape_rdn_value(" #lead"), "\\ #lead");
/// ```
pub fn escape_rdn_value(value: &str) -> String {
    let char_count = value.chars().count();
    let mut escaped = String::with_capacity(value.len());

    for (position, c) in value.chars().enumerate() {
        let leading = position == 0 && (c == ' ' || c == '#');
        let trailing = position + 1 == char_count && c == ' ';

        if c == '\0' {
            escaped.push_str("\\00");
        } else if leading || trailing || SPECIAL_CHARACTERS.contains(&c) {
            escaped.push('\\');
            escaped.push(c);
        } else {
            escaped.push(c);
        }
    }

    escaped
}

/// Reverse [`escape_rdn_value`], also decoding `\XX` hex pairs.
pub fn unescape_rdn_value(value: &str) -> String {
    let mut bytes = Vec::with_capacity(value.len());
    let raw = value.as_bytes();
    let mut index = 0;

    while index < raw.len() {
        if raw[index] == b'\\' && index + 1 < raw.len() {
            let pair = raw.get(index + 1..index + 3);
            let decoded = pair
                .filter(|p| p.iter().all(u8::is_ascii_hexdigit))
                .and_then(|p| std::str::from_utf8(p).ok())
                .and_then(|p| u8::from_str_radix(p, 16).ok());
            match decoded {
                Some(byte) => {
                    bytes.push(byte);
                    index += 3;
                }
                None => {
                    bytes.push(raw[index + 1]);
                    index += 2;
                }
            }
        } else {
            bytes.push(raw[index]);
            index += 1;
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
