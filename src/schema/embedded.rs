//! Entity schemas embedded in the library.
//!
//! These are the schemas [`SchemaRegistry::new`](super::SchemaRegistry::new)
//! registers, so no schema files are needed for the built-in entity types.

/// Returns the person schema as a JSON string.
///
/// Persons are `inetOrgPerson` entries keyed by `cn`.
pub fn person_schema() -> &'static str {
    r#"{
  "id": "person",
  "description": "A person with login credentials",
  "objectClasses": ["top", "person", "organizationalPerson", "inetOrgPerson"],
  "internalAttributes": [
    { "name": "objectClass", "handler": "Objectclass" },
    { "name": "cn", "required": true },
    { "name": "sn", "required": true },
    { "name": "givenName" },
    { "name": "mail", "handler": "Lowercase" },
    { "name": "userPassword", "handler": "Password" },
    { "name": "description" }
  ],
  "externalAttributes": ["Id", "Fullname"]
}"#
}

/// Returns the group schema as a JSON string.
///
/// Groups are `groupOfNames` entries keyed by `cn`, listing member GUIDs in
/// `member`.
pub fn group_schema() -> &'static str {
    r#"{
  "id": "group",
  "description": "A named group of entries",
  "objectClasses": ["top", "groupOfNames"],
  "internalAttributes": [
    { "name": "objectClass", "handler": "Objectclass" },
    { "name": "cn", "required": true },
    { "name": "member" },
    { "name": "mail", "handler": "Lowercase" },
    { "name": "description" }
  ],
  "externalAttributes": ["Id", "Membercount"]
}"#
}
