//! Person lifecycle against a recording gateway.

use crate::common::fixtures::{Harness, guid, person_info, person_object_classes};
use crate::common::init_logging;
use crate::common::providers::Operation;
use directory_entity::attribute::internal::hash_password;
use directory_entity::value::{AttributeValue, field_map};
use directory_entity::{DirectoryGateway, EntityAccess, EntityError};

#[test]
fn test_create_person_with_password() {
    init_logging();
    let harness = Harness::in_memory();
    let mut person = harness.person();

    person
        .save(field_map([("cn", "X"), ("sn", "Y"), ("password", "Z")]))
        .unwrap();

    let created = guid("cn=X,dc=example,dc=org");
    assert_eq!(person.guid().unwrap(), &created);
    assert!(person.guid().unwrap().as_str().contains("cn=X"));

    let mutations = harness.gateway.mutations();
    assert_eq!(mutations.len(), 1);
    match &mutations[0] {
        Operation::Add { guid, data } => {
            assert_eq!(guid, &created);
            assert_eq!(data["userPassword"], AttributeValue::from(hash_password("Z")));
            assert_eq!(data["objectClass"], person_object_classes());
            assert!(!data.contains_key("password"));
        }
        other => panic!("Expected add, got {:?}", other),
    }
}

#[test]
fn test_partial_save_updates_only_sn() {
    init_logging();
    let harness = Harness::in_memory();
    let mut person = harness.person();
    person
        .save(field_map([("cn", "X"), ("sn", "Y"), ("password", "Z")]))
        .unwrap();
    let before = harness.gateway.inner().entry(person.guid().unwrap()).unwrap();
    harness.gateway.clear_operations();

    person.save(field_map([("sn", "Y2")])).unwrap();

    assert_eq!(person.guid().unwrap().as_str(), "cn=X,dc=example,dc=org");
    assert_eq!(harness.gateway.renames(), 0);

    let after = harness.gateway.inner().entry(person.guid().unwrap()).unwrap();
    for (name, value) in &before {
        if name == "sn" {
            assert_eq!(value, &AttributeValue::from("Y"));
            assert_eq!(after[name], AttributeValue::from("Y2"));
        } else {
            assert_eq!(&after[name], value, "attribute {} changed", name);
        }
    }
}

#[test]
fn test_rename_issues_exactly_one_rename_before_write() {
    init_logging();
    let harness = Harness::in_memory();
    let mut person = harness.person();
    person.save(person_info("OldName", "Doe")).unwrap();
    harness.gateway.clear_operations();

    person.save(field_map([("cn", "NewName")])).unwrap();

    let old = guid("cn=OldName,dc=example,dc=org");
    let new = guid("cn=NewName,dc=example,dc=org");
    assert_eq!(person.guid().unwrap(), &new);

    let mutations = harness.gateway.mutations();
    assert_eq!(mutations.len(), 2, "{:?}", mutations);
    assert_eq!(
        mutations[0],
        Operation::Rename {
            from: old,
            to: new.clone()
        }
    );
    match &mutations[1] {
        Operation::Save { guid, data } => {
            assert_eq!(guid, &new);
            assert_eq!(data["cn"], AttributeValue::from("NewName"));
            assert_eq!(data["sn"], AttributeValue::from("Doe"));
            assert_eq!(data["objectClass"], person_object_classes());
        }
        other => panic!("Expected save after rename, got {:?}", other),
    }
}

#[test]
fn test_unchanged_save_is_written_in_place() {
    let harness = Harness::in_memory();
    let mut person = harness.person();
    person.save(person_info("Jane", "Doe")).unwrap();
    harness.gateway.clear_operations();

    person.save(person_info("Jane", "Doe")).unwrap();

    let mutations = harness.gateway.mutations();
    assert_eq!(mutations.len(), 1);
    assert!(matches!(&mutations[0], Operation::Save { .. }));
}

#[test]
fn test_existing_entry_is_verified_lazily() {
    let harness = Harness::in_memory();
    harness
        .gateway
        .inner()
        .add(
            &guid("cn=Jane,dc=example,dc=org"),
            &person_info("Jane", "Doe"),
        )
        .unwrap();

    let person = harness.person_at("cn=Jane,dc=example,dc=org");
    assert!(harness.gateway.operations().is_empty());

    assert_eq!(person.get_internal("sn").unwrap(), AttributeValue::from("Doe"));
    assert_eq!(harness.gateway.operations().len(), 1);
}

#[test]
fn test_unsupported_versus_no_value() {
    let harness = Harness::in_memory();
    let mut person = harness.person();
    person.save(person_info("Jane", "Doe")).unwrap();

    assert_entity_error!(person.get_internal("foo"), EntityError::UnsupportedAttribute { .. });
    assert_entity_error!(person.get_internal("givenName"), EntityError::NoValue { .. });
    assert_entity_error!(person.get_external("foo"), EntityError::UnsupportedAttribute { .. });
    assert_error_message_contains!(person.get_internal("foo"), "not supported");
}

#[test]
fn test_external_attributes_through_handler_access() {
    let harness = Harness::in_memory();
    let mut person = harness.person();
    person
        .save(field_map([("cn", "J. Doe"), ("sn", "Doe"), ("givenName", "Jane")]))
        .unwrap();

    let access: &dyn EntityAccess = &person;
    assert_eq!(access.entity_type(), "person");
    assert_eq!(access.get_external("FULLNAME").unwrap(), AttributeValue::from("Jane Doe"));
    assert_eq!(
        access.get_external("Id").unwrap(),
        AttributeValue::from("cn=J. Doe,dc=example,dc=org")
    );
}

#[test]
fn test_mail_is_lower_cased() {
    let harness = Harness::in_memory();
    let mut person = harness.person();
    let mut info = person_info("Jane", "Doe");
    info.insert("mail".to_string(), AttributeValue::from("Jane.Doe@Example.ORG"));
    person.save(info).unwrap();

    assert_eq!(
        person.get_internal("mail").unwrap(),
        AttributeValue::from("jane.doe@example.org")
    );
}

#[test]
fn test_unclaimed_keys_listed_in_error() {
    let harness = Harness::in_memory();
    let mut person = harness.person();
    let mut info = person_info("Jane", "Doe");
    info.insert("zeta".to_string(), AttributeValue::from("1"));
    info.insert("alpha".to_string(), AttributeValue::from("2"));

    assert_error_message_contains!(person.save(info), "Leftover keys: alpha,zeta");
    assert!(harness.gateway.mutations().is_empty());
}

#[test]
fn test_delete_removes_entry() {
    let harness = Harness::in_memory();
    let mut person = harness.person();
    person.save(person_info("Jane", "Doe")).unwrap();
    let saved = person.guid().unwrap().clone();

    person.delete().unwrap();

    assert!(harness.gateway.inner().is_empty());
    assert_eq!(
        harness.gateway.mutations().last(),
        Some(&Operation::Delete { guid: saved.clone() })
    );
    assert!(!harness.person_at(saved.as_str()).exists());
}

#[test]
fn test_delete_without_guid() {
    let harness = Harness::in_memory();
    assert_entity_error!(harness.person().delete(), EntityError::MissingGuid);
    assert!(harness.gateway.operations().is_empty());
}
