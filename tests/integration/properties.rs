//! Property-based tests for saving entities.
//!
//! Uses proptest to generate field maps and checks the round-trip,
//! completeness and rename invariants over them.

use crate::common::fixtures::{Harness, person_info, person_object_classes};
use directory_entity::EntityError;
use directory_entity::attribute::internal::hash_password;
use directory_entity::value::{AttributeValue, FieldMap, field_map};
use proptest::prelude::*;
use std::collections::BTreeSet;

prop_compose! {
    /// Person input covering every internal attribute, in stored form.
    fn stored_person_strategy()
        (cn in "[A-Za-z][A-Za-z0-9 ]{0,14}[A-Za-z0-9]",
         sn in "[A-Za-z]{1,12}",
         given_name in proptest::option::of("[A-Za-z]{1,12}"),
         mail in proptest::option::of("[a-z]{1,8}@[a-z]{1,8}\\.org"),
         password in proptest::option::of("[ -~]{1,16}"),
         description in proptest::option::of("[A-Za-z ,.]{1,30}"))
        -> FieldMap {
        let mut info = field_map([("cn", cn), ("sn", sn)]);
        info.insert("objectClass".to_string(), person_object_classes());
        if let Some(given_name) = given_name {
            info.insert("givenName".to_string(), AttributeValue::from(given_name));
        }
        if let Some(mail) = mail {
            info.insert("mail".to_string(), AttributeValue::from(mail));
        }
        if let Some(password) = password {
            info.insert("userPassword".to_string(), AttributeValue::from(hash_password(&password)));
        }
        if let Some(description) = description {
            info.insert("description".to_string(), AttributeValue::from(description));
        }
        info
    }
}

proptest! {
    #[test]
    fn test_save_then_read_round_trips(info in stored_person_strategy()) {
        let harness = Harness::in_memory();
        let mut person = harness.person();
        person.save(info.clone()).unwrap();

        prop_assert_eq!(person.read_internal().unwrap(), info);
    }

    #[test]
    fn test_unclaimed_keys_are_reported_exactly(
        extra in proptest::collection::btree_set("x[a-z]{1,6}", 1..5)
    ) {
        let harness = Harness::in_memory();
        let mut person = harness.person();
        let mut info = person_info("Jane", "Doe");
        for key in &extra {
            info.insert(key.clone(), AttributeValue::from("value"));
        }

        match person.save(info) {
            Err(EntityError::UnsavedData { keys }) => {
                prop_assert_eq!(keys.into_iter().collect::<BTreeSet<_>>(), extra);
            }
            other => prop_assert!(false, "Expected UnsavedData, got {:?}", other),
        }
        prop_assert!(harness.gateway.mutations().is_empty());
    }

    #[test]
    fn test_changed_identifier_renames_once(
        old in "[A-Za-z]{1,12}",
        new in "[A-Za-z]{1,12}"
    ) {
        prop_assume!(old != new);
        let harness = Harness::in_memory();
        let mut person = harness.person();
        person.save(person_info(&old, "Doe")).unwrap();
        harness.gateway.clear_operations();

        person.save(field_map([("cn", new.as_str())])).unwrap();

        prop_assert_eq!(harness.gateway.renames(), 1);
        prop_assert_eq!(
            person.guid().unwrap().as_str(),
            format!("cn={},dc=example,dc=org", new)
        );
        prop_assert_eq!(harness.gateway.mutations().len(), 2);
    }

    #[test]
    fn test_unchanged_identifier_never_renames(
        cn in "[A-Za-z]{1,12}",
        first_sn in "[A-Za-z]{1,12}",
        second_sn in "[A-Za-z]{1,12}"
    ) {
        let harness = Harness::in_memory();
        let mut person = harness.person();
        person.save(person_info(&cn, &first_sn)).unwrap();
        let before = person.guid().unwrap().clone();

        person.save(field_map([("sn", second_sn.as_str())])).unwrap();

        prop_assert_eq!(harness.gateway.renames(), 0);
        prop_assert_eq!(person.guid().unwrap(), &before);
    }
}
