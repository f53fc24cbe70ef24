//! Group-restricted searches and GUID lookups.

use crate::common::fixtures::{Harness, group_info, guid, person_info};
use crate::common::providers::ScriptedExecutor;
use directory_entity::search::{FindOptions, GuidLookup, QueryElement, RestrictGroups, SearchResult};
use directory_entity::{DirectoryError, InMemoryDirectory};
use std::sync::Arc;

#[test]
fn test_restrict_groups_projects_result_map() {
    let executor = Arc::new(ScriptedExecutor::returning(SearchResult::from_guids(["a"])));
    let search = RestrictGroups::new(executor.clone());

    let guids = search
        .search_restrict_groups(&QueryElement::equals("cn", "staff"))
        .unwrap();

    assert_eq!(guids, vec![guid("a")]);
    assert_eq!(
        SearchResult::from_guids(["a"]).as_map().get("a").map(String::as_str),
        Some("a")
    );
}

#[test]
fn test_restrict_groups_composes_criteria() {
    let executor = Arc::new(ScriptedExecutor::returning(SearchResult::new()));
    let search = RestrictGroups::new(executor.clone());
    let criteria = QueryElement::substring("cn", "st*");

    let guids = search.search_restrict_groups(&criteria).unwrap();
    assert!(guids.is_empty());

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    let (query, options) = &calls[0];
    assert_eq!(
        query,
        &QueryElement::and(vec![criteria.clone(), RestrictGroups::group_predicate()])
    );
    assert_eq!(options, &FindOptions::guid_only());
    assert_eq!(query.to_string(), "(&(cn=st*)(objectClass=groupOfNames))");
}

#[test]
fn test_restrict_groups_passes_errors_through() {
    let error = DirectoryError::unavailable("connection refused");
    let search = RestrictGroups::new(Arc::new(ScriptedExecutor::failing(error.clone())));

    assert_eq!(
        search.search_restrict_groups(&QueryElement::present("cn")),
        Err(error)
    );
}

#[test]
fn test_restrict_groups_against_directory() {
    let harness = Harness::in_memory();
    let mut staff = harness.group();
    staff.save(group_info("staff", &[])).unwrap();
    let mut admins = harness.group();
    admins.save(group_info("admins", &[])).unwrap();
    let mut person = harness.person();
    person.save(person_info("staff", "Member")).unwrap();

    let directory: Arc<InMemoryDirectory> = Arc::new(harness.gateway.inner().clone());
    let search = RestrictGroups::new(directory);

    let guids = search
        .search_restrict_groups(&QueryElement::equals("cn", "staff"))
        .unwrap();
    assert_eq!(guids, vec![guid("cn=staff,ou=groups,dc=example,dc=org")]);

    let all = search
        .search_restrict_groups(&QueryElement::present("cn"))
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_guid_lookup() {
    let harness = Harness::in_memory();
    let mut jane = harness.person();
    jane.save(person_info("Jane", "Doe")).unwrap();
    let mut john = harness.person();
    john.save(person_info("John", "Doe")).unwrap();

    let lookup = GuidLookup::new(Arc::new(harness.gateway.inner().clone()));

    assert_eq!(
        lookup.guid_for_cn("Jane").unwrap(),
        Some(guid("cn=Jane,dc=example,dc=org"))
    );
    assert_eq!(lookup.guid_for_cn("Nobody").unwrap(), None);
    assert_eq!(
        lookup.search_guid(&QueryElement::equals("sn", "Doe")),
        Err(DirectoryError::AmbiguousResult { count: 2 })
    );
}
