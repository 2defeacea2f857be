use std::collections::HashSet;

use quickpick::{Catalog, DataProvider};

#[test]
fn fetch_all_is_memoized() {
    let catalog = Catalog::new(500);

    let first = catalog.fetch_all().expect("first fetch");
    let second = catalog.fetch_all().expect("second fetch");

    assert_eq!(first.len(), second.len());
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    let first_pids: Vec<&str> = first.iter().map(|r| r.pid.as_str()).collect();
    let second_pids: Vec<&str> = second.iter().map(|r| r.pid.as_str()).collect();
    assert_eq!(first_pids, second_pids);
}

#[test]
fn identifiers_are_unique() {
    let catalog = Catalog::new(2_000);
    let records = catalog.fetch_all().expect("fetch");

    let pids: HashSet<&str> = records.iter().map(|r| r.pid.as_str()).collect();
    assert_eq!(pids.len(), records.len());
}

#[test]
fn identifiers_differ_across_catalogs() {
    // No seeding: two catalogs must not reproduce each other's identifiers
    let a = Catalog::new(100).fetch_all().expect("fetch a");
    let b = Catalog::new(100).fetch_all().expect("fetch b");

    assert_ne!(
        a.iter().map(|r| r.pid.clone()).collect::<Vec<_>>(),
        b.iter().map(|r| r.pid.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn names_and_tags_cycle_deterministically() {
    let catalog = Catalog::new(40);
    let records = catalog.fetch_all().expect("fetch");

    assert_eq!(records[0].name, "测试RAG问答_000001");
    assert_eq!(records[0].datasource, "ironbank");
    assert_eq!(records[1].datasource, "database");
    assert_eq!(records[4].datasource, "cache");
    // Tag vocabulary cycles every 5, templates every 15
    assert_eq!(records[5].datasource, "ironbank");
    assert_eq!(records[15].name, "测试RAG问答_000016");
    // Zero-padded six-digit running index
    assert!(records[39].name.ends_with("_000040"));
}

#[test]
fn requested_count_is_honored() {
    let catalog = Catalog::new(123);
    assert_eq!(catalog.count(), 123);
    assert_eq!(catalog.fetch_all().expect("fetch").len(), 123);
}
