//! Property-based tests for the invariants the catalogs and quad index are
//! supposed to uphold regardless of the specific values exercised.

use proptest::prelude::*;
use rdf_quadstore::{Pattern, TripleStore};

proptest! {
    #[test]
    fn interning_the_same_iri_twice_always_returns_the_same_id(
        ns_local in "[a-zA-Z]{1,16}",
        local in "[a-zA-Z]{1,16}",
    ) {
        let mut store = TripleStore::default();
        let ns_iri = format!("http://example.org/{ns_local}/");
        let ns = store.insert_ns(&ns_iri);
        let a = store.insert_iri_node(ns, &local).unwrap();
        let b = store.insert_iri_node(ns, &local).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn distinct_local_names_under_the_same_namespace_get_distinct_ids(
        ns_local in "[a-zA-Z]{1,16}",
        a_local in "[a-zA-Z]{1,16}",
        b_local in "[a-zA-Z]{1,16}",
    ) {
        prop_assume!(a_local != b_local);
        let mut store = TripleStore::default();
        let ns_iri = format!("http://example.org/{ns_local}/");
        let ns = store.insert_ns(&ns_iri);
        let a = store.insert_iri_node(ns, &a_local).unwrap();
        let b = store.insert_iri_node(ns, &b_local).unwrap();
        prop_assert_ne!(a, b);
    }

    #[test]
    fn every_inserted_quad_is_found_by_an_all_wildcard_query(
        names in prop::collection::vec("[a-zA-Z]{1,8}", 1..12),
    ) {
        let mut store = TripleStore::default();
        let ns = store.insert_ns("http://example.org/");
        let p = store.insert_iri_node(ns, "p").unwrap();
        let (doc, _) = store.insert_doc(None, None, "file:///props.ttl");

        let mut inserted = Vec::new();
        for name in &names {
            let n = store.insert_iri_node(ns, name).unwrap();
            store.insert_triple(n, p, n, doc);
            inserted.push(n);
        }

        let found = store.find_triple(Pattern::any());
        prop_assert_eq!(found.len(), inserted.len());
        for (f, expected_s) in found.iter().zip(inserted.iter()) {
            prop_assert_eq!(f.s, *expected_s);
        }
    }

    #[test]
    fn subject_pattern_queries_only_return_matching_quads(
        names in prop::collection::vec("[a-zA-Z]{1,8}", 2..12),
    ) {
        let mut store = TripleStore::default();
        let ns = store.insert_ns("http://example.org/");
        let p = store.insert_iri_node(ns, "p").unwrap();
        let (doc, _) = store.insert_doc(None, None, "file:///props.ttl");

        let mut ids = Vec::new();
        for name in &names {
            let n = store.insert_iri_node(ns, name).unwrap();
            store.insert_triple(n, p, n, doc);
            ids.push(n);
        }

        let target = ids[0];
        let found = store.find_triple(Pattern { s: Some(target), ..Pattern::any() });
        prop_assert!(found.iter().all(|q| q.s == target));
    }

    #[test]
    fn removing_and_reinserting_a_node_reuses_its_id(
        ns_local in "[a-zA-Z]{1,16}",
        local in "[a-zA-Z]{1,16}",
    ) {
        let mut store = TripleStore::default();
        let ns_iri = format!("http://example.org/{ns_local}/");
        let ns = store.insert_ns(&ns_iri);
        let a = store.insert_iri_node(ns, &local).unwrap();
        store.remove_node(a);
        let other_local = format!("{local}x");
        let b = store.insert_iri_node(ns, &other_local).unwrap();
        prop_assert_eq!(a, b);
    }
}
