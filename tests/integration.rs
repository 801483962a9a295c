//! End-to-end scenarios exercising the public [`TripleStore`] API together.

use rdf_quadstore::{Pattern, StoreConfig, StoreError, TripleStore};

#[test]
fn e1_insert_and_find_a_single_triple_round_trips() {
    let mut store = TripleStore::default();
    let ns = store.insert_ns("http://example.org/");
    let alice = store.insert_iri_node(ns, "alice").unwrap();
    let knows = store.insert_iri_node(ns, "knows").unwrap();
    let bob = store.insert_iri_node(ns, "bob").unwrap();
    let (doc, _) = store.insert_doc(None, None, "file:///friends.ttl");

    store.insert_triple(alice, knows, bob, doc);

    let by_subject = store.find_triple(Pattern {
        s: Some(alice),
        ..Pattern::any()
    });
    assert_eq!(by_subject.len(), 1);
    assert_eq!(by_subject[0].o, bob);
}

#[test]
fn e2_literal_parsing_is_strict_per_datatype() {
    let mut store = TripleStore::default();
    let xsd_int = rdf_quadstore::standard_terms::NODE_XSD_INT;
    let xsd_bool = rdf_quadstore::standard_terms::NODE_XSD_BOOLEAN;
    let xsd_double = rdf_quadstore::standard_terms::NODE_XSD_DOUBLE;

    assert!(store.insert_literal("42", xsd_int, "").is_ok());
    assert!(matches!(
        store.insert_literal("0.9", xsd_int, ""),
        Err(StoreError::BadLiteral { .. })
    ));
    assert!(matches!(
        store.insert_literal("falsee", xsd_bool, ""),
        Err(StoreError::BadLiteral { .. })
    ));
    assert!(store.insert_literal("1e10", xsd_double, "").is_ok());
}

#[test]
fn e3_duplicate_inserts_never_grow_the_node_catalog() {
    let mut store = TripleStore::default();
    let ns = store.insert_ns("http://example.org/");
    let a = store.insert_iri_node(ns, "alice").unwrap();
    let b = store.insert_iri_node(ns, "alice").unwrap();
    assert_eq!(a, b);
}

#[test]
fn e4_standard_vocabulary_is_reachable_through_the_namespace_catalog() {
    let store = TripleStore::default();
    let owl = store.find_ns_by_prefix("owl").expect("owl is a standard prefix");
    assert_eq!(store.ns_iri(owl), Some("http://www.w3.org/2002/07/owl#"));
}

#[test]
fn e5_removing_a_document_drops_only_its_own_quads() {
    let mut store = TripleStore::default();
    let ns = store.insert_ns("http://example.org/");
    let a = store.insert_iri_node(ns, "a").unwrap();
    let b = store.insert_iri_node(ns, "b").unwrap();
    let p = store.insert_iri_node(ns, "p").unwrap();
    let (doc1, _) = store.insert_doc(None, None, "file:///one.ttl");
    let (doc2, _) = store.insert_doc(None, None, "file:///two.ttl");

    store.insert_triple(a, p, b, doc1);
    store.insert_triple(b, p, a, doc2);

    let removed = store.remove_doc(doc1);
    assert_eq!(removed, 1);
    assert_eq!(store.quad_count(), 1);
    let remaining = store.find_triple(Pattern::any());
    assert_eq!(remaining[0].d, doc2);
}

#[test]
fn e6_wildcard_queries_preserve_insertion_order() {
    let mut store = TripleStore::default();
    let ns = store.insert_ns("http://example.org/");
    let p = store.insert_iri_node(ns, "p").unwrap();
    let (doc, _) = store.insert_doc(None, None, "file:///order.ttl");

    let mut expected = Vec::new();
    for name in ["c", "a", "b"] {
        let n = store.insert_iri_node(ns, name).unwrap();
        store.insert_triple(n, p, n, doc);
        expected.push(n);
    }

    let results = store.find_triple(Pattern::any());
    let subjects: Vec<_> = results.iter().map(|q| q.s).collect();
    assert_eq!(subjects, expected);
}

#[test]
fn e7_a_config_with_two_same_leading_indices_fails_validation() {
    let mut config = StoreConfig::default();
    let dup = config.secondary_indices[0];
    config.secondary_indices.push(dup);
    assert!(matches!(TripleStore::new(config), Err(StoreError::Config(_))));
}

#[test]
fn prefix_conflicts_surface_through_the_facade() {
    let mut store = TripleStore::default();
    let a = store.insert_ns("http://example.org/a#");
    let b = store.insert_ns("http://example.org/b#");
    store.set_ns_prefix(a, "ex").unwrap();
    let err = store.set_ns_prefix(b, "ex").unwrap_err();
    assert!(matches!(err, StoreError::PrefixConflict { .. }));
}
