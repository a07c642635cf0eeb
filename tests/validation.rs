//! Tests for reconciling references against connected sources.
mod common;
use common::*;
use pipegraph::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_reference_by_raw_id_is_valid() {
    let mut store = GraphStore::new();
    store.add_node(Node::new("X", NodeKind::Input)).unwrap();
    store.add_node(text("t", "{{X}}")).unwrap();
    store.add_edge(wire("X", "t", "X")).unwrap();

    let report = store.validate("t").unwrap();
    assert!(report.invalid_references.is_empty());
    assert!(report.unused_connections.is_empty());
    assert!(report.is_consistent());
}

#[test]
fn test_reference_by_alias_is_valid() {
    let mut store = GraphStore::new();
    store.add_node(input("X", "foo")).unwrap();
    store.add_node(text("t", "{{foo}}")).unwrap();
    store.add_edge(wire("X", "t", "foo")).unwrap();

    let report = store.validate("t").unwrap();
    assert!(report.invalid_references.is_empty());
    assert!(report.unused_connections.is_empty());
}

#[test]
fn test_unconnected_reference_is_invalid() {
    let mut store = GraphStore::new();
    store.add_node(text("t", "Hi {{ghost}}")).unwrap();

    let report = store.validate("t").unwrap();
    assert_eq!(paths(&report.invalid_references), vec!["ghost"]);
    assert!(report.unused_connections.is_empty());
}

#[test]
fn test_unreferenced_connection_is_unused_and_labelled_by_alias() {
    let mut store = GraphStore::new();
    store.add_node(input("Y", "why")).unwrap();
    store.add_node(Node::new("Z", NodeKind::Input)).unwrap();
    store.add_node(text("t", "{{why}} {{Z}}")).unwrap();
    store.add_edge(wire("Y", "t", "why")).unwrap();
    store.add_edge(wire("Z", "t", "Z")).unwrap();

    store.update_node_field("t", TEXT_FIELD, "nothing here").unwrap();
    let report = store.validate("t").unwrap();
    assert_eq!(report.unused_connections, vec!["why", "Z"]);
    assert!(report.invalid_references.is_empty());
}

#[test]
fn test_removing_reference_flips_used_to_unused_without_touching_edges() {
    let mut store = create_greeting_store();
    assert!(store.validate("text_1").unwrap().is_consistent());
    let edges_before = store.edges().to_vec();

    store.update_node_field("text_1", TEXT_FIELD, "Hello").unwrap();
    let report = store.validate("text_1").unwrap();
    assert_eq!(report.unused_connections, vec!["user_name"]);
    assert_eq!(store.edges(), edges_before.as_slice());

    store
        .update_node_field("text_1", TEXT_FIELD, "Hello {{user_name}}")
        .unwrap();
    assert!(store.validate("text_1").unwrap().is_consistent());
}

#[test]
fn test_order_of_connect_and_reference_does_not_matter() {
    // Reference first, then connect.
    let mut first = GraphStore::new();
    first.add_node(input("a", "name")).unwrap();
    first.add_node(text("t", "")).unwrap();
    first.update_node_field("t", TEXT_FIELD, "{{name}}").unwrap();
    first.add_edge(wire("a", "t", "name")).unwrap();

    // Connect while the reference is by id, then switch to the alias.
    let mut second = GraphStore::new();
    second.add_node(input("a", "name")).unwrap();
    second.add_node(text("t", "{{a}} {{name}}")).unwrap();
    second.add_edge(wire("a", "t", "name")).unwrap();
    second.update_node_field("t", TEXT_FIELD, "{{name}}").unwrap();

    assert_eq!(first.validate("t").unwrap(), second.validate("t").unwrap());
    assert!(first.validate("t").unwrap().is_consistent());
}

#[test]
fn test_many_references_to_one_source_keep_it_used() {
    let mut store = GraphStore::new();
    store.add_node(input("llm", "model")).unwrap();
    store.add_node(text("t", "{{llm.text}} / {{model.tokens}} / {{llm}}")).unwrap();
    store.add_edge(wire("llm", "t", "llm.text")).unwrap();

    let report = store.validate("t").unwrap();
    assert!(report.is_consistent(), "{report:?}");
}

#[test]
fn test_alias_shared_by_two_connected_sources_is_ambiguous() {
    let mut store = GraphStore::new();
    store.add_node(input("a", "dup")).unwrap();
    store.add_node(input("b", "dup")).unwrap();
    store.add_node(text("t", "{{dup}} {{a}}")).unwrap();
    store.add_edge(wire("a", "t", "a")).unwrap();
    store.add_edge(wire("b", "t", "dup")).unwrap();

    let report = store.validate("t").unwrap();
    assert_eq!(paths(&report.ambiguous_references), vec!["dup"]);
    assert!(report.invalid_references.is_empty());
    // `a` is used by `{{a}}`; nothing binds to `b`.
    assert_eq!(report.unused_connections, vec!["b"]);
}

#[test]
fn test_unused_sources_sharing_an_alias_are_listed_by_id() {
    let mut store = GraphStore::new();
    store.add_node(input("a", "dup")).unwrap();
    store.add_node(input("b", "dup")).unwrap();
    store.add_node(text("t", "{{dup}}")).unwrap();
    store.add_edge(wire("a", "t", "dup")).unwrap();
    store.update_node_field("t", TEXT_FIELD, "{{dup}} {{other}}").unwrap();
    store.add_edge(Edge::new("b", "b-value", "t", "t-var-other")).unwrap();
    store.update_node_field("t", TEXT_FIELD, "nothing here").unwrap();

    let report = store.validate("t").unwrap();
    assert_eq!(report.unused_connections, vec!["a", "b"]);
}

#[test]
fn test_alias_shared_with_an_unconnected_node_is_not_ambiguous() {
    let mut store = GraphStore::new();
    store.add_node(input("a", "dup")).unwrap();
    store.add_node(input("b", "dup")).unwrap();
    store.add_node(text("t", "{{dup}}")).unwrap();
    store.add_edge(wire("a", "t", "dup")).unwrap();

    assert!(store.validate("t").unwrap().is_consistent());
}

#[test]
fn test_non_template_nodes_have_nothing_to_reconcile() {
    let mut store = GraphStore::new();
    store.add_node(input("a", "x")).unwrap();
    store.add_node(Node::new("m", NodeKind::Math)).unwrap();
    store.add_edge(Edge::new("a", "a-value", "m", "m-a")).unwrap();

    let report = store.validate("m").unwrap();
    assert!(report.is_consistent());
    assert_eq!(report.node_id, "m");
}

#[test]
fn test_free_function_matches_store() {
    let store = create_greeting_store();
    let node = store.node("text_1").unwrap();
    let report = validate(node, store.edges(), store.aliases());
    assert_eq!(report, store.validate("text_1").unwrap());
}

#[test]
fn test_edges_to_other_nodes_are_ignored() {
    let mut store = create_greeting_store();
    store.add_node(text("other", "{{user_name}}")).unwrap();

    let report = store.validate("other").unwrap();
    assert_eq!(paths(&report.invalid_references), vec!["user_name"]);
    assert!(report.unused_connections.is_empty());
}

#[test]
fn test_validate_all_covers_template_nodes_in_order() {
    let mut store = create_greeting_store();
    store.add_node(text("text_2", "{{missing}}")).unwrap();
    store.add_node(Node::new("m", NodeKind::Math)).unwrap();

    let reports = store.validate_all();
    let ids: Vec<&str> = reports.iter().map(|r| r.node_id.as_str()).collect();
    assert_eq!(ids, vec!["text_1", "text_2"]);
    assert!(reports[0].is_consistent());
    assert!(!reports[1].is_consistent());
}

#[test]
fn test_validate_unknown_node_fails() {
    let store = GraphStore::new();
    assert_eq!(
        store.validate("nope").unwrap_err(),
        GraphError::NodeNotFound("nope".to_string())
    );
}
