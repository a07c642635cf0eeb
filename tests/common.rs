//! Common test utilities for building pipeline graphs.
use pipegraph::prelude::*;

/// An input node with the given display name.
#[allow(dead_code)]
pub fn input(id: &str, alias: &str) -> Node {
    Node::new(id, NodeKind::Input).with_field(DISPLAY_NAME_FIELD, alias)
}

/// A text node with the given template.
#[allow(dead_code)]
pub fn text(id: &str, template: &str) -> Node {
    Node::new(id, NodeKind::Text).with_field(TEXT_FIELD, template)
}

/// An edge from `source`'s `value` output into the template port for `token` on `target`.
#[allow(dead_code)]
pub fn wire(source: &str, target: &str, token: &str) -> Edge {
    Edge::new(
        source,
        format!("{}-value", source),
        target,
        format!("{}-var-{}", target, token.replace('.', "-")),
    )
}

/// The classic greeting pipeline.
///
/// `input_1 ("user_name") -> text_1 "Hello {{user_name}}"`
#[allow(dead_code)]
pub fn create_greeting_store() -> GraphStore {
    let mut store = GraphStore::new();
    store.add_node(input("input_1", "user_name")).unwrap();
    store
        .add_node(text("text_1", "Hello {{user_name}}"))
        .unwrap();
    store
        .add_edge(wire("input_1", "text_1", "user_name"))
        .unwrap();
    store
}

/// A pipeline JSON document in the editor's wire format.
#[allow(dead_code)]
pub const GREETING_PIPELINE_JSON: &str = r#"{
  "nodes": [
    { "id": "customInput-1", "type": "customInput", "position": { "x": 0, "y": 0 },
      "data": { "displayName": "user_name", "inputType": "Text" } },
    { "id": "text-1", "type": "text",
      "data": { "text": "Hello {{ user_name }}, you said {{ customInput-1 }}" } },
    { "id": "customOutput-1", "type": "customOutput",
      "data": { "displayName": "greeting", "outputType": "Text" } }
  ],
  "edges": [
    { "id": "e1", "source": "customInput-1", "sourceHandle": "customInput-1-value",
      "target": "text-1", "targetHandle": "text-1-var-user_name" },
    { "id": "e2", "source": "text-1", "sourceHandle": "text-1-output",
      "target": "customOutput-1", "targetHandle": "customOutput-1-value" }
  ]
}"#;

/// The paths of a reference list, for compact assertions.
#[allow(dead_code)]
pub fn paths(tokens: &[ReferenceToken]) -> Vec<&str> {
    tokens.iter().map(ReferenceToken::as_str).collect()
}
