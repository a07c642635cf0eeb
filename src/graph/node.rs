use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Field holding the user-facing name of aliasable nodes.
pub const DISPLAY_NAME_FIELD: &str = "displayName";

/// Field holding the template text of reference-bearing nodes.
pub const TEXT_FIELD: &str = "text";

/// The kinds of node a pipeline can contain.
///
/// Serialized with the wire names used by the pipeline editor
/// (`customInput`, `customOutput`, `text`, ...). Any other type name loads as
/// [`NodeKind::Other`], which has no ports and no special fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "customInput", alias = "input")]
    Input,
    #[serde(rename = "customOutput", alias = "output")]
    Output,
    #[serde(rename = "llm")]
    Llm,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "math")]
    Math,
    #[serde(rename = "merge")]
    Merge,
    #[serde(rename = "condition")]
    Condition,
    #[serde(rename = "delay")]
    Delay,
    #[serde(rename = "note")]
    Note,
    #[serde(untagged)]
    Other(String),
}

impl NodeKind {
    /// Every kind the editor's toolbar offers.
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Input,
        NodeKind::Output,
        NodeKind::Llm,
        NodeKind::Text,
        NodeKind::Math,
        NodeKind::Merge,
        NodeKind::Condition,
        NodeKind::Delay,
        NodeKind::Note,
    ];

    pub fn wire_name(&self) -> &str {
        match self {
            NodeKind::Input => "customInput",
            NodeKind::Output => "customOutput",
            NodeKind::Llm => "llm",
            NodeKind::Text => "text",
            NodeKind::Math => "math",
            NodeKind::Merge => "merge",
            NodeKind::Condition => "condition",
            NodeKind::Delay => "delay",
            NodeKind::Note => "note",
            NodeKind::Other(name) => name,
        }
    }

    /// Whether nodes of this kind carry a `displayName` usable as an alias.
    pub fn is_aliasable(&self) -> bool {
        matches!(self, NodeKind::Input | NodeKind::Output)
    }

    /// Older editor builds stored the name under a kind-specific key.
    fn legacy_name_field(&self) -> Option<&'static str> {
        match self {
            NodeKind::Input => Some("inputName"),
            NodeKind::Output => Some("outputName"),
            _ => None,
        }
    }

    /// Whether writing `key` can change a node's alias.
    pub fn is_name_field(&self, key: &str) -> bool {
        self.is_aliasable()
            && (key == DISPLAY_NAME_FIELD || self.legacy_name_field() == Some(key))
    }

    /// The field whose text is scanned for references, if this kind has one.
    pub fn template_field(&self) -> Option<&'static str> {
        match self {
            NodeKind::Text => Some(TEXT_FIELD),
            _ => None,
        }
    }

    /// Field values a freshly placed node of this kind starts with.
    pub fn default_fields(&self, id: &str) -> Map<String, Value> {
        let pairs = match self {
            NodeKind::Input => vec![
                (DISPLAY_NAME_FIELD, json!(id.replace("customInput-", "input_"))),
                ("inputType", json!("Text")),
            ],
            NodeKind::Output => vec![
                (DISPLAY_NAME_FIELD, json!(id.replace("customOutput-", "output_"))),
                ("outputType", json!("Text")),
            ],
            NodeKind::Text => vec![(TEXT_FIELD, json!("{{input}}"))],
            NodeKind::Math => vec![("op", json!("+"))],
            NodeKind::Condition => vec![("expr", json!("x > 0"))],
            NodeKind::Delay => vec![("ms", json!(500))],
            NodeKind::Note => vec![("note", json!("Write a note..."))],
            NodeKind::Llm | NodeKind::Merge | NodeKind::Other(_) => vec![],
        };
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A single node of the pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, rename = "data")]
    pub fields: Map<String, Value>,
}

impl Node {
    /// Creates a node with no field values.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            fields: Map::new(),
        }
    }

    /// Creates a node pre-filled with its kind's default field values.
    pub fn with_defaults(id: impl Into<String>, kind: NodeKind) -> Self {
        let id = id.into();
        let fields = kind.default_fields(&id);
        Self { id, kind, fields }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The node's alias, if its kind is aliasable and a non-empty name is set.
    ///
    /// `displayName` wins; `inputName`/`outputName` are read when it is absent.
    pub fn display_name(&self) -> Option<&str> {
        if !self.kind.is_aliasable() {
            return None;
        }
        let named = |key: &str| {
            self.fields
                .get(key)
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
        };
        named(DISPLAY_NAME_FIELD).or_else(|| self.kind.legacy_name_field().and_then(named))
    }

    /// The text scanned for references. Empty for kinds without a template field.
    pub fn template_text(&self) -> &str {
        self.kind
            .template_field()
            .and_then(|key| self.fields.get(key))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}
