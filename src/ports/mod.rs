//! Port derivation.
//!
//! Every node kind has a fixed set of ports from the catalogue. Text nodes
//! additionally get one target port per distinct reference in their template,
//! placed before the fixed output port.

mod catalogue;

use crate::graph::{Node, NodeKind};
use crate::reference::{ReferenceSet, ReferenceToken, parse};
use catalogue::static_port_specs;
use serde::Serialize;
use std::fmt;

/// Marker between the owner id and the token in a derived port id.
pub const DERIVED_PORT_MARKER: &str = "var";

/// Whether a port emits or accepts connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Source,
    Target,
}

/// The node edge a port is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl PortKind {
    pub fn side(self) -> Side {
        match self {
            PortKind::Source => Side::Right,
            PortKind::Target => Side::Left,
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::Source => f.write_str("source"),
            PortKind::Target => f.write_str("target"),
        }
    }
}

/// A connection point on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub id: String,
    pub kind: PortKind,
    pub owner: String,
    /// Fractional position along the port's side, in `(0, 1)`.
    pub offset: f64,
    /// The reference this port was derived from, for template ports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<ReferenceToken>,
}

impl Port {
    pub fn side(&self) -> Side {
        self.kind.side()
    }

    /// Offset as a whole percentage, e.g. `33` for the first of two ports.
    pub fn percent(&self) -> u32 {
        (self.offset * 100.0).round() as u32
    }

    pub fn is_derived(&self) -> bool {
        self.derived_from.is_some()
    }
}

/// Id of the target port derived from `token` on node `owner`.
///
/// Content-addressed: the id depends only on the owner and the token, never on
/// the token's position in the text.
pub fn derived_port_id(owner: &str, token: &ReferenceToken) -> String {
    format!("{}-{}-{}", owner, DERIVED_PORT_MARKER, token.port_suffix())
}

/// Offset of input `index` when `count` inputs share one side.
pub fn spread_offset(index: usize, count: usize) -> f64 {
    (index + 1) as f64 / (count + 1) as f64
}

/// Derives the full, ordered port list of `node` from its current fields.
pub fn derive_ports(node: &Node) -> Vec<Port> {
    let references = match node.kind.template_field() {
        Some(_) => parse(node.template_text()),
        None => ReferenceSet::default(),
    };
    derive_ports_from(&node.id, &node.kind, &references)
}

/// Derives ports from an already-parsed reference set.
pub fn derive_ports_from(owner: &str, kind: &NodeKind, references: &ReferenceSet) -> Vec<Port> {
    let count = references.len();
    let mut ports: Vec<Port> = references
        .iter()
        .enumerate()
        .map(|(i, token)| Port {
            id: derived_port_id(owner, token),
            kind: PortKind::Target,
            owner: owner.to_string(),
            offset: spread_offset(i, count),
            derived_from: Some(token.clone()),
        })
        .collect();

    ports.extend(static_port_specs(kind).iter().map(|spec| Port {
        id: format!("{}-{}", owner, spec.suffix),
        kind: spec.kind,
        owner: owner.to_string(),
        offset: spec.offset,
        derived_from: None,
    }));
    ports
}
