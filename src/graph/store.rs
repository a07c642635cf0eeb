use super::builder::{AliasPolicy, GraphStoreBuilder};
use super::edge::Edge;
use super::node::Node;
use crate::alias::AliasTable;
use crate::error::GraphError;
use crate::ports::{Port, PortKind, derive_ports_from};
use crate::reference::{ReferenceSet, parse};
use crate::snapshot::GraphSnapshot;
use crate::validation::{ValidationReport, validate_references};
use ahash::AHashMap;
use serde_json::Value;
use tracing::debug;

/// Per-node state computed from field values.
#[derive(Debug, Clone, Default)]
struct Derived {
    references: ReferenceSet,
    ports: Vec<Port>,
}

/// The authoritative node and edge set of a pipeline.
///
/// All mutation goes through the methods below. Each one refreshes the derived
/// state it affects before returning, so queries never see stale ports,
/// references or aliases.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    // node id -> position in `nodes`
    index: AHashMap<String, usize>,
    edges: Vec<Edge>,
    derived: AHashMap<String, Derived>,
    aliases: AliasTable,
    policy: AliasPolicy,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> GraphStoreBuilder {
        GraphStoreBuilder::new()
    }

    pub(super) fn with_policy(policy: AliasPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Rebuilds a store from a snapshot with the default configuration.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, GraphError> {
        GraphStoreBuilder::new().load(snapshot)
    }

    pub fn alias_policy(&self) -> AliasPolicy {
        self.policy
    }

    // --- Queries ---

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Current ports of a node, derived ports first.
    pub fn ports(&self, node_id: &str) -> Option<&[Port]> {
        self.derived.get(node_id).map(|d| d.ports.as_slice())
    }

    pub fn port(&self, node_id: &str, port_id: &str) -> Option<&Port> {
        self.ports(node_id)?.iter().find(|p| p.id == port_id)
    }

    /// References parsed from a node's template text.
    pub fn references(&self, node_id: &str) -> Option<&ReferenceSet> {
        self.derived.get(node_id).map(|d| &d.references)
    }

    /// Edges whose target is `node_id`.
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Edges whose target port is no longer among the target's current ports.
    ///
    /// These appear when template text stops referencing a connected source.
    /// They stay in the edge set until removed explicitly.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| self.port(&e.target, &e.target_handle).is_none())
            .collect()
    }

    pub fn validate(&self, node_id: &str) -> Result<ValidationReport, GraphError> {
        let node = self
            .node(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        if node.kind.template_field().is_none() {
            return Ok(ValidationReport {
                node_id: node.id.clone(),
                ..Default::default()
            });
        }
        let references = self
            .references(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        Ok(validate_references(
            node_id,
            references,
            self.incoming(node_id),
            &self.aliases,
        ))
    }

    /// Reports for every node that carries a template, in node order.
    pub fn validate_all(&self) -> Vec<ValidationReport> {
        self.nodes
            .iter()
            .filter(|n| n.kind.template_field().is_some())
            .filter_map(|n| self.validate(&n.id).ok())
            .collect()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    // --- Mutations ---

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        if self.policy == AliasPolicy::Reject {
            if let Some(claimant) = self.aliases.claimants(&node.id).first() {
                return Err(GraphError::DuplicateAlias {
                    alias: node.id.clone(),
                    claimed_by: claimant.clone(),
                });
            }
            if let Some(alias) = node.display_name() {
                self.ensure_alias_available(alias, &node.id)?;
            }
        }

        debug!(node_id = %node.id, kind = %node.kind, "adding node");
        let id = node.id.clone();
        let aliasable = node.kind.is_aliasable();
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        self.refresh_derived(&id);
        if aliasable {
            self.rebuild_aliases();
        }
        Ok(())
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Node, GraphError> {
        let position = self
            .index
            .remove(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let node = self.nodes.remove(position);
        for (i, n) in self.nodes.iter().enumerate().skip(position) {
            self.index.insert(n.id.clone(), i);
        }

        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(node_id));
        self.derived.remove(node_id);
        if node.kind.is_aliasable() {
            self.rebuild_aliases();
        }
        debug!(
            node_id,
            edges_removed = before - self.edges.len(),
            "removed node"
        );
        Ok(node)
    }

    /// Connects two existing ports.
    ///
    /// The source handle must be a source port of the source node, the target
    /// handle must be a target port currently derived for the target node, and
    /// that target port must not already have an incoming edge.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.require_port(&edge.source, &edge.source_handle, PortKind::Source)?;
        self.require_port(&edge.target, &edge.target_handle, PortKind::Target)?;

        if let Some(existing) = self
            .edges
            .iter()
            .find(|e| e.target == edge.target && e.target_handle == edge.target_handle)
        {
            return Err(GraphError::InvalidPort {
                node_id: edge.target.clone(),
                port_id: edge.target_handle.clone(),
                reason: format!("already connected from '{}'", existing.source_handle),
            });
        }

        debug!(edge = %edge, "adding edge");
        self.edges.push(edge);
        Ok(())
    }

    pub fn remove_edge(&mut self, edge: &Edge) -> Result<Edge, GraphError> {
        let position = self
            .edges
            .iter()
            .position(|e| e == edge)
            .ok_or_else(|| GraphError::EdgeNotFound {
                source_handle: edge.source_handle.clone(),
                target_handle: edge.target_handle.clone(),
            })?;
        debug!(edge = %edge, "removing edge");
        Ok(self.edges.remove(position))
    }

    /// Sets one field of a node. This is how all node content enters the store.
    ///
    /// Template edits re-derive the node's references and ports; display name
    /// edits rebuild the alias table. Edges are never touched: an edge whose
    /// target port disappears stays in place (see [`GraphStore::dangling_edges`]).
    pub fn update_node_field(
        &mut self,
        node_id: &str,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<(), GraphError> {
        let value = value.into();
        let position = *self
            .index
            .get(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let kind = &self.nodes[position].kind;
        let renames = kind.is_name_field(key);
        let retemplates = kind.template_field() == Some(key);

        if renames && self.policy == AliasPolicy::Reject {
            let renamed = self.nodes[position]
                .clone()
                .with_field(key, value.clone());
            if let Some(alias) = renamed.display_name() {
                self.ensure_alias_available(alias, node_id)?;
            }
        }

        debug!(node_id, key, "updating node field");
        self.nodes[position].fields.insert(key.to_string(), value);

        if retemplates {
            self.refresh_derived(node_id);
        }
        if renames {
            self.rebuild_aliases();
        }
        Ok(())
    }

    // --- Internal ---

    fn refresh_derived(&mut self, node_id: &str) {
        let Some(node) = self.node(node_id) else {
            return;
        };
        let references = match node.kind.template_field() {
            Some(_) => parse(node.template_text()),
            None => ReferenceSet::default(),
        };
        let ports = derive_ports_from(&node.id, &node.kind, &references);
        debug!(
            node_id,
            references = references.len(),
            ports = ports.len(),
            "derived ports"
        );
        self.derived
            .insert(node_id.to_string(), Derived { references, ports });
    }

    fn rebuild_aliases(&mut self) {
        self.aliases = AliasTable::build(&self.nodes);
    }

    fn require_port(&self, node_id: &str, port_id: &str, kind: PortKind) -> Result<(), GraphError> {
        if !self.contains_node(node_id) {
            return Err(GraphError::NodeNotFound(node_id.to_string()));
        }
        match self.port(node_id, port_id) {
            Some(port) if port.kind == kind => Ok(()),
            Some(port) => Err(GraphError::InvalidPort {
                node_id: node_id.to_string(),
                port_id: port_id.to_string(),
                reason: format!("is a {} port, expected {}", port.kind, kind),
            }),
            None => Err(GraphError::InvalidPort {
                node_id: node_id.to_string(),
                port_id: port_id.to_string(),
                reason: "no such port on this node".to_string(),
            }),
        }
    }

    fn ensure_alias_available(&self, alias: &str, owner: &str) -> Result<(), GraphError> {
        if let Some(other) = self.aliases.claimants(alias).iter().find(|id| *id != owner) {
            return Err(GraphError::DuplicateAlias {
                alias: alias.to_string(),
                claimed_by: other.clone(),
            });
        }
        if alias != owner && self.contains_node(alias) {
            return Err(GraphError::DuplicateAlias {
                alias: alias.to_string(),
                claimed_by: alias.to_string(),
            });
        }
        Ok(())
    }
}
