//! Bidirectional index between node ids and their display names.

use crate::graph::Node;
use ahash::AHashMap;

/// Maps node ids to aliases and aliases back to the nodes claiming them.
///
/// This is a derived index: it is rebuilt from node field state and never
/// edited directly. A display name is not required to be unique, so an alias
/// can have several claimants; such an alias is *ambiguous* and
/// [`AliasTable::node_id_of`] refuses to pick one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    by_node: AHashMap<String, String>,
    by_alias: AHashMap<String, Vec<String>>,
}

impl AliasTable {
    /// Scans aliasable nodes for their current display names.
    pub fn build<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut table = Self::default();
        for node in nodes {
            if let Some(alias) = node.display_name() {
                table.by_node.insert(node.id.clone(), alias.to_string());
                table
                    .by_alias
                    .entry(alias.to_string())
                    .or_default()
                    .push(node.id.clone());
            }
        }
        table
    }

    pub fn alias_of(&self, node_id: &str) -> Option<&str> {
        self.by_node.get(node_id).map(String::as_str)
    }

    /// The single node claiming `alias`. `None` if unclaimed or ambiguous.
    pub fn node_id_of(&self, alias: &str) -> Option<&str> {
        match self.by_alias.get(alias).map(Vec::as_slice) {
            Some([only]) => Some(only.as_str()),
            _ => None,
        }
    }

    /// Every node claiming `alias`, in node order.
    pub fn claimants(&self, alias: &str) -> &[String] {
        self.by_alias.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_ambiguous(&self, alias: &str) -> bool {
        self.claimants(alias).len() > 1
    }

    /// Aliases claimed by more than one node, sorted.
    pub fn ambiguous_aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .by_alias
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Whether a reference base names `node_id`, either directly or by alias.
    pub fn resolves_to(&self, base: &str, node_id: &str) -> bool {
        base == node_id || self.alias_of(node_id) == Some(base)
    }

    /// The name to show for a node: its alias when it identifies the node
    /// uniquely, else its id.
    pub fn label<'a>(&'a self, node_id: &'a str) -> &'a str {
        self.alias_of(node_id)
            .filter(|alias| !self.is_ambiguous(alias))
            .unwrap_or(node_id)
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}
