//! Reconciles a node's references with the edges wired into it.

use crate::alias::AliasTable;
use crate::graph::{Edge, Node};
use crate::reference::{ReferenceSet, ReferenceToken, parse};
use itertools::Itertools;
use serde::Serialize;

/// Consistency of one node's references against its incoming connections.
///
/// Inconsistency is reported as data; none of these lists is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub node_id: String,
    /// References whose base names no connected source.
    pub invalid_references: Vec<ReferenceToken>,
    /// Connected sources no reference uses, labelled by alias when that alias
    /// is unique, else by node id.
    pub unused_connections: Vec<String>,
    /// References whose base names more than one connected source.
    pub ambiguous_references: Vec<ReferenceToken>,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.invalid_references.is_empty()
            && self.unused_connections.is_empty()
            && self.ambiguous_references.is_empty()
    }
}

/// Validates `node` using its current template text.
///
/// Kinds without a template field have nothing to reconcile and always yield
/// an empty report.
pub fn validate<'e>(
    node: &Node,
    edges: impl IntoIterator<Item = &'e Edge>,
    aliases: &AliasTable,
) -> ValidationReport {
    if node.kind.template_field().is_none() {
        return ValidationReport {
            node_id: node.id.clone(),
            ..Default::default()
        };
    }
    validate_references(&node.id, &parse(node.template_text()), edges, aliases)
}

/// Validates an already-parsed reference set for the node `node_id`.
///
/// Only edges targeting `node_id` are considered; the rest are ignored.
pub fn validate_references<'e>(
    node_id: &str,
    references: &ReferenceSet,
    edges: impl IntoIterator<Item = &'e Edge>,
    aliases: &AliasTable,
) -> ValidationReport {
    let connected: Vec<&str> = edges
        .into_iter()
        .filter(|e| e.target == node_id)
        .map(|e| e.source.as_str())
        .unique()
        .collect();

    let mut used = vec![false; connected.len()];
    let mut report = ValidationReport {
        node_id: node_id.to_string(),
        ..Default::default()
    };

    for token in references {
        let matches: Vec<usize> = connected
            .iter()
            .positions(|source| aliases.resolves_to(token.base(), source))
            .collect();
        match matches.as_slice() {
            [] => report.invalid_references.push(token.clone()),
            [only] => used[*only] = true,
            _ => report.ambiguous_references.push(token.clone()),
        }
    }

    report.unused_connections = connected
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(source, _)| aliases.label(source).to_string())
        .collect();

    tracing::trace!(
        node_id,
        invalid = report.invalid_references.len(),
        unused = report.unused_connections.len(),
        ambiguous = report.ambiguous_references.len(),
        "validated references"
    );
    report
}
