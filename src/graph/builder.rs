use super::store::GraphStore;
use crate::error::GraphError;
use crate::snapshot::GraphSnapshot;

/// How the store treats two nodes claiming the same display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AliasPolicy {
    /// Display names may repeat. References that resolve to more than one
    /// connected source are reported as ambiguous and bound to none of them.
    #[default]
    Allow,
    /// A display name already used as another node's alias or id is refused.
    Reject,
}

/// Configures and creates a [`GraphStore`].
///
/// ```
/// use pipegraph::graph::{AliasPolicy, GraphStore};
///
/// let store = GraphStore::builder().alias_policy(AliasPolicy::Reject).build();
/// assert_eq!(store.alias_policy(), AliasPolicy::Reject);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphStoreBuilder {
    alias_policy: AliasPolicy,
}

impl GraphStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias_policy(mut self, policy: AliasPolicy) -> Self {
        self.alias_policy = policy;
        self
    }

    pub fn build(self) -> GraphStore {
        GraphStore::with_policy(self.alias_policy)
    }

    /// Builds a store and replays `snapshot` into it, nodes first, then edges.
    ///
    /// Every node and edge goes through the same checks as an interactive edit;
    /// the first one rejected aborts the load.
    pub fn load(self, snapshot: GraphSnapshot) -> Result<GraphStore, GraphError> {
        let mut store = self.build();
        for node in snapshot.nodes {
            store.add_node(node).inspect_err(|e| {
                tracing::warn!(error = %e, "rejected node while loading snapshot");
            })?;
        }
        for edge in snapshot.edges {
            store.add_edge(edge).inspect_err(|e| {
                tracing::warn!(error = %e, "rejected edge while loading snapshot");
            })?;
        }
        Ok(store)
    }
}
