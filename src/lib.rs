//! # pipegraph - Reference-Driven Ports for Pipeline Graphs
//!
//! **pipegraph** keeps a node-based pipeline consistent while it is being edited.
//! Text nodes embed template references such as `{{user_name}}` or
//! `{{llm.response}}`; the crate turns those references into connection ports
//! and checks them against the edges actually wired into the node.
//!
//! ## Core Workflow
//!
//! 1.  **Build a store**: [`graph::GraphStore`] owns every node and edge. Configure
//!     it with [`graph::GraphStore::builder`] or load one from a snapshot.
//! 2.  **Edit**: add nodes, set fields with `update_node_field`, connect ports with
//!     `add_edge`. Every mutation re-derives the affected node's references,
//!     ports and the alias table before it returns.
//! 3.  **Inspect**: read derived ports with `ports`, and reconcile references
//!     against connections with `validate`. Inconsistencies come back as data
//!     ([`validation::ValidationReport`]), never as errors.
//! 4.  **Submit**: serialize a [`snapshot::GraphSnapshot`] and send it to the
//!     external validation service through a [`submit::PipelineValidator`].
//!
//! ## Quick Start
//!
//! ```rust
//! use pipegraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut store = GraphStore::new();
//!     store.add_node(Node::new("input_1", NodeKind::Input).with_field(DISPLAY_NAME_FIELD, "user_name"))?;
//!     store.add_node(Node::new("text_1", NodeKind::Text).with_field(TEXT_FIELD, "Hello {{user_name}}"))?;
//!
//!     // The template produced a port for `user_name`, so it can be wired.
//!     store.add_edge(Edge::new("input_1", "input_1-value", "text_1", "text_1-var-user_name"))?;
//!
//!     let report = store.validate("text_1")?;
//!     assert!(report.is_consistent());
//!
//!     // Referencing something that is not connected is reported, not rejected.
//!     store.update_node_field("text_1", TEXT_FIELD, "Hello {{user_name}} from {{city}}")?;
//!     let report = store.validate("text_1")?;
//!     assert_eq!(report.invalid_references, vec!["city"]);
//!     Ok(())
//! }
//! ```

pub mod alias;
pub mod error;
pub mod graph;
pub mod ports;
pub mod prelude;
pub mod reference;
pub mod report;
pub mod snapshot;
pub mod submit;
pub mod validation;
