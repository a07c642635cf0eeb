//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to build, edit, validate and submit a
//! pipeline graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use pipegraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let snapshot = GraphSnapshot::from_file("path/to/pipeline.json")?;
//! let store = GraphStore::from_snapshot(snapshot)?;
//!
//! for report in store.validate_all() {
//!     println!("{}: {}", report.node_id, ReportFormatter::format_report(&report));
//! }
//! # Ok(())
//! # }
//! ```

// Graph model and store
pub use crate::graph::{
    AliasPolicy, DISPLAY_NAME_FIELD, Edge, GraphStore, GraphStoreBuilder, Node, NodeKind,
    TEXT_FIELD,
};

// Derived state
pub use crate::alias::AliasTable;
pub use crate::ports::{Port, PortKind, Side, derive_ports};
pub use crate::reference::{ReferenceSet, ReferenceToken, parse};
pub use crate::validation::{ValidationReport, validate};

// Snapshot and submission
pub use crate::snapshot::GraphSnapshot;
pub use crate::submit::{HttpValidator, PipelineValidator, PipelineVerdict, SubmitConfig};

// Error types
pub use crate::error::{GraphError, SnapshotError, SubmitError};

// Formatting
pub use crate::report::ReportFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
