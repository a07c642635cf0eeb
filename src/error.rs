use thiserror::Error;

/// Errors raised by the graph store when a mutation would break one of its invariants.
///
/// A mutation that returns an error has not been applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' does not exist in the graph")]
    NodeNotFound(String),

    #[error("A node with id '{0}' already exists in the graph")]
    DuplicateNode(String),

    #[error("No edge from '{source_handle}' to '{target_handle}' exists in the graph")]
    EdgeNotFound {
        source_handle: String,
        target_handle: String,
    },

    #[error("Port '{port_id}' on node '{node_id}' cannot accept this connection: {reason}")]
    InvalidPort {
        node_id: String,
        port_id: String,
        reason: String,
    },

    #[error("Display name '{alias}' is already claimed by node '{claimed_by}'")]
    DuplicateAlias { alias: String, claimed_by: String },
}

/// Errors that can occur while reading or rebuilding a graph snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to parse pipeline JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read pipeline file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Pipeline snapshot is inconsistent: {0}")]
    Graph(#[from] GraphError),
}

/// Errors surfaced from the external pipeline validation service.
///
/// These are reported verbatim; nothing in this crate retries or reinterprets them.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Backend error: {status}\n{body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Could not decode backend response: {0}")]
    Decode(String),

    #[error("Invalid submission configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SubmitError::Decode(err.to_string())
        } else if err.is_builder() {
            SubmitError::Config(err.to_string())
        } else {
            SubmitError::Transport(err.to_string())
        }
    }
}
