//! Submission of a graph snapshot to the external pipeline validation service.
//!
//! The service checks things this crate deliberately does not, such as whether
//! the edge set is acyclic. Failures are surfaced verbatim and never retried.

use crate::error::SubmitError;
use crate::snapshot::GraphSnapshot;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/pipeline/parse";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Environment variable overriding [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV: &str = "PIPEGRAPH_ENDPOINT";

/// Where and how to submit snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SubmitConfig {
    /// Defaults, with the endpoint taken from `PIPEGRAPH_ENDPOINT` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// What the validation service reports about a submitted snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PipelineVerdict {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

impl PipelineVerdict {
    /// Whether the echoed counts agree with what was sent.
    pub fn matches(&self, snapshot: &GraphSnapshot) -> bool {
        self.num_nodes == snapshot.node_count() && self.num_edges == snapshot.edge_count()
    }
}

/// A service that accepts a snapshot and returns a verdict.
pub trait PipelineValidator {
    fn submit(
        &self,
        snapshot: &GraphSnapshot,
    ) -> impl Future<Output = Result<PipelineVerdict, SubmitError>> + Send;
}

/// Turns a raw HTTP status and body into a verdict or a surfaced error.
pub fn interpret_response(status: u16, body: &str) -> Result<PipelineVerdict, SubmitError> {
    if !(200..300).contains(&status) {
        return Err(SubmitError::Status {
            status,
            body: body.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| SubmitError::Decode(e.to_string()))
}

/// Posts snapshots as JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpValidator {
    client: reqwest::Client,
    config: SubmitConfig,
}

impl HttpValidator {
    pub fn new(config: SubmitConfig) -> Result<Self, SubmitError> {
        if config.endpoint.is_empty() {
            return Err(SubmitError::Config("endpoint is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }
}

impl PipelineValidator for HttpValidator {
    #[instrument(
        name = "pipeline_submit",
        skip(self, snapshot),
        fields(
            endpoint = %self.config.endpoint,
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
        )
    )]
    async fn submit(&self, snapshot: &GraphSnapshot) -> Result<PipelineVerdict, SubmitError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(snapshot)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "validation service responded");
        interpret_response(status, &body)
    }
}
