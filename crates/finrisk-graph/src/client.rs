//! SPARQL endpoint connection and shared graph client.

use std::time::Duration;

use finrisk_core::config::SparqlSettings;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::results::{QueryRow, SparqlResults};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Longest slice of an error body kept in [`GraphError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("SPARQL client setup error: {0}")]
    Connection(String),

    #[error("SPARQL request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SPARQL endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode SPARQL results: {0}")]
    Decode(String),

    #[error("Unexpected response shape: row is missing binding `{variable}`")]
    UnexpectedShape { variable: String },

    #[error("Invalid entity IRI: {value}")]
    InvalidIri { value: String },
}

/// Configuration for reaching a SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        SparqlSettings::default().into()
    }
}

impl From<SparqlSettings> for GraphConfig {
    fn from(settings: SparqlSettings) -> Self {
        Self {
            endpoint: settings.endpoint,
            timeout: settings.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Shared SPARQL client for the knowledge graph.
///
/// Every query is its own HTTP round trip; there is no session state.
/// Clone is cheap (inner Arc).
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct AskResult {
    boolean: bool,
}

impl GraphClient {
    /// Build a client for the configured endpoint. No request is sent.
    pub fn new(config: &GraphConfig) -> Result<Self, GraphError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The endpoint URL queries are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check that the endpoint answers a trivial `ASK` query.
    pub async fn ping(&self) -> Result<bool, GraphError> {
        self.ask("ASK {}").await
    }

    /// Execute an ASK query.
    pub async fn ask(&self, sparql: &str) -> Result<bool, GraphError> {
        let body = self.execute(sparql).await?;
        let ask: AskResult =
            serde_json::from_slice(&body).map_err(|e| GraphError::Decode(e.to_string()))?;
        Ok(ask.boolean)
    }

    /// Execute a SELECT query and collect all result rows.
    pub async fn query_rows(&self, sparql: &str) -> Result<Vec<QueryRow>, GraphError> {
        let body = self.execute(sparql).await?;
        let results: SparqlResults =
            serde_json::from_slice(&body).map_err(|e| GraphError::Decode(e.to_string()))?;
        Ok(results.results.bindings)
    }

    /// POST a query using the SPARQL 1.1 protocol and return the raw body.
    async fn execute(&self, sparql: &str) -> Result<Vec<u8>, GraphError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", sparql)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(GraphError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
