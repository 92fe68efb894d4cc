//! Configuration management for the financial-risk explorer.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (FINRISK prefix, `__` separator,
//!    e.g. `FINRISK__SPARQL__ENDPOINT`)
//! 2. Config file (`finrisk.toml`, or `<prefix>.toml`)
//! 3. Defaults

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::{FinriskError, Result};
use crate::types::PropertyMode;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sparql: SparqlSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub search: SearchSettings,
}

/// Where and how to reach the triple store.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlSettings {
    /// SPARQL query endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-query timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Search behaviour knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// How lookup rows that share an entity are flattened.
    #[serde(default)]
    pub property_mode: PropertyMode,

    /// Maximum recommendation queries in flight per search request.
    #[serde(default = "default_recommendation_concurrency")]
    pub recommendation_concurrency: usize,
}

fn default_endpoint() -> String {
    "http://localhost:3030/Financial_Risk_Management/sparql".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_recommendation_concurrency() -> usize {
    1
}

impl Default for SparqlSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            property_mode: PropertyMode::default(),
            recommendation_concurrency: default_recommendation_concurrency(),
        }
    }
}

impl SearchSettings {
    /// Effective fan-out limit; zero is treated as sequential.
    pub fn fan_out(&self) -> usize {
        self.recommendation_concurrency.max(1)
    }
}

impl AppConfig {
    /// Load configuration from `<file_prefix>.toml` (optional) and
    /// `FINRISK__*` environment variables.
    ///
    /// No validation happens here; callers apply their overrides first and
    /// then call [`AppConfig::validate`].
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("FINRISK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = cfg.try_deserialize()?;

        tracing::debug!(
            endpoint = %app.sparql.endpoint,
            bind = %app.server.bind,
            property_mode = ?app.search.property_mode,
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Reject settings that cannot work at runtime.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.sparql.endpoint.as_str();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(FinriskError::InvalidSetting {
                key: "sparql.endpoint".to_string(),
                reason: format!("expected an http(s) URL, got {endpoint:?}"),
            });
        }

        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| FinriskError::InvalidSetting {
                key: "server.bind".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}
