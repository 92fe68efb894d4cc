//! finrisk-core: Shared types, configuration, and error handling for the
//! financial-risk knowledge graph explorer.
//!
//! This crate provides the foundations used by the graph client and the web front end:
//! - Result types returned by the search endpoints
//! - The ontology vocabulary and the keyword-to-class alias table
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod ontology;
pub mod types;

pub use config::AppConfig;
pub use error::FinriskError;
pub use types::{
    EntityResult, ExploreResult, PropertyMode, PropertyValue, RelatedEntity, SearchTerm,
};
