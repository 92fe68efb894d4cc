//! finrisk-graph: SPARQL client for the financial-risk knowledge graph.
//!
//! This crate is the single read path into the triple store. It builds the
//! lookup, recommendation, and exploration queries, sends them over the
//! SPARQL protocol, and shapes the tabular results into entity objects.
//! Nothing here writes to the graph.

pub mod client;
pub mod flatten;
pub mod queries;
pub mod results;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use flatten::flatten;
pub use queries::{build_lookup_query, LookupKind, LookupQuery, EXPLORE_LIMIT};
pub use results::QueryRow;
