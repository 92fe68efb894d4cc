//! finrisk-web: Search front end for the financial-risk knowledge graph.
//!
//! Serves a search page plus two JSON endpoints: `/search` (entity lookup
//! with first-degree recommendations) and `/explore` (two-hop search).

pub mod error;
pub mod routes;
pub mod search;

pub use error::WebError;
pub use routes::{router, AppState};
pub use search::SearchService;
