//! Row builders and app wiring shared by the harnesses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use finrisk_core::config::SearchSettings;
use finrisk_core::PropertyMode;
use finrisk_graph::{GraphClient, GraphConfig};
use finrisk_web::{router, AppState, SearchService};

pub const EX: &str = "http://www.semanticweb.org/financial_risk#";

/// Needle matching the typed (keyword) lookup query.
pub const TYPED_LOOKUP: &str = "rdfs:subClassOf*";
/// Needle matching the fuzzy lookup query.
pub const FUZZY_LOOKUP: &str = "CONTAINS(LCASE(STR(?type))";
/// Needle matching any recommendation query.
pub const RECOMMENDATIONS: &str = "?relation ?related";
/// Needle matching the exploration query.
pub const EXPLORE: &str = "?intermediate ?p2 ?entity";

pub fn ex(local: &str) -> String {
    format!("{EX}{local}")
}

/// A lookup row, optionally carrying one literal property.
pub fn entity_row(entity: &str, name: &str, ty: &str, property: Option<(&str, &str)>) -> Value {
    let mut row = json!({
        "entity": {"type": "uri", "value": ex(entity)},
        "name": {"type": "literal", "value": name},
        "type": {"type": "uri", "value": ex(ty)},
    });
    if let Some((p, v)) = property {
        row["property"] = json!({"type": "uri", "value": ex(p)});
        row["value"] = json!({"type": "literal", "value": v});
    }
    row
}

/// A recommendation row.
pub fn related_row(name: &str, relation: &str, related: &str) -> Value {
    json!({
        "related": {"type": "uri", "value": ex(related)},
        "name": {"type": "literal", "value": name},
        "relation": {"type": "uri", "value": ex(relation)},
    })
}

/// An exploration row.
pub fn explore_row(entity: &str, name: &str, ty: &str) -> Value {
    json!({
        "entity": {"type": "uri", "value": ex(entity)},
        "name": {"type": "literal", "value": name},
        "type": {"type": "uri", "value": ex(ty)},
    })
}

/// Router wired to `endpoint` with the given flattening mode and fan-out.
pub fn app(endpoint: &str, mode: PropertyMode, concurrency: usize) -> Router {
    let graph = GraphClient::new(&GraphConfig {
        endpoint: endpoint.to_string(),
        timeout: Some(std::time::Duration::from_secs(5)),
    })
    .unwrap();
    let settings = SearchSettings {
        property_mode: mode,
        recommendation_concurrency: concurrency,
    };
    router(Arc::new(AppState {
        search: SearchService::new(graph, settings),
    }))
}

/// Issue a GET and return the status plus the decoded JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
