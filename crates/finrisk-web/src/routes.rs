//! HTTP routes for the search front end.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use finrisk_core::{EntityResult, ExploreResult, SearchTerm};

use crate::error::{Result, WebError};
use crate::search::SearchService;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// State shared by all handlers.
pub struct AppState {
    pub search: SearchService,
}

/// Build the axum router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .route("/explore", get(explore))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw query-string pairs in request order.
///
/// Decoding into pairs never rejects: repeated keys are kept and bad
/// percent-escapes decode lossily, so every request reaches the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct SearchParams(Vec<(String, String)>);

impl SearchParams {
    /// The first `q` value, if any.
    pub fn q(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.as_str())
    }

    fn term(&self) -> Result<SearchTerm> {
        SearchTerm::parse(self.q()).ok_or(WebError::MissingTerm)
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// -- /search --

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<EntityResult>>> {
    let term = params.term()?;
    Ok(Json(state.search.search(&term).await?))
}

// -- /explore --

async fn explore(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ExploreResult>>> {
    let term = params.term()?;
    Ok(Json(state.search.explore(&term).await?))
}
