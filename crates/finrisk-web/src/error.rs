//! Error types for the finrisk-web crate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("No search term provided")]
    MissingTerm,

    #[error("{0}")]
    Graph(#[from] finrisk_graph::GraphError),

    #[error("Recommendation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, WebError>;

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl WebError {
    /// Missing input keeps the historical 200 status; store failures are 502.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingTerm => StatusCode::OK,
            Self::Graph(_) => StatusCode::BAD_GATEWAY,
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
