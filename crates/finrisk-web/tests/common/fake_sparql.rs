//! Fake SPARQL endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. `POST /sparql` accepts a form-encoded `query` and answers with
//! the first registered rule whose needle occurs in the query text. Queries
//! with no matching rule get an empty result set (`ASK` queries get `true`).
//! Every received query is recorded for assertions.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// What the fake answers when a rule matches.
#[derive(Clone)]
enum Reply {
    Rows(Vec<Value>),
    Status(u16, String),
    Raw(String),
}

#[derive(Default)]
struct StoreState {
    rules: Vec<(String, Reply)>,
    queries: Vec<String>,
}

#[derive(Deserialize)]
struct QueryForm {
    query: String,
}

/// Handle to the running fake SPARQL endpoint.
pub struct FakeSparqlStore {
    addr: SocketAddr,
    state: Arc<Mutex<StoreState>>,
}

impl FakeSparqlStore {
    /// Start the fake endpoint on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(StoreState::default()));

        let app = Router::new()
            .route("/sparql", post(answer))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Query endpoint URL (e.g. `http://127.0.0.1:PORT/sparql`).
    pub fn endpoint(&self) -> String {
        format!("http://{}/sparql", self.addr)
    }

    /// Answer queries containing `needle` with these result rows.
    pub async fn on_query(&self, needle: &str, rows: Vec<Value>) {
        self.push(needle, Reply::Rows(rows)).await;
    }

    /// Answer queries containing `needle` with an HTTP error.
    pub async fn fail_query(&self, needle: &str, status: u16, body: &str) {
        self.push(needle, Reply::Status(status, body.to_string()))
            .await;
    }

    /// Answer queries containing `needle` with a raw 200 body.
    pub async fn raw_reply(&self, needle: &str, body: &str) {
        self.push(needle, Reply::Raw(body.to_string())).await;
    }

    /// All queries received so far, in arrival order.
    pub async fn queries(&self) -> Vec<String> {
        self.state.lock().await.queries.clone()
    }

    async fn push(&self, needle: &str, reply: Reply) {
        self.state
            .lock()
            .await
            .rules
            .push((needle.to_string(), reply));
    }
}

async fn answer(
    State(state): State<Arc<Mutex<StoreState>>>,
    Form(form): Form<QueryForm>,
) -> Response {
    let reply = {
        let mut state = state.lock().await;
        state.queries.push(form.query.clone());
        state
            .rules
            .iter()
            .find(|(needle, _)| form.query.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
    };

    match reply {
        Some(Reply::Rows(rows)) => axum::Json(select_body(rows)).into_response(),
        Some(Reply::Status(code, body)) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response(),
        Some(Reply::Raw(body)) => (StatusCode::OK, body).into_response(),
        None if form.query.trim_start().starts_with("ASK") => {
            axum::Json(json!({"head": {}, "boolean": true})).into_response()
        }
        None => axum::Json(select_body(vec![])).into_response(),
    }
}

fn select_body(rows: Vec<Value>) -> Value {
    json!({
        "head": {"vars": []},
        "results": {"bindings": rows}
    })
}
