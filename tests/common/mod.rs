//! In-process stand-in for the answering service.
//!
//! `/ask` behaves according to the decoded question:
//!
//! | Question | Response |
//! |----------|----------|
//! | `boom` | 500 |
//! | `garbled` | 200 with a non-JSON body |
//! | `no sources` | `{"answer": ...}` without `sources` |
//! | `slow` | answers after 3 seconds |
//! | anything else | `{"answer": "Answer to <q>", "sources": ["chapter1.txt", "chapter2.txt"]}` |

#![allow(dead_code)]

use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct StubState {
    raw_queries: Arc<Mutex<Vec<String>>>,
}

pub struct StubService {
    pub addr: SocketAddr,
    state: StubState,
}

impl StubService {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Raw (still percent-encoded) query strings seen by `/ask`.
    pub fn raw_queries(&self) -> Vec<String> {
        self.state.raw_queries.lock().unwrap().clone()
    }

    pub fn ask_count(&self) -> usize {
        self.state.raw_queries.lock().unwrap().len()
    }
}

async fn handle_ask(
    State(state): State<StubState>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state
        .raw_queries
        .lock()
        .unwrap()
        .push(raw.unwrap_or_default());

    let q = params.get("q").cloned().unwrap_or_default();
    match q.as_str() {
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "kaboom").into_response(),
        "garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "no sources" => Json(json!({ "answer": "An answer without sources" })).into_response(),
        "slow" => {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            Json(json!({ "answer": "finally", "sources": [] })).into_response()
        }
        _ => Json(json!({
            "answer": format!("Answer to {}\nSecond line", q),
            "sources": ["chapter1.txt", "chapter2.txt"],
        }))
        .into_response(),
    }
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "timestamp": "now" }))
}

async fn handle_root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Physical AI Textbook RAG API",
        "status": "running",
        "documents": 5,
        "version": "1.0",
        "endpoints": ["/health", "/ask?q=question", "/debug"],
    }))
}

async fn handle_debug() -> Json<serde_json::Value> {
    Json(json!({
        "documents_count": 5,
        "sample_document": "Physical AI is...",
        "files_count": 5,
        "vectorizer": "loaded",
        "X_matrix": "loaded",
    }))
}

pub async fn spawn_stub() -> StubService {
    let state = StubState::default();
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/ask", get(handle_ask))
        .route("/health", get(handle_health))
        .route("/debug", get(handle_debug))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubService { addr, state }
}

/// An address nothing listens on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
