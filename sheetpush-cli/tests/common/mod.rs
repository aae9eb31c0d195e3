//! In-process GraphQL endpoint shared by the integration tests
//!
//! The response depends on `variables.id`:
//! - `missing` answers 200 with GraphQL errors and null data
//! - `boom` answers 500 with a plain-text body
//! - `slow` sleeps before answering
//! - ids listed in `failing_ids` answer 200 with a "Processo not found" error
//! - anything else succeeds and echoes the variables back

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// What the server saw for one request
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub auth_token: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct ServerState {
    pub failing_ids: Vec<String>,
    pub received: Mutex<Vec<ReceivedRequest>>,
}

impl ServerState {
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

async fn graphql(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.received.lock().unwrap().push(ReceivedRequest {
        auth_token: header("auth_token"),
        content_type: header("content-type"),
        body: body.clone(),
    });

    let variables = body["variables"].clone();
    let id = match &variables["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match id.as_str() {
        "missing" => (
            StatusCode::OK,
            Json(json!({ "data": null, "errors": [{ "message": "Processo missing does not exist" }] })),
        )
            .into_response(),
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "internal failure").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "data": { "updateProcesso": variables } })).into_response()
        }
        _ if state.failing_ids.contains(&id) => (
            StatusCode::OK,
            Json(json!({ "errors": [{ "message": "Processo not found" }] })),
        )
            .into_response(),
        _ => Json(json!({ "data": { "updateProcesso": variables } })).into_response(),
    }
}

/// Start the server on a free local port; returns its GraphQL URL
pub async fn start_server(failing_ids: &[&str]) -> (String, Arc<ServerState>) {
    let state = Arc::new(ServerState {
        failing_ids: failing_ids.iter().map(|s| s.to_string()).collect(),
        received: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/graphql", post(graphql))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/graphql"), state)
}
