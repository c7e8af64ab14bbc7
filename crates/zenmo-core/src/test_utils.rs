//! Test utilities for zenmo-core
//!
//! This module provides a mock ZenMoney API server that serves a canned
//! diff response and records every request it receives, for use in
//! development and integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::sync::oneshot;

/// A request captured by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// The JSON body posted to the diff endpoint.
    pub body: Value,
    /// The raw Authorization header, if the client sent one.
    pub authorization: Option<String>,
}

#[derive(Clone)]
struct MockState {
    diff: Arc<Value>,
    status: StatusCode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock ZenMoney API server for testing and development
pub struct MockZenMoneyServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockZenMoneyServer {
    /// Start the mock server on an available port, answering every diff
    /// request with the given response body.
    pub async fn start(diff: Value) -> Self {
        Self::start_inner(diff, StatusCode::OK).await
    }

    /// Start a mock server that answers every diff request with the given
    /// HTTP status and an empty body.
    pub async fn start_with_status(status: u16) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        Self::start_inner(Value::Null, status).await
    }

    async fn start_inner(diff: Value, status: StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            diff: Arc::new(diff),
            status,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/v8/diff/", post(handle_diff))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            requests,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// All requests the server has received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockZenMoneyServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// ZenMoney diff endpoint
async fn handle_diff(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    state.requests.lock().unwrap().push(RecordedRequest {
        body,
        authorization,
    });

    if state.status != StatusCode::OK {
        return state.status.into_response();
    }

    Json(state.diff.as_ref().clone()).into_response()
}
