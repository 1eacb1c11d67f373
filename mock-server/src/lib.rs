use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub use axum::http::StatusCode;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalcResponse {
    pub result: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Shared behaviour knobs and request accounting.
///
/// While `fail_next` is non-zero every request consumes one unit and is
/// answered with `fail_status`.
#[derive(Debug)]
pub struct MockState {
    fail_next: AtomicUsize,
    fail_status: StatusCode,
    respond_malformed: AtomicBool,
    hits: AtomicUsize,
    paths: RwLock<Vec<String>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            fail_next: AtomicUsize::new(0),
            fail_status: StatusCode::INTERNAL_SERVER_ERROR,
            respond_malformed: AtomicBool::new(false),
            hits: AtomicUsize::new(0),
            paths: RwLock::new(Vec::new()),
        }
    }
}

impl MockState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer the next `count` requests with `status`.
    pub fn failing(count: usize, status: StatusCode) -> Arc<Self> {
        Arc::new(Self {
            fail_next: AtomicUsize::new(count),
            fail_status: status,
            ..Self::default()
        })
    }

    /// Answer every request with 200 and a body that is not JSON.
    pub fn malformed() -> Arc<Self> {
        let state = Self::default();
        state.respond_malformed.store(true, Ordering::SeqCst);
        Arc::new(state)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn paths(&self) -> Vec<String> {
        self.paths.read().await.clone()
    }

    fn take_failure(&self) -> bool {
        self.fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

pub type Db = Arc<MockState>;

pub fn app() -> Router {
    app_with(MockState::new())
}

pub fn app_with(state: Db) -> Router {
    Router::new()
        .route("/operation/{op}/{a}/{b}", post(calculate))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, state: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(state)).await
}

fn compute(op: &str, a: f64, b: f64) -> Result<f64, String> {
    match op {
        "soma" => Ok(a + b),
        "subtracao" => Ok(a - b),
        "multiplicacao" => Ok(a * b),
        "divisao" if b == 0.0 => Err("division by zero".to_string()),
        "divisao" => Ok(a / b),
        other => Err(format!("unknown operation: {other}")),
    }
}

async fn calculate(
    State(state): State<Db>,
    uri: Uri,
    Path((op, a, b)): Path<(String, f64, f64)>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.paths.write().await.push(uri.path().to_string());

    if state.take_failure() {
        tracing::debug!(path = %uri.path(), status = %state.fail_status, "injected failure");
        return (state.fail_status, "injected failure").into_response();
    }
    if state.respond_malformed.load(Ordering::SeqCst) {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }

    match compute(&op, a, b) {
        Ok(result) => Json(CalcResponse { result }).into_response(),
        Err(error) => (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response(),
    }
}
