//! Scripted OpenMemory endpoint for tests: a local axum server that answers each
//! route with a configurable status and JSON body and records what it received.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// API route, as matched by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    AddMemory,
    SearchMemories,
    GetMemory,
    DeleteMemory,
    ListMemories,
    Health,
    Stats,
}

/// One request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub route: Route,
    pub method: String,
    /// Path as sent on the wire (still percent-encoded).
    pub path: String,
    /// Decoded query pairs in wire order.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct MockState {
    scripted: Mutex<HashMap<Route, (u16, Value)>>,
    fail_all: Mutex<Option<(u16, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockState {
    async fn reply(&self, route: Route, req: Request) -> (StatusCode, Json<Value>) {
        let (parts, body) = req.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .unwrap_or_default();
        let query = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();
        let path = parts.uri.path().to_string();
        let recorded = RecordedRequest {
            route,
            method: parts.method.to_string(),
            path: path.clone(),
            query,
            body: serde_json::from_slice(&bytes).ok(),
            authorization: parts
                .headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        };
        lock(&self.requests).push(recorded);

        let scripted = lock(&self.fail_all)
            .clone()
            .or_else(|| lock(&self.scripted).get(&route).cloned());
        let (status, body) = scripted.unwrap_or_else(|| (200, default_body(route, &path)));
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body))
    }
}

fn default_body(route: Route, path: &str) -> Value {
    match route {
        Route::AddMemory => json!({ "id": format!("mem-{}", uuid::Uuid::new_v4()) }),
        Route::SearchMemories => json!({ "results": [] }),
        Route::GetMemory => {
            let raw = path.rsplit('/').next().unwrap_or_default();
            let id = urlencoding::decode(raw)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            json!({ "id": id, "content": "", "metadata": {}, "tags": [] })
        }
        Route::DeleteMemory => json!({ "deleted": true }),
        Route::ListMemories => json!({ "memories": [] }),
        Route::Health => json!({ "status": "healthy" }),
        Route::Stats => json!({ "total_memories": 0 }),
    }
}

type Shared = State<Arc<MockState>>;

async fn handle_add(State(state): Shared, req: Request) -> (StatusCode, Json<Value>) {
    state.reply(Route::AddMemory, req).await
}

async fn handle_search(State(state): Shared, req: Request) -> (StatusCode, Json<Value>) {
    state.reply(Route::SearchMemories, req).await
}

async fn handle_get(State(state): Shared, req: Request) -> (StatusCode, Json<Value>) {
    state.reply(Route::GetMemory, req).await
}

async fn handle_delete(State(state): Shared, req: Request) -> (StatusCode, Json<Value>) {
    state.reply(Route::DeleteMemory, req).await
}

async fn handle_list(State(state): Shared, req: Request) -> (StatusCode, Json<Value>) {
    state.reply(Route::ListMemories, req).await
}

async fn handle_health(State(state): Shared, req: Request) -> (StatusCode, Json<Value>) {
    state.reply(Route::Health, req).await
}

async fn handle_stats(State(state): Shared, req: Request) -> (StatusCode, Json<Value>) {
    state.reply(Route::Stats, req).await
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/memories", get(handle_list).post(handle_add))
        .route("/memories/search", get(handle_search))
        .route("/memories/:id", get(handle_get).delete(handle_delete))
        .route("/health", get(handle_health))
        .route("/stats", get(handle_stats))
        .with_state(state)
}

/// Running mock endpoint; shut down on drop.
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Binds `127.0.0.1:0` and serves on a task of the current tokio runtime.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = router(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL, without a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Scripts the status and JSON body of one route.
    pub fn respond(&self, route: Route, status: u16, body: Value) {
        lock(&self.state.scripted).insert(route, (status, body));
    }

    /// Makes every route answer with `status` and `body`, overriding `respond`.
    pub fn fail_all(&self, status: u16, body: Value) {
        *lock(&self.state.fail_all) = Some((status, body));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
