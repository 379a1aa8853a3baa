//! Fake Kibana / Elasticsearch HTTP API for integration tests.
//!
//! Spins up a minimal `axum` server on a random TCP port bound to 127.0.0.1.
//! Every endpoint logscope may call is served from one listener, so the same
//! base URL works as a dashboard URL and as a direct search host:
//!
//! - `GET  /api/status`
//! - `POST /internal/bsearch`
//! - `POST /api/console/proxy?path=<index>/_search&method=POST`
//! - `POST /<index>/_search`
//!
//! Each endpoint answers with a configurable [`Reply`]. Every request is
//! recorded so tests can assert on order, headers and bodies.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeKibanaApi::start().await.unwrap();
//! api.set_bsearch(Reply::json(bsearch_envelope(es_response(3, TotalShape::Bare, sample_hits(3))))).await;
//! let config = config_for(Some(&api.base_url()), None);
//! ```

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// What an endpoint answers with.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    /// 200 with a JSON body.
    pub fn json(value: Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
        }
    }

    /// Any status with a raw body.
    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self::raw(404, "Not Found")
    }
}

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, still percent-encoded.
    pub path: String,
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

struct ApiState {
    status: Reply,
    bsearch: Reply,
    proxy: Reply,
    search: Reply,
    requests: Vec<RecordedRequest>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            status: Reply::json(super::fixtures::kibana_status_doc()),
            bsearch: Reply::not_found(),
            proxy: Reply::not_found(),
            search: Reply::not_found(),
            requests: Vec::new(),
        }
    }
}

/// Handle to the running fake API server.
pub struct FakeKibanaApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeKibanaApi {
    /// Start the server on a random port. By default `/api/status` answers
    /// 200 and every search endpoint answers 404.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new().fallback(handle).with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn set_status(&self, reply: Reply) {
        self.state.lock().await.status = reply;
    }

    pub async fn set_bsearch(&self, reply: Reply) {
        self.state.lock().await.bsearch = reply;
    }

    pub async fn set_proxy(&self, reply: Reply) {
        self.state.lock().await.proxy = reply;
    }

    pub async fn set_search(&self, reply: Reply) {
        self.state.lock().await.search = reply;
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Paths (without query string) received so far, in arrival order.
    pub async fn paths(&self) -> Vec<String> {
        self.requests()
            .await
            .into_iter()
            .map(|r| r.path.split('?').next().unwrap_or_default().to_string())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn handle(
    State(state): State<Arc<Mutex<ApiState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let mut state = state.lock().await;

    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| path.clone()),
        headers: headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: serde_json::from_slice(&body).ok(),
    });

    let reply = match (method, path.as_str()) {
        (Method::GET, "/api/status") => state.status.clone(),
        (Method::POST, "/internal/bsearch") => state.bsearch.clone(),
        (Method::POST, "/api/console/proxy") => state.proxy.clone(),
        (Method::POST, p) if p.ends_with("/_search") => state.search.clone(),
        _ => Reply::not_found(),
    };

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], reply.body).into_response()
}
