//! Fake OLS `select` API for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /ols4/api/select` with a scripted reply per `q`
//! value (status, raw body, latency) and records the query parameters of
//! every request it receives.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() {
//! use common::fake_ols_api::FakeOlsApi;
//!
//! let api = FakeOlsApi::start().await.unwrap();
//! api.respond("cancer", 200, common::select_body(&[])).await;
//!
//! // Point the client at api.select_url()
//! let url = api.select_url();
//! # }
//! ```

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

/// State shared between the router and test code.
struct ApiState {
    replies: HashMap<String, Reply>,
    /// Served for any `q` without a scripted reply.
    fallback: Reply,
    /// Query parameters of every request, in arrival order.
    requests: Vec<HashMap<String, String>>,
}

/// Handle to the running fake OLS server.
pub struct FakeOlsApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeOlsApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            replies: HashMap::new(),
            fallback: Reply {
                status: 200,
                body: crate::common::select_body(&[]),
                delay: Duration::ZERO,
            },
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/ols4/api/select", get(select))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full `select` URL to hand to the client config.
    pub fn select_url(&self) -> String {
        format!("http://{}/ols4/api/select", self.addr)
    }

    /// Answer requests for `q` immediately with `status` and `body`.
    pub async fn respond(&self, q: &str, status: u16, body: impl Into<String>) {
        self.respond_after(q, Duration::ZERO, status, body).await;
    }

    /// Answer requests for `q` after `delay`.
    pub async fn respond_after(&self, q: &str, delay: Duration, status: u16, body: impl Into<String>) {
        let reply = Reply { status, body: body.into(), delay };
        self.state.lock().await.replies.insert(q.to_string(), reply);
    }

    /// Query parameters of every request received so far.
    pub async fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().await.requests.clone()
    }

    /// Just the `q` parameter of every request received so far.
    pub async fn queries(&self) -> Vec<String> {
        self.requests()
            .await
            .into_iter()
            .map(|mut params| params.remove("q").unwrap_or_default())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn select(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> impl IntoResponse {
    let reply = {
        let mut state = state.lock().await;
        let q = params.get("q").cloned().unwrap_or_default();
        state.requests.push(params);
        state.replies.get(&q).cloned().unwrap_or_else(|| state.fallback.clone())
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], reply.body)
}
