//! Mock Alpaca account endpoint.
//!
//! A small Axum server answering `GET /v2/account` with a canned body.
//! The simulation driver points the live client at it when a mock balance
//! is configured, and the tests use it as a real HTTP counterpart.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::{ACCOUNT_PATH, KEY_HEADER, SECRET_HEADER};

/// Canned account state served by the mock endpoint.
pub struct MockAccount {
    body: Value,
    credentials: Option<(String, String)>,
    hits: AtomicUsize,
}

impl MockAccount {
    /// An active USD account with the given portfolio value (sent as a
    /// string, like the real API).
    pub fn with_portfolio_value(value: &str) -> Self {
        Self::with_body(json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "account_number": "PA0MOCK",
            "status": "ACTIVE",
            "currency": "USD",
            "portfolio_value": value,
        }))
    }

    /// Serve an arbitrary JSON body.
    pub fn with_body(body: Value) -> Self {
        Self {
            body,
            credentials: None,
            hits: AtomicUsize::new(0),
        }
    }

    /// Answer 403 unless both auth headers match.
    pub fn require_credentials(mut self, key: &str, secret: &str) -> Self {
        self.credentials = Some((key.to_string(), secret.to_string()));
        self
    }

    /// Number of account requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let Some((key, secret)) = &self.credentials else {
            return true;
        };
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        header(KEY_HEADER) == Some(key.as_str()) && header(SECRET_HEADER) == Some(secret.as_str())
    }
}

/// Build the mock router.
pub fn build_router(account: Arc<MockAccount>) -> Router {
    Router::new()
        .route(ACCOUNT_PATH, get(get_account))
        .with_state(account)
}

async fn get_account(
    State(account): State<Arc<MockAccount>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    account.hits.fetch_add(1, Ordering::SeqCst);

    if !account.authorized(&headers) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "forbidden." })),
        );
    }

    (StatusCode::OK, Json(account.body.clone()))
}

/// A running mock endpoint bound to an ephemeral localhost port.
///
/// The server task is aborted on drop.
pub struct MockAccountServer {
    base_url: String,
    account: Arc<MockAccount>,
    task: JoinHandle<()>,
}

impl MockAccountServer {
    pub async fn spawn(account: MockAccount) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .context("Failed to bind mock Alpaca endpoint")?;
        let addr = listener
            .local_addr()
            .context("Failed to read mock endpoint address")?;

        let account = Arc::new(account);
        let app = build_router(account.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!(error = %e, "Mock Alpaca endpoint stopped");
            }
        });

        info!(%addr, "Mock Alpaca account endpoint listening");

        Ok(Self {
            base_url: format!("http://{addr}"),
            account,
            task,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn hits(&self) -> usize {
        self.account.hits()
    }
}

impl Drop for MockAccountServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
