//! Live Alpaca trading API client.
//!
//! API docs: https://docs.alpaca.markets/reference/getaccount-1
//! Paper base: `https://paper-api.alpaca.markets`
//! Live base: `https://api.alpaca.markets`
//!
//! Single best-effort GET per call. No retry, no backoff: a transient
//! failure is terminal for that invocation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::{AccountApi, AccountInfo, AlpacaCredentials, ACCOUNT_PATH, KEY_HEADER, SECRET_HEADER};
use crate::config::AlpacaConfig;
use crate::types::FunctionError;

pub struct AlpacaClient {
    http: Client,
    base_url: String,
}

impl AlpacaClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("alpaca-mint/0.1.0")
            .build()
            .context("Failed to build Alpaca HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(cfg: &AlpacaConfig) -> Result<Self> {
        Self::new(cfg.base_url.clone(), Duration::from_secs(cfg.timeout_secs))
    }

    /// Full URL of the account endpoint.
    pub fn account_url(&self) -> String {
        format!("{}{ACCOUNT_PATH}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AccountApi for AlpacaClient {
    async fn fetch_account(
        &self,
        credentials: &AlpacaCredentials,
    ) -> Result<AccountInfo, FunctionError> {
        let url = self.account_url();
        debug!(url = %url, "Fetching Alpaca account");

        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(KEY_HEADER, credentials.key())
            .header(SECRET_HEADER, credentials.secret())
            .send()
            .await
            .map_err(|e| FunctionError::Network(format!("Alpaca request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "Alpaca account request rejected");
            return Err(FunctionError::Network(format!(
                "Alpaca API error: {status} {body}"
            )));
        }

        let body: serde_json::Value = resp.json().await.map_err(|e| {
            FunctionError::Parse(format!("Failed to parse Alpaca account response: {e}"))
        })?;
        AccountInfo::from_json(body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
