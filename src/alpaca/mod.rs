//! Alpaca brokerage integration.
//!
//! Defines the `AccountApi` trait and the account types it returns, with:
//! - `client` — the live HTTPS client (paper or live trading API)
//! - `mock` — a local account endpoint for offline simulation and tests
//!
//! Auth: `APCA-API-KEY-ID` / `APCA-API-SECRET-KEY` headers on every request.

pub mod client;
pub mod mock;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::FunctionError;

pub const PAPER_API_URL: &str = "https://paper-api.alpaca.markets";
pub const ACCOUNT_PATH: &str = "/v2/account";
pub const KEY_HEADER: &str = "APCA-API-KEY-ID";
pub const SECRET_HEADER: &str = "APCA-API-SECRET-KEY";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A validated Alpaca key pair. Both halves are non-empty.
pub struct AlpacaCredentials {
    key: SecretString,
    secret: SecretString,
}

impl AlpacaCredentials {
    /// Build a credential pair, rejecting empty values.
    pub fn new(key: &str, secret: &str) -> Result<Self, FunctionError> {
        if key.is_empty() || secret.is_empty() {
            return Err(FunctionError::Config(
                "Alpaca API key and secret are required".to_string(),
            ));
        }
        Ok(Self {
            key: SecretString::new(key.to_string()),
            secret: SecretString::new(secret.to_string()),
        })
    }

    pub fn key(&self) -> &str {
        self.key.expose_secret()
    }

    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl fmt::Debug for AlpacaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlpacaCredentials")
            .field("key", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Account types
// ---------------------------------------------------------------------------

/// A monetary amount as Alpaca sends it.
///
/// The trading API serializes amounts as JSON strings (`"100000.00"`),
/// but plain numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Text(s) => write!(f, "{s}"),
            Amount::Number(n) => write!(f, "{n}"),
        }
    }
}

impl Amount {
    /// Parse into an exact decimal. `NaN`, infinities, digit separators
    /// and anything that cannot be held without rounding are rejected.
    pub fn to_decimal(&self) -> Result<Decimal, FunctionError> {
        let raw = self.to_string();
        let invalid = |reason: &str| {
            FunctionError::Parse(format!("Invalid portfolio_value {raw:?}: {reason}"))
        };

        let trimmed = raw.trim();
        if trimmed.contains('_') {
            return Err(invalid("digit separators are not allowed"));
        }

        let (mantissa, exponent) = match trimmed.split_once(['e', 'E']) {
            Some((m, e)) => {
                let exponent = e.parse::<i64>().map_err(|e| invalid(&e.to_string()))?;
                (m, exponent)
            }
            None => (trimmed, 0),
        };
        let mantissa = Decimal::from_str_exact(mantissa).map_err(|e| invalid(&e.to_string()))?;

        shift_exact(mantissa, exponent).ok_or_else(|| invalid("exceeds 28 digits of precision"))
    }
}

/// `value × 10^exponent` without rounding, or `None` if the result does
/// not fit a `Decimal` exactly.
fn shift_exact(value: Decimal, exponent: i64) -> Option<Decimal> {
    let scale = i64::from(value.scale()).checked_sub(exponent)?;
    if scale >= 0 {
        let scale = u32::try_from(scale).ok()?;
        return Decimal::try_from_i128_with_scale(value.mantissa(), scale).ok();
    }

    let mut shifted = Decimal::try_from_i128_with_scale(value.mantissa(), 0).ok()?;
    for _ in 0..-scale {
        shifted = shifted.checked_mul(Decimal::TEN)?;
    }
    Some(shifted)
}

/// Subset of the `GET /v2/account` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub portfolio_value: Option<Amount>,
}

impl AccountInfo {
    /// Convert a decoded response body. Only JSON objects are accepted;
    /// serde would otherwise fill the fields of an array by position.
    pub fn from_json(body: serde_json::Value) -> Result<Self, FunctionError> {
        if !body.is_object() {
            return Err(FunctionError::Parse(format!(
                "Alpaca account response is not a JSON object: {body}"
            )));
        }
        serde_json::from_value(body).map_err(|e| {
            FunctionError::Parse(format!("Failed to parse Alpaca account response: {e}"))
        })
    }

    /// The portfolio value, or a parse error if the field was absent.
    pub fn portfolio_value(&self) -> Result<&Amount, FunctionError> {
        self.portfolio_value.as_ref().ok_or_else(|| {
            FunctionError::Parse("Alpaca account response has no portfolio_value".to_string())
        })
    }
}

// ---------------------------------------------------------------------------
// API trait
// ---------------------------------------------------------------------------

/// Abstraction over the Alpaca account endpoint.
///
/// One call per invocation; implementors must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Fetch the account summary for the given key pair.
    async fn fetch_account(
        &self,
        credentials: &AlpacaCredentials,
    ) -> Result<AccountInfo, FunctionError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
