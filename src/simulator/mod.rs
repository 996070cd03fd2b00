//! Request descriptors for the remote execution host.
//!
//! A `RequestConfig` names the function to run, carries its secrets and
//! args, and states the return type the on-chain consumer expects. The
//! `runner` submodule executes one locally.

pub mod runner;

use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::functions::balance::{FUNCTION_NAME, KEY_SECRET, SECRET_SECRET};
use crate::functions::ExecutionContext;
use crate::types::{Location, ReturnType};

/// Everything the host needs to run one function request.
#[derive(Debug)]
pub struct RequestConfig {
    pub id: Uuid,
    /// Name of the function to execute.
    pub source: String,
    pub code_location: Location,
    pub secrets: HashMap<String, SecretString>,
    pub secrets_location: Location,
    pub args: Vec<String>,
    pub expected_return_type: ReturnType,
}

impl RequestConfig {
    /// An inline request with no secrets, no args and a `uint256` result.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            code_location: Location::Inline,
            secrets: HashMap::new(),
            secrets_location: Location::DonHosted,
            args: Vec::new(),
            expected_return_type: ReturnType::Uint256,
        }
    }

    /// The Alpaca balance request, with credentials read from the env vars
    /// named in `cfg`. An unset variable is an error.
    pub fn alpaca_mint(cfg: &AppConfig) -> Result<Self> {
        let key = AppConfig::resolve_env(&cfg.alpaca.key_env)?;
        let secret = AppConfig::resolve_env(&cfg.alpaca.secret_env)?;

        let request = Self::new(FUNCTION_NAME)
            .with_secret(KEY_SECRET, key)
            .with_secret(SECRET_SECRET, secret);

        debug!(
            request_id = %request.id,
            source = %request.source,
            return_type = %request.expected_return_type,
            "Built Alpaca mint request"
        );
        Ok(request)
    }

    pub fn with_secret(mut self, name: &str, value: String) -> Self {
        self.secrets.insert(name.to_string(), SecretString::new(value));
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.expected_return_type = return_type;
        self
    }

    /// Sorted secret names (values are never exposed).
    pub fn secret_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.secrets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// A fresh execution context carrying this request's secrets and args.
    pub fn execution_context(&self) -> ExecutionContext {
        let secrets = self
            .secrets
            .iter()
            .map(|(k, v)| (k.clone(), SecretString::new(v.expose_secret().clone())))
            .collect();
        ExecutionContext::new(secrets, self.args.clone())
    }
}
