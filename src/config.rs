//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Secrets (Alpaca API credentials) are referenced by env-var name in the
//! config and resolved at runtime via `std::env::var`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

use crate::alpaca::PAPER_API_URL;
use crate::simulator::runner::SimulationLimits;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub alpaca: AlpacaConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlpacaConfig {
    /// Trading API root, without the `/v2/account` path.
    pub base_url: String,
    /// Env var holding the API key id.
    pub key_env: String,
    /// Env var holding the API secret key.
    pub secret_env: String,
    pub timeout_secs: u64,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            base_url: PAPER_API_URL.to_string(),
            key_env: "ALPACA_KEY".to_string(),
            secret_env: "ALPACA_SECRET".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub timeout_secs: u64,
    pub max_response_bytes: usize,
    /// When set, the driver serves this value from a local mock account
    /// endpoint instead of calling Alpaca.
    pub mock_portfolio_value: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let limits = SimulationLimits::default();
        Self {
            timeout_secs: limits.timeout.as_secs(),
            max_response_bytes: limits.max_response_bytes,
            mock_portfolio_value: None,
        }
    }
}

impl SimulationConfig {
    pub fn limits(&self) -> SimulationLimits {
        SimulationLimits {
            timeout: Duration::from_secs(self.timeout_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every run fail immediately.
    pub fn validate(&self) -> Result<()> {
        if self.alpaca.timeout_secs == 0 {
            bail!("alpaca.timeout_secs must be greater than zero");
        }
        if self.simulation.timeout_secs == 0 {
            bail!("simulation.timeout_secs must be greater than zero");
        }
        if self.simulation.max_response_bytes == 0 {
            bail!("simulation.max_response_bytes must be greater than zero");
        }
        Ok(())
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}
