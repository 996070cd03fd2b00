//! alpaca-mint — simulation driver.
//!
//! Loads configuration and credentials, builds the Alpaca balance request,
//! runs it through the local simulation harness and prints the decoded
//! result. Exits non-zero if the function or the driver fails.

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use alpaca_mint::config::AppConfig;
use alpaca_mint::driver;
use alpaca_mint::simulator::RequestConfig;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const CONFIG_PATH_ENV: &str = "ALPACA_MINT_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = if Path::new(&config_path).exists() {
        AppConfig::load(&config_path)?
    } else {
        warn!(path = %config_path, "Config file not found, using defaults");
        AppConfig::default()
    };

    let request = RequestConfig::alpaca_mint(&cfg)?;
    let outcome = driver::run(&cfg, &request).await?;
    driver::report(&outcome, request.expected_return_type, &mut std::io::stdout())?;

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("alpaca_mint=info"));

    let json_logging = std::env::var("ALPACA_MINT_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
