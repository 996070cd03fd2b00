//! Simulation driver.
//!
//! Wires configuration to a live or mocked Alpaca endpoint, runs the
//! balance request through the harness and renders the outcome for the
//! operator. The binary is a thin wrapper around these two calls.

use anyhow::{bail, Result};
use std::io::Write;
use std::time::Duration;
use tracing::info;

use crate::alpaca::client::AlpacaClient;
use crate::alpaca::mock::{MockAccount, MockAccountServer};
use crate::config::AppConfig;
use crate::functions::balance::AlpacaBalanceFunction;
use crate::functions::encoding::decode_result;
use crate::simulator::runner::{simulate_script, SimulationOutcome};
use crate::simulator::RequestConfig;
use crate::types::{DecodedValue, ReturnType};

/// Simulate `request` against Alpaca, or against a local mock endpoint
/// when `simulation.mock_portfolio_value` is set.
///
/// Errors only for driver failures (client build, mock bind). Function
/// failures are reported in the outcome.
pub async fn run(cfg: &AppConfig, request: &RequestConfig) -> Result<SimulationOutcome> {
    // Keep the mock alive until the simulation is done.
    let mock = match &cfg.simulation.mock_portfolio_value {
        Some(value) => {
            Some(MockAccountServer::spawn(MockAccount::with_portfolio_value(value)).await?)
        }
        None => None,
    };
    let base_url = match &mock {
        Some(server) => server.base_url().to_string(),
        None => cfg.alpaca.base_url.clone(),
    };

    info!(
        request_id = %request.id,
        endpoint = %base_url,
        mocked = mock.is_some(),
        "Running Alpaca mint simulation"
    );

    let client = AlpacaClient::new(base_url, Duration::from_secs(cfg.alpaca.timeout_secs))?;
    let function = AlpacaBalanceFunction::new(client);
    Ok(simulate_script(request, &function, &cfg.simulation.limits()).await)
}

/// Print captured output and the decoded result to `out`.
///
/// Returns `Err` carrying the function's error string if the run failed,
/// so the process exits non-zero.
pub fn report<W: Write>(
    outcome: &SimulationOutcome,
    return_type: ReturnType,
    out: &mut W,
) -> Result<Option<DecodedValue>> {
    writeln!(out, "{}\n", outcome.captured_terminal_output)?;

    let result = match &outcome.response_hex {
        Some(response_hex) => {
            let value = decode_result(return_type, response_hex)?;
            writeln!(out, "Result: {value}")?;
            Some(value)
        }
        None => None,
    };

    if let Some(err) = &outcome.error_string {
        bail!("{err}");
    }

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
