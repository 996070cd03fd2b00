//! Full request -> simulate -> decode runs.

use alloy_primitives::U256;
use serde_json::json;
use std::str::FromStr;
use std::time::Duration;

use alpaca_mint::alpaca::client::AlpacaClient;
use alpaca_mint::alpaca::mock::{MockAccount, MockAccountServer};
use alpaca_mint::functions::balance::{AlpacaBalanceFunction, FUNCTION_NAME, KEY_SECRET, SECRET_SECRET};
use alpaca_mint::functions::encoding::decode_result;
use alpaca_mint::simulator::runner::{simulate_script, SimulationLimits, SimulationOutcome};
use alpaca_mint::simulator::RequestConfig;

const KEY: &str = "PKTEST";
const SECRET: &str = "SKTEST";

fn request(key: &str, secret: &str) -> RequestConfig {
    RequestConfig::new(FUNCTION_NAME)
        .with_secret(KEY_SECRET, key.to_string())
        .with_secret(SECRET_SECRET, secret.to_string())
}

async fn run(server: &MockAccountServer, req: &RequestConfig) -> SimulationOutcome {
    let client = AlpacaClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
    let function = AlpacaBalanceFunction::new(client);
    simulate_script(req, &function, &SimulationLimits::default()).await
}

fn decoded(outcome: &SimulationOutcome, req: &RequestConfig) -> U256 {
    let hex = outcome.response_hex.as_deref().expect("simulation should succeed");
    decode_result(req.expected_return_type, hex)
        .unwrap()
        .as_u256()
        .unwrap()
}

#[tokio::test]
async fn test_end_to_end_balance() {
    let server = MockAccountServer::spawn(
        MockAccount::with_portfolio_value("100000.00").require_credentials(KEY, SECRET),
    )
    .await
    .unwrap();
    let req = request(KEY, SECRET);

    let outcome = run(&server, &req).await;

    assert!(outcome.error_string.is_none(), "{:?}", outcome.error_string);
    assert_eq!(outcome.captured_terminal_output, "Alpaca Portfolio Balance: $100000.00");
    assert_eq!(decoded(&outcome, &req), U256::from_str("100000000000000000000000").unwrap());
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_fractional_balance() {
    let server = MockAccountServer::spawn(MockAccount::with_portfolio_value("1234.56"))
        .await
        .unwrap();
    let req = request(KEY, SECRET);

    let outcome = run(&server, &req).await;
    assert_eq!(decoded(&outcome, &req), U256::from_str("1234560000000000000000").unwrap());
}

#[tokio::test]
async fn test_zero_balance() {
    let server = MockAccountServer::spawn(MockAccount::with_portfolio_value("0"))
        .await
        .unwrap();
    let req = request(KEY, SECRET);

    let outcome = run(&server, &req).await;
    assert_eq!(decoded(&outcome, &req), U256::ZERO);
}

#[tokio::test]
async fn test_repeated_runs_identical() {
    let server = MockAccountServer::spawn(MockAccount::with_portfolio_value("4242.4242"))
        .await
        .unwrap();
    let req = request(KEY, SECRET);

    let first = run(&server, &req).await;
    let second = run(&server, &req).await;
    assert_eq!(first.response_hex, second.response_hex);
    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn test_empty_credentials_never_hit_endpoint() {
    let server = MockAccountServer::spawn(MockAccount::with_portfolio_value("1"))
        .await
        .unwrap();

    for req in [request("", SECRET), request(KEY, ""), RequestConfig::new(FUNCTION_NAME)] {
        let outcome = run(&server, &req).await;
        assert!(outcome.response_hex.is_none());
        assert_eq!(
            outcome.error_string.as_deref(),
            Some("Configuration error: Alpaca API key and secret are required")
        );
    }
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn test_missing_portfolio_value() {
    let server = MockAccountServer::spawn(MockAccount::with_body(json!({ "id": "abc", "currency": "USD" })))
        .await
        .unwrap();
    let req = request(KEY, SECRET);

    let outcome = run(&server, &req).await;
    assert!(outcome.response_hex.is_none());
    assert!(outcome.error_string.unwrap().contains("portfolio_value"));
    assert!(outcome.captured_terminal_output.is_empty());
}

#[tokio::test]
async fn test_nan_portfolio_value_not_encoded() {
    let server = MockAccountServer::spawn(MockAccount::with_portfolio_value("NaN"))
        .await
        .unwrap();
    let req = request(KEY, SECRET);

    let outcome = run(&server, &req).await;
    assert!(outcome.response_hex.is_none());
    assert!(outcome.error_string.unwrap().starts_with("Parse error"));
}

#[tokio::test]
async fn test_rejected_credentials_reported() {
    let server = MockAccountServer::spawn(
        MockAccount::with_portfolio_value("1").require_credentials(KEY, SECRET),
    )
    .await
    .unwrap();
    let req = request(KEY, "not-the-secret");

    let outcome = run(&server, &req).await;
    assert!(outcome.error_string.unwrap().starts_with("Network error"));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_positional_array_body_not_encoded() {
    let server = MockAccountServer::spawn(MockAccount::with_body(json!([null, null, null, null, "5"])))
        .await
        .unwrap();
    let req = request(KEY, SECRET);

    let outcome = run(&server, &req).await;
    assert!(outcome.response_hex.is_none());
    assert!(outcome.error_string.unwrap().contains("not a JSON object"));
    assert!(outcome.captured_terminal_output.is_empty());
}
