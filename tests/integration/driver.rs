//! Driver runs against the configured mock balance.

use alloy_primitives::U256;
use std::str::FromStr;

use alpaca_mint::config::AppConfig;
use alpaca_mint::driver;
use alpaca_mint::functions::balance::{FUNCTION_NAME, KEY_SECRET, SECRET_SECRET};
use alpaca_mint::simulator::RequestConfig;

fn mocked_config(value: &str) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.simulation.mock_portfolio_value = Some(value.to_string());
    cfg
}

fn request(key: &str, secret: &str) -> RequestConfig {
    RequestConfig::new(FUNCTION_NAME)
        .with_secret(KEY_SECRET, key.to_string())
        .with_secret(SECRET_SECRET, secret.to_string())
}

#[tokio::test]
async fn test_mocked_run_prints_result() {
    let cfg = mocked_config("100000.00");
    let req = request("PK", "SK");

    let outcome = driver::run(&cfg, &req).await.unwrap();
    let mut out = Vec::new();
    let value = driver::report(&outcome, req.expected_return_type, &mut out).unwrap();

    assert_eq!(
        value.and_then(|v| v.as_u256()),
        Some(U256::from_str("100000000000000000000000").unwrap())
    );
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Alpaca Portfolio Balance: $100000.00"));
    assert!(printed.contains("Result: 100000000000000000000000"));
}

#[tokio::test]
async fn test_function_error_fails_driver() {
    let cfg = mocked_config("100000.00");
    let req = request("", "SK");

    let outcome = driver::run(&cfg, &req).await.unwrap();
    let mut out = Vec::new();
    let err = driver::report(&outcome, req.expected_return_type, &mut out).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Configuration error: Alpaca API key and secret are required"
    );
    assert!(!String::from_utf8(out).unwrap().contains("Result:"));
}

#[tokio::test]
async fn test_malformed_mock_balance_fails_driver() {
    let cfg = mocked_config("NaN");
    let req = request("PK", "SK");

    let outcome = driver::run(&cfg, &req).await.unwrap();
    let mut out = Vec::new();
    let err = driver::report(&outcome, req.expected_return_type, &mut out).unwrap_err();
    assert!(err.to_string().starts_with("Parse error"));
}
