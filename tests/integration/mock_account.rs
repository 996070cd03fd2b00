//! The live Alpaca client against the mock account endpoint over real HTTP.

use serde_json::json;
use std::time::Duration;

use alpaca_mint::alpaca::client::AlpacaClient;
use alpaca_mint::alpaca::mock::{MockAccount, MockAccountServer};
use alpaca_mint::alpaca::{AccountApi, AlpacaCredentials};
use alpaca_mint::types::ErrorKind;

fn client_for(server: &MockAccountServer) -> AlpacaClient {
    AlpacaClient::new(server.base_url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_account_sends_auth_headers() {
    let server = MockAccountServer::spawn(
        MockAccount::with_portfolio_value("2500.75").require_credentials("PKID", "SKEY"),
    )
    .await
    .unwrap();
    let client = client_for(&server);

    let creds = AlpacaCredentials::new("PKID", "SKEY").unwrap();
    let account = client.fetch_account(&creds).await.unwrap();

    assert_eq!(account.currency.as_deref(), Some("USD"));
    assert_eq!(account.portfolio_value().unwrap().to_string(), "2500.75");
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_wrong_credentials_is_network_error() {
    let server = MockAccountServer::spawn(
        MockAccount::with_portfolio_value("1").require_credentials("PKID", "SKEY"),
    )
    .await
    .unwrap();
    let client = client_for(&server);

    let creds = AlpacaCredentials::new("PKID", "wrong").unwrap();
    let err = client.fetch_account(&creds).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().contains("403"));
}

#[tokio::test]
async fn test_numeric_portfolio_value() {
    let server = MockAccountServer::spawn(MockAccount::with_body(json!({ "portfolio_value": 10.5 })))
        .await
        .unwrap();
    let client = client_for(&server);

    let creds = AlpacaCredentials::new("k", "s").unwrap();
    let account = client.fetch_account(&creds).await.unwrap();
    assert_eq!(account.portfolio_value().unwrap().to_string(), "10.5");
}

#[tokio::test]
async fn test_non_object_body_is_parse_error() {
    let server = MockAccountServer::spawn(MockAccount::with_body(json!(["not", "an", "account"])))
        .await
        .unwrap();
    let client = client_for(&server);

    let creds = AlpacaCredentials::new("k", "s").unwrap();
    let err = client.fetch_account(&creds).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}
