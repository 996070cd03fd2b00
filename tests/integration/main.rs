//! Integration tests: the Alpaca balance function run end to end through
//! the simulation harness against a local mock account endpoint.

mod driver;
mod mock_account;
mod simulation;
