//! alpaca-mint — Alpaca balance function for a remote execution host.
//!
//! Library crate exposing all modules for use by integration tests
//! and the simulation driver.

pub mod config;
pub mod types;
pub mod alpaca;
pub mod functions;
pub mod simulator;
pub mod driver;
