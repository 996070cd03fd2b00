//! Functions run by the execution host.
//!
//! Defines the `FunctionSource` trait and the `ExecutionContext` the host
//! hands each invocation. Secrets and args arrive through the context,
//! never through process-global state.

pub mod balance;
pub mod encoding;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tracing::info;

use crate::types::FunctionError;

/// Per-invocation state provided by the host.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    secrets: HashMap<String, SecretString>,
    args: Vec<String>,
    console: Vec<String>,
}

impl ExecutionContext {
    pub fn new(secrets: HashMap<String, SecretString>, args: Vec<String>) -> Self {
        Self {
            secrets,
            args,
            console: Vec::new(),
        }
    }

    /// Look up an injected secret by name.
    pub fn secret(&self, name: &str) -> Option<&str> {
        self.secrets.get(name).map(|s| s.expose_secret().as_str())
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Write a line to the captured console. Also emitted as a trace event.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!(target: "alpaca_mint::console", "{line}");
        self.console.push(line);
    }

    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn into_console(self) -> Vec<String> {
        self.console
    }
}

/// A function the host can execute.
///
/// Returns the raw response bytes on success; the host hex-encodes them
/// for the requester.
#[async_trait]
pub trait FunctionSource: Send + Sync {
    /// Name the request descriptor refers to this function by.
    fn name(&self) -> &str;

    async fn run(&self, ctx: &mut ExecutionContext) -> Result<Vec<u8>, FunctionError>;
}
