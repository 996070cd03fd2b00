//! Local simulation harness.
//!
//! Runs a function the way the execution host would: secrets and args
//! injected through an `ExecutionContext`, a wall-clock timeout, a cap on
//! response size, and console output captured for the operator. Failures
//! come back as strings in the outcome, never as a panic.

use alloy_primitives::hex;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

use super::RequestConfig;
use crate::functions::{ExecutionContext, FunctionSource};
use crate::types::FunctionError;

/// Resource limits enforced on a simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationLimits {
    pub timeout: Duration,
    pub max_response_bytes: usize,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_response_bytes: 256,
        }
    }
}

/// Reasons a simulated run fails.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Function(#[from] FunctionError),

    #[error("Request names source {requested:?} but function is {actual:?}")]
    SourceMismatch { requested: String, actual: String },

    #[error("Function timed out after {0:?}")]
    Timeout(Duration),

    #[error("Response of {size} bytes exceeds the {max} byte limit")]
    ResponseTooLarge { size: usize, max: usize },
}

/// Result of one simulated request.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub request_id: Uuid,
    /// `0x`-prefixed response bytes, on success.
    pub response_hex: Option<String>,
    pub error_string: Option<String>,
    /// Console lines joined with `\n`, kept on failure too.
    pub captured_terminal_output: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl SimulationOutcome {
    pub fn is_success(&self) -> bool {
        self.response_hex.is_some()
    }
}

/// Simulate `request` against `source`.
pub async fn simulate_script(
    request: &RequestConfig,
    source: &dyn FunctionSource,
    limits: &SimulationLimits,
) -> SimulationOutcome {
    let started_at = Utc::now();
    let clock = Instant::now();
    let mut ctx = request.execution_context();

    info!(
        request_id = %request.id,
        source = %request.source,
        timeout = ?limits.timeout,
        "Simulating request"
    );

    let result = execute(request, source, &mut ctx, limits).await;
    let elapsed = clock.elapsed();

    let (response_hex, error_string) = match result {
        Ok(bytes) => {
            info!(request_id = %request.id, bytes = bytes.len(), ?elapsed, "Simulation succeeded");
            (Some(hex::encode_prefixed(&bytes)), None)
        }
        Err(e) => {
            warn!(request_id = %request.id, error = %e, ?elapsed, "Simulation failed");
            (None, Some(e.to_string()))
        }
    };

    SimulationOutcome {
        request_id: request.id,
        response_hex,
        error_string,
        captured_terminal_output: ctx.into_console().join("\n"),
        started_at,
        elapsed,
    }
}

async fn execute(
    request: &RequestConfig,
    source: &dyn FunctionSource,
    ctx: &mut ExecutionContext,
    limits: &SimulationLimits,
) -> Result<Vec<u8>, SimulationError> {
    if source.name() != request.source {
        return Err(SimulationError::SourceMismatch {
            requested: request.source.clone(),
            actual: source.name().to_string(),
        });
    }

    let bytes = tokio::time::timeout(limits.timeout, source.run(ctx))
        .await
        .map_err(|_| SimulationError::Timeout(limits.timeout))??;

    if bytes.len() > limits.max_response_bytes {
        return Err(SimulationError::ResponseTooLarge {
            size: bytes.len(),
            max: limits.max_response_bytes,
        });
    }

    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
