//! Core types shared across the crate.
//!
//! Request descriptor enums, decoded function results and the
//! function error enum.

use alloy_primitives::{hex, I256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Request descriptor enums
// ---------------------------------------------------------------------------

/// Where a piece of the request (source code or secrets) lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Shipped inside the request itself.
    Inline,
    /// Fetched by the executing node from a URL.
    Remote,
    /// Held by the execution network on the requester's behalf.
    DonHosted,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Inline => write!(f, "inline"),
            Location::Remote => write!(f, "remote"),
            Location::DonHosted => write!(f, "don-hosted"),
        }
    }
}

/// ABI type the on-chain consumer expects the response bytes to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    Uint256,
    Int256,
    String,
    Bytes,
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Uint256 => write!(f, "uint256"),
            ReturnType::Int256 => write!(f, "int256"),
            ReturnType::String => write!(f, "string"),
            ReturnType::Bytes => write!(f, "bytes"),
        }
    }
}

/// A response decoded according to its [`ReturnType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Uint256(U256),
    Int256(I256),
    String(String),
    Bytes(Vec<u8>),
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Uint256(v) => write!(f, "{v}"),
            DecodedValue::Int256(v) => write!(f, "{v}"),
            DecodedValue::String(s) => write!(f, "{s}"),
            DecodedValue::Bytes(b) => write!(f, "{}", hex::encode_prefixed(b)),
        }
    }
}

impl DecodedValue {
    /// The unsigned value, if this is a `uint256` result.
    pub fn as_u256(&self) -> Option<U256> {
        match self {
            DecodedValue::Uint256(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Coarse classification of a [`FunctionError`], for branching without
/// matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Network,
    Parse,
}

/// Errors raised by a function running inside the execution host.
///
/// The host reports these to the requester as strings; callers inside the
/// crate can use [`FunctionError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl FunctionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FunctionError::Config(_) => ErrorKind::Config,
            FunctionError::Network(_) => ErrorKind::Network,
            FunctionError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// The message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            FunctionError::Config(m) | FunctionError::Network(m) | FunctionError::Parse(m) => m,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
