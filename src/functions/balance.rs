//! Alpaca balance function.
//!
//! Fetches the account's portfolio value and returns it as a `uint256`
//! scaled by `10^18` for the on-chain consumer.

use alloy_primitives::U256;
use async_trait::async_trait;

use super::encoding::{encode_uint256, to_fixed_point, FIXED_POINT_DECIMALS};
use super::{ExecutionContext, FunctionSource};
use crate::alpaca::{AccountApi, AlpacaCredentials};
use crate::types::FunctionError;

pub const FUNCTION_NAME: &str = "alpaca-balance";

/// Secret name for the Alpaca API key id.
pub const KEY_SECRET: &str = "alpacaKey";
/// Secret name for the Alpaca API secret key.
pub const SECRET_SECRET: &str = "alpacaSecret";

pub struct AlpacaBalanceFunction<A> {
    api: A,
}

impl<A: AccountApi> AlpacaBalanceFunction<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Pull the key pair out of the context. Missing and empty secrets are
    /// both configuration errors.
    pub fn credentials(ctx: &ExecutionContext) -> Result<AlpacaCredentials, FunctionError> {
        AlpacaCredentials::new(
            ctx.secret(KEY_SECRET).unwrap_or_default(),
            ctx.secret(SECRET_SECRET).unwrap_or_default(),
        )
    }

    /// Fetch the balance and return its fixed-point value.
    pub async fn fetch_encoded_balance(&self, ctx: &mut ExecutionContext) -> Result<U256, FunctionError> {
        let credentials = Self::credentials(ctx)?;

        let account = self.api.fetch_account(&credentials).await?;
        let amount = account.portfolio_value()?;
        ctx.log(format!("Alpaca Portfolio Balance: ${amount}"));

        to_fixed_point(amount.to_decimal()?, FIXED_POINT_DECIMALS)
    }
}

#[async_trait]
impl<A: AccountApi> FunctionSource for AlpacaBalanceFunction<A> {
    fn name(&self) -> &str {
        FUNCTION_NAME
    }

    async fn run(&self, ctx: &mut ExecutionContext) -> Result<Vec<u8>, FunctionError> {
        let value = self.fetch_encoded_balance(ctx).await?;
        Ok(encode_uint256(value))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
