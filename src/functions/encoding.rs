//! Fixed-point conversion and ABI word codecs.
//!
//! On-chain consumers take amounts as integers scaled by `10^18`. The
//! conversion runs on exact decimals, so values such as `1234.56` encode
//! to exactly `1234560000000000000000` with no binary float error.

use alloy_primitives::{hex, I256, U256};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{DecodedValue, FunctionError, ReturnType};

/// Decimal places of the on-chain fixed-point representation.
pub const FIXED_POINT_DECIMALS: u32 = 18;

/// Size of one ABI word.
pub const WORD_BYTES: usize = 32;

/// `round(value × 10^decimals)` as an unsigned 256-bit integer.
///
/// Rounds half away from zero at the last kept digit. Negative amounts
/// cannot be represented and are rejected.
pub fn to_fixed_point(value: Decimal, decimals: u32) -> Result<U256, FunctionError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FunctionError::Parse(format!(
            "Cannot encode negative amount {value} as uint256"
        )));
    }

    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never increases the scale, so scale <= decimals here
    let exponent = decimals - rounded.scale();
    let mantissa = U256::from(rounded.mantissa().unsigned_abs());

    U256::from(10u64)
        .checked_pow(U256::from(exponent))
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(|| {
            FunctionError::Parse(format!(
                "Amount {value} at {decimals} decimals overflows uint256"
            ))
        })
}

/// 32-byte big-endian word.
pub fn encode_uint256(value: U256) -> Vec<u8> {
    value.to_be_bytes::<WORD_BYTES>().to_vec()
}

/// 32-byte two's complement big-endian word.
pub fn encode_int256(value: I256) -> Vec<u8> {
    value.into_raw().to_be_bytes::<WORD_BYTES>().to_vec()
}

pub fn encode_string(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Decode a hex response (with or without `0x`) as the given type.
pub fn decode_result(return_type: ReturnType, response_hex: &str) -> Result<DecodedValue, FunctionError> {
    let digits = response_hex.strip_prefix("0x").unwrap_or(response_hex);
    let bytes = hex::decode(digits)
        .map_err(|e| FunctionError::Parse(format!("Invalid response hex: {e}")))?;

    match return_type {
        ReturnType::Uint256 => Ok(DecodedValue::Uint256(word(&bytes, return_type)?)),
        ReturnType::Int256 => Ok(DecodedValue::Int256(I256::from_raw(word(&bytes, return_type)?))),
        ReturnType::String => String::from_utf8(bytes)
            .map(DecodedValue::String)
            .map_err(|e| FunctionError::Parse(format!("Response is not valid UTF-8: {e}"))),
        ReturnType::Bytes => Ok(DecodedValue::Bytes(bytes)),
    }
}

fn word(bytes: &[u8], return_type: ReturnType) -> Result<U256, FunctionError> {
    if bytes.len() != WORD_BYTES {
        return Err(FunctionError::Parse(format!(
            "{return_type} response must be {WORD_BYTES} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(U256::from_be_slice(bytes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
