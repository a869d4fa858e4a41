//! 256-bit checked, saturating and fixed-point arithmetic.
//!
//! The fold helpers mirror the on-chain accumulator semantics exactly:
//! `ADD` folds from zero, `SUB` from the first value, `MUL` from one, and any
//! overflow past `2^256 - 1` (or underflow past zero) is a hard error for the
//! checked family while the saturating family clamps instead.

use ethereum_types::U256;

use crate::error::InterpreterError;

/// The canonical fixed-point scale: 18 decimals.
pub const FIXED_POINT_DECIMALS: u32 = 18;

/// `10^18`, the canonical fixed-point "one".
pub fn one_18() -> U256 {
    U256::from(10u64).pow(U256::from(FIXED_POINT_DECIMALS))
}

/// `10^n`, or `NumericOverflow` when it no longer fits 256 bits (mirrors the
/// on-chain `10**n` revert).
fn exp10(n: u32) -> Result<U256, InterpreterError> {
    U256::from(10u64)
        .checked_pow(U256::from(n))
        .ok_or(InterpreterError::NumericOverflow)
}

/// Rescales `value` from `from_scale` decimals to the canonical 18.
///
/// Scaling up multiplies (checked); scaling down divides with truncation.
pub fn scale18(value: U256, from_scale: u32) -> Result<U256, InterpreterError> {
    if from_scale == FIXED_POINT_DECIMALS {
        Ok(value)
    } else if from_scale < FIXED_POINT_DECIMALS {
        value
            .checked_mul(exp10(FIXED_POINT_DECIMALS - from_scale)?)
            .ok_or(InterpreterError::NumericOverflow)
    } else {
        Ok(value / exp10(from_scale - FIXED_POINT_DECIMALS)?)
    }
}

/// Rescales `value` from the canonical 18 decimals to `to_scale`.
pub fn scale_n(value: U256, to_scale: u32) -> Result<U256, InterpreterError> {
    if to_scale == FIXED_POINT_DECIMALS {
        Ok(value)
    } else if to_scale < FIXED_POINT_DECIMALS {
        Ok(value / exp10(FIXED_POINT_DECIMALS - to_scale)?)
    } else {
        value
            .checked_mul(exp10(to_scale - FIXED_POINT_DECIMALS)?)
            .ok_or(InterpreterError::NumericOverflow)
    }
}

/// Shifts `value` by `shift` orders of magnitude, where `shift` is an 8-bit
/// two's-complement value: `0x80..=0xff` encode `shift - 256` (a division).
pub fn scale_by(value: U256, shift: u8) -> Result<U256, InterpreterError> {
    let signed = shift as i8;
    if signed >= 0 {
        value
            .checked_mul(exp10(signed as u32)?)
            .ok_or(InterpreterError::NumericOverflow)
    } else {
        Ok(value / exp10(signed.unsigned_abs() as u32)?)
    }
}

/// Fixed-point multiply: rescale `a` from `scale` to 18 decimals, multiply by
/// `b`, then normalize by `10^18`. Truncating division throughout, in exactly
/// this order, to reproduce on-chain rounding.
pub fn fixed_point_mul(a: U256, b: U256, scale: u32) -> Result<U256, InterpreterError> {
    Ok(scale18(a, scale)?
        .checked_mul(b)
        .ok_or(InterpreterError::NumericOverflow)?
        / one_18())
}

/// Fixed-point divide: rescale `a` from `scale` to 18 decimals, scale up by
/// `10^18`, then divide by `b`.
pub fn fixed_point_div(a: U256, b: U256, scale: u32) -> Result<U256, InterpreterError> {
    if b.is_zero() {
        return Err(InterpreterError::DivisionByZero);
    }
    Ok(scale18(a, scale)?
        .checked_mul(one_18())
        .ok_or(InterpreterError::NumericOverflow)?
        / b)
}

/// `ADD`: fold from zero with checked addition.
pub fn checked_add(values: &[U256]) -> Result<U256, InterpreterError> {
    values.iter().try_fold(U256::zero(), |acc, v| {
        acc.checked_add(*v).ok_or(InterpreterError::NumericOverflow)
    })
}

/// `SUB`: fold from the first value with checked subtraction.
pub fn checked_sub(values: &[U256]) -> Result<U256, InterpreterError> {
    let (first, rest) = split_first(values)?;
    rest.iter().try_fold(first, |acc, v| {
        acc.checked_sub(*v).ok_or(InterpreterError::NumericUnderflow)
    })
}

/// `MUL`: fold from one with checked multiplication.
pub fn checked_mul(values: &[U256]) -> Result<U256, InterpreterError> {
    values.iter().try_fold(U256::one(), |acc, v| {
        acc.checked_mul(*v).ok_or(InterpreterError::NumericOverflow)
    })
}

/// `DIV`: fold from the first value with truncating division.
pub fn checked_div(values: &[U256]) -> Result<U256, InterpreterError> {
    let (first, rest) = split_first(values)?;
    rest.iter().try_fold(first, |acc, v| {
        acc.checked_div(*v).ok_or(InterpreterError::DivisionByZero)
    })
}

/// `MOD`: fold from the first value with the remainder operation.
pub fn checked_rem(values: &[U256]) -> Result<U256, InterpreterError> {
    let (first, rest) = split_first(values)?;
    rest.iter().try_fold(first, |acc, v| {
        acc.checked_rem(*v).ok_or(InterpreterError::DivisionByZero)
    })
}

/// `EXP`: fold from the first value with checked exponentiation.
pub fn checked_exp(values: &[U256]) -> Result<U256, InterpreterError> {
    let (first, rest) = split_first(values)?;
    rest.iter().try_fold(first, |acc, v| {
        acc.checked_pow(*v).ok_or(InterpreterError::NumericOverflow)
    })
}

/// `SATURATING_ADD`: fold from zero, clamping at `2^256 - 1`.
pub fn saturating_add(values: &[U256]) -> U256 {
    values
        .iter()
        .fold(U256::zero(), |acc, v| acc.saturating_add(*v))
}

/// `SATURATING_SUB`: fold from the first value, clamping at zero.
pub fn saturating_sub(values: &[U256]) -> Result<U256, InterpreterError> {
    let (first, rest) = split_first(values)?;
    Ok(rest.iter().fold(first, |acc, v| acc.saturating_sub(*v)))
}

/// `SATURATING_MUL`: fold from one, clamping at `2^256 - 1`.
pub fn saturating_mul(values: &[U256]) -> U256 {
    values
        .iter()
        .fold(U256::one(), |acc, v| acc.saturating_mul(*v))
}

/// `MIN` over a non-empty list.
pub fn min(values: &[U256]) -> Result<U256, InterpreterError> {
    let (first, rest) = split_first(values)?;
    Ok(rest.iter().fold(first, |acc, v| acc.min(*v)))
}

/// `MAX` over a non-empty list.
pub fn max(values: &[U256]) -> Result<U256, InterpreterError> {
    let (first, rest) = split_first(values)?;
    Ok(rest.iter().fold(first, |acc, v| acc.max(*v)))
}

fn split_first(values: &[U256]) -> Result<(U256, &[U256]), InterpreterError> {
    values
        .split_first()
        .map(|(first, rest)| (*first, rest))
        .ok_or(InterpreterError::StackUnderflow {
            needed: 1,
            available: 0,
        })
}
