//! Monetary amounts
//!
//! Amounts are fixed-point `Decimal`s limited to a number of minor units
//! (2 for INR paise, USD cents, ...). Anything finer is rejected rather than
//! rounded so that a caller never silently loses money.

use rust_decimal::Decimal;

use super::result::{Error, Result};

/// Minor units used when nothing else is configured
pub const DEFAULT_MINOR_UNITS: u32 = 2;

/// Largest scale a `Decimal` can carry
pub const MAX_MINOR_UNITS: u32 = 28;

/// Check a configured number of minor units
pub fn check_minor_units(minor_units: u32) -> Result<u32> {
    if minor_units > MAX_MINOR_UNITS {
        return Err(Error::Config(format!(
            "minor units must be at most {} (got {})",
            MAX_MINOR_UNITS, minor_units
        )));
    }
    Ok(minor_units)
}

/// Zero at the given precision, so balances print as `0.00`
///
/// Precision is capped at `MAX_MINOR_UNITS`.
pub fn zero(minor_units: u32) -> Decimal {
    Decimal::new(0, minor_units.min(MAX_MINOR_UNITS))
}

/// Validate a caller-supplied amount
///
/// The amount must be strictly positive and representable in `minor_units`
/// decimal places. Returns the amount rescaled to exactly `minor_units`.
pub fn validate_amount(amount: Decimal, minor_units: u32) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_amount(format!(
            "amount must be greater than zero (got {})",
            amount
        )));
    }

    let normalized = amount.normalize();
    if normalized.scale() > minor_units {
        return Err(Error::invalid_amount(format!(
            "amount {} has more than {} decimal places",
            amount, minor_units
        )));
    }

    let mut scaled = normalized;
    scaled.rescale(minor_units);
    Ok(scaled)
}

/// Add to a balance, reporting overflow as an invalid amount
pub fn credit(balance: Decimal, amount: Decimal) -> Result<Decimal> {
    balance
        .checked_add(amount)
        .ok_or_else(|| Error::invalid_amount("amount would overflow the balance"))
}

/// Subtract from a balance; the caller has already checked for sufficient funds
pub fn debit(balance: Decimal, amount: Decimal) -> Result<Decimal> {
    match balance.checked_sub(amount) {
        Some(rest) if rest >= Decimal::ZERO => Ok(rest),
        _ => Err(Error::InsufficientFunds {
            balance,
            requested: amount,
        }),
    }
}
