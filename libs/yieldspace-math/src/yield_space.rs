//! YieldSpace invariant solvers.
//!
//! For reserves `xs`, `ys` and exponent `e` the pool keeps
//! `xs^e + ys^e = x_end^e + y_end^e` across a trade. All quantities are
//! 18-decimal fixed point.

use crate::{trade_exponent, Fixed60x18};
use ethnum::U256;
use yieldspace_types::{Error, TradeKind};

/// Amount of y that must go in for `x_out` of x to come out
fn solve_in_for_out(
    x_reserves: Fixed60x18,
    y_reserves: Fixed60x18,
    x_out: Fixed60x18,
    exponent: Fixed60x18,
) -> Result<Fixed60x18, Error> {
    let x_end = x_reserves
        .checked_sub(x_out)
        .ok_or(Error::ReservesUnderflow)?;

    let xs_e = x_reserves.pow(exponent)?;
    let ys_e = y_reserves.pow(exponent)?;
    let x_end_e = x_end.pow(exponent).map_err(|_| Error::ReservesUnderflow)?;

    let sum = xs_e.checked_add(ys_e).ok_or(Error::Overflow)?;
    let y_end_e = sum.checked_sub(x_end_e).ok_or(Error::ReservesUnderflow)?;
    let y_end = y_end_e.pow(Fixed60x18::ONE.div(exponent)?)?;

    // The pool must receive something for anything it gives up
    y_end
        .checked_sub(y_reserves)
        .filter(|y_in| *y_in > Fixed60x18::ZERO)
        .ok_or(Error::LossyPrecisionUnderflow)
}

/// Amount of y that comes out for `x_in` of x going in
fn solve_out_for_in(
    x_reserves: Fixed60x18,
    y_reserves: Fixed60x18,
    x_in: Fixed60x18,
    exponent: Fixed60x18,
) -> Result<Fixed60x18, Error> {
    let x_end = x_reserves
        .checked_add(x_in)
        .ok_or(Error::ReservesOverflow)?;

    let xs_e = x_reserves.pow(exponent)?;
    let ys_e = y_reserves.pow(exponent)?;
    let x_end_e = x_end.pow(exponent).map_err(|_| Error::ReservesOverflow)?;

    let sum = xs_e.checked_add(ys_e).ok_or(Error::Overflow)?;
    let y_end_e = sum
        .checked_sub(x_end_e)
        .ok_or(Error::ReservesFactorsUnderflow)?;
    let y_end = y_end_e.pow(Fixed60x18::ONE.div(exponent)?)?;

    y_reserves
        .checked_sub(y_end)
        .ok_or(Error::LossyPrecisionUnderflow)
}

/// Drift allowed between a quoted amount and its reverse reconstruction:
/// one part in 1e9 of the amount, but never below 1e-9 of a token.
const RECONSTRUCTION_FLOOR: u128 = 1_000_000_000;
const RECONSTRUCTION_DIVISOR: u128 = 1_000_000_000;

/// Reject results whose reverse computation does not land back on the
/// original amount
fn check_reconstruction(
    amount: Fixed60x18,
    reconstructed: Result<Fixed60x18, Error>,
) -> Result<(), Error> {
    let reconstructed = reconstructed.map_err(|_| Error::LossyPrecisionUnderflow)?;
    let tolerance = (amount.raw() / U256::new(RECONSTRUCTION_DIVISOR))
        .max(U256::new(RECONSTRUCTION_FLOOR));
    if reconstructed.abs_diff(amount).raw() > tolerance {
        return Err(Error::LossyPrecisionUnderflow);
    }
    Ok(())
}

/// How much y must be added to the pool for `x_out` of x to leave it.
///
/// # Arguments
/// * `x_reserves` - Reserves of the asset leaving the pool
/// * `y_reserves` - Reserves of the asset entering the pool
/// * `x_out` - Amount leaving
/// * `exponent` - Yield exponent, in (0, 1]
pub fn in_for_out(
    x_reserves: u128,
    y_reserves: u128,
    x_out: u128,
    exponent: Fixed60x18,
) -> Result<u128, Error> {
    if x_out == 0 {
        return Ok(0);
    }
    let xs = Fixed60x18::new(x_reserves);
    let ys = Fixed60x18::new(y_reserves);
    let xd = Fixed60x18::new(x_out);

    let y_in = solve_in_for_out(xs, ys, xd, exponent)?;
    check_reconstruction(xd, solve_out_for_in(ys, xs, y_in, exponent))?;
    y_in.to_u128()
}

/// How much y leaves the pool when `x_in` of x is added to it.
///
/// # Arguments
/// * `x_reserves` - Reserves of the asset entering the pool
/// * `y_reserves` - Reserves of the asset leaving the pool
/// * `x_in` - Amount entering
/// * `exponent` - Yield exponent, in (0, 1]
pub fn out_for_in(
    x_reserves: u128,
    y_reserves: u128,
    x_in: u128,
    exponent: Fixed60x18,
) -> Result<u128, Error> {
    if x_in == 0 {
        return Ok(0);
    }
    let xs = Fixed60x18::new(x_reserves);
    let ys = Fixed60x18::new(y_reserves);
    let xd = Fixed60x18::new(x_in);

    let y_out = solve_out_for_in(xs, ys, xd, exponent)?;
    check_reconstruction(xd, solve_in_for_out(ys, xs, y_out, exponent))?;
    y_out.to_u128()
}

// ============================================================================
// DIRECTIONAL PRICING
// Reserves are the normalized underlying and the virtual hToken reserves
// ============================================================================

/// Normalized underlying a trader pays to take `h_token_out` from the pool
pub fn underlying_in_for_h_token_out(
    normalized_underlying_reserves: u128,
    virtual_h_token_reserves: u128,
    h_token_out: u128,
    time_to_maturity: u64,
) -> Result<u128, Error> {
    let exponent = trade_exponent(TradeKind::BuyHToken, time_to_maturity)?;
    in_for_out(
        virtual_h_token_reserves,
        normalized_underlying_reserves,
        h_token_out,
        exponent,
    )
}

/// hToken a trader pays to take `normalized_underlying_out` from the pool
pub fn h_token_in_for_underlying_out(
    normalized_underlying_reserves: u128,
    virtual_h_token_reserves: u128,
    normalized_underlying_out: u128,
    time_to_maturity: u64,
) -> Result<u128, Error> {
    let exponent = trade_exponent(TradeKind::BuyUnderlying, time_to_maturity)?;
    in_for_out(
        normalized_underlying_reserves,
        virtual_h_token_reserves,
        normalized_underlying_out,
        exponent,
    )
}

/// Normalized underlying paid out for `h_token_in` sold to the pool
pub fn underlying_out_for_h_token_in(
    normalized_underlying_reserves: u128,
    virtual_h_token_reserves: u128,
    h_token_in: u128,
    time_to_maturity: u64,
) -> Result<u128, Error> {
    let exponent = trade_exponent(TradeKind::SellHToken, time_to_maturity)?;
    out_for_in(
        virtual_h_token_reserves,
        normalized_underlying_reserves,
        h_token_in,
        exponent,
    )
}

/// hToken paid out for `normalized_underlying_in` sold to the pool
pub fn h_token_out_for_underlying_in(
    normalized_underlying_reserves: u128,
    virtual_h_token_reserves: u128,
    normalized_underlying_in: u128,
    time_to_maturity: u64,
) -> Result<u128, Error> {
    let exponent = trade_exponent(TradeKind::SellUnderlying, time_to_maturity)?;
    out_for_in(
        normalized_underlying_reserves,
        virtual_h_token_reserves,
        normalized_underlying_in,
        exponent,
    )
}
