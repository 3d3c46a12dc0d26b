use crate::{
    h_token_in_for_underlying_out, h_token_out_for_underlying_in, time_to_maturity,
    underlying_in_for_h_token_out, underlying_out_for_h_token_in,
};
use yieldspace_types::{Error, PoolReserves, TradeKind, TradeQuote};

/// Price a trade against a reserve snapshot without touching any state.
///
/// # Arguments
/// * `reserves` - Pool balances and LP supply before the trade
/// * `kind` - Trade direction
/// * `amount` - The amount fixed by the caller (hToken in 18 decimals,
///   underlying in native decimals)
/// * `now` - Current ledger timestamp
/// * `maturity` - hToken maturity timestamp
///
/// # Returns
/// A quote holding both sides of the trade, already checked against the
/// post-trade interest rate and the pool's hToken inventory
pub fn quote_trade(
    reserves: &PoolReserves,
    kind: TradeKind,
    amount: u128,
    now: u64,
    maturity: u64,
) -> Result<TradeQuote, Error> {
    if amount == 0 {
        return Err(kind.zero_amount_error());
    }
    let ttm = time_to_maturity(now, maturity)?;

    let normalized_underlying = reserves.normalized_underlying_reserves()?;
    let virtual_h_token = reserves.virtual_h_token_reserves()?;

    let quote = match kind {
        TradeKind::BuyHToken => {
            let normalized_in =
                underlying_in_for_h_token_out(normalized_underlying, virtual_h_token, amount, ttm)?;
            let underlying_in = reserves.denormalize(normalized_in);
            if underlying_in == 0 {
                return Err(Error::BuyHTokenUnderlyingZero);
            }
            TradeQuote {
                kind,
                underlying_amount: underlying_in,
                h_token_amount: amount,
            }
        }
        TradeKind::BuyUnderlying => {
            let h_token_in = h_token_in_for_underlying_out(
                normalized_underlying,
                virtual_h_token,
                reserves.normalize(amount)?,
                ttm,
            )?;
            if h_token_in == 0 {
                return Err(Error::BuyUnderlyingZero);
            }
            TradeQuote {
                kind,
                underlying_amount: amount,
                h_token_amount: h_token_in,
            }
        }
        TradeKind::SellHToken => {
            let normalized_out =
                underlying_out_for_h_token_in(normalized_underlying, virtual_h_token, amount, ttm)?;
            let underlying_out = reserves.denormalize(normalized_out);
            if underlying_out == 0 {
                return Err(Error::SellHTokenZero);
            }
            TradeQuote {
                kind,
                underlying_amount: underlying_out,
                h_token_amount: amount,
            }
        }
        TradeKind::SellUnderlying => {
            let h_token_out = h_token_out_for_underlying_in(
                normalized_underlying,
                virtual_h_token,
                reserves.normalize(amount)?,
                ttm,
            )?;
            if h_token_out == 0 {
                return Err(Error::SellUnderlyingZero);
            }
            TradeQuote {
                kind,
                underlying_amount: amount,
                h_token_amount: h_token_out,
            }
        }
    };

    if kind.h_token_leaves_pool() {
        check_h_token_outflow(reserves, &quote)?;
    }
    Ok(quote)
}

/// Validate a trade that takes hToken out of the pool.
///
/// The post-trade virtual hToken reserves must still cover the normalized
/// underlying reserves, and the pool must actually hold the hToken.
fn check_h_token_outflow(reserves: &PoolReserves, quote: &TradeQuote) -> Result<(), Error> {
    let underlying_after = reserves
        .underlying_balance
        .checked_add(quote.underlying_amount)
        .ok_or(Error::Overflow)?;
    let normalized_after = reserves.normalize(underlying_after)?;
    let virtual_after = reserves
        .virtual_h_token_reserves()?
        .checked_sub(quote.h_token_amount)
        .ok_or(Error::NegativeInterestRate)?;

    if virtual_after < normalized_after {
        return Err(Error::NegativeInterestRate);
    }
    if quote.h_token_amount > reserves.h_token_balance {
        return Err(Error::InsufficientHTokenReserves);
    }
    Ok(())
}

/// Reserves as they will stand once `quote` is settled
pub fn reserves_after_trade(
    reserves: &PoolReserves,
    quote: &TradeQuote,
) -> Result<PoolReserves, Error> {
    let (h_token_balance, underlying_balance) = if quote.kind.h_token_leaves_pool() {
        (
            reserves
                .h_token_balance
                .checked_sub(quote.h_token_amount)
                .ok_or(Error::InsufficientHTokenReserves)?,
            reserves
                .underlying_balance
                .checked_add(quote.underlying_amount)
                .ok_or(Error::Overflow)?,
        )
    } else {
        (
            reserves
                .h_token_balance
                .checked_add(quote.h_token_amount)
                .ok_or(Error::Overflow)?,
            reserves
                .underlying_balance
                .checked_sub(quote.underlying_amount)
                .ok_or(Error::ReservesUnderflow)?,
        )
    };
    Ok(PoolReserves {
        h_token_balance,
        underlying_balance,
        ..reserves.clone()
    })
}
