use crate::mul_div_floor;
use yieldspace_types::{BurnQuote, Error, MintQuote, PoolReserves};

/// Compute the LP shares and hToken owed for an underlying deposit.
///
/// The first deposit seeds the pool with underlying only and mints one
/// share per normalized unit the pool will hold, so underlying sent to an
/// empty pool goes to the first provider. Later deposits mint in proportion
/// to the underlying reserves and take hToken in the same proportion of the
/// pool's hToken balance.
pub fn mint_inputs(reserves: &PoolReserves, underlying_offered: u128) -> Result<MintQuote, Error> {
    if underlying_offered == 0 {
        return Err(Error::MintZero);
    }

    if reserves.total_supply == 0 {
        let underlying_after = reserves
            .underlying_balance
            .checked_add(underlying_offered)
            .ok_or(Error::Overflow)?;
        let quote = MintQuote {
            underlying_offered,
            h_token_required: 0,
            pool_tokens_minted: reserves.normalize(underlying_after)?,
        };
        reserves_after_mint(reserves, &quote)?.check_interest_rate()?;
        return Ok(quote);
    }

    let normalized_offered = reserves.normalize(underlying_offered)?;

    let normalized_reserves = reserves.normalized_underlying_reserves()?;
    let pool_tokens_minted =
        mul_div_floor(reserves.total_supply, normalized_offered, normalized_reserves)?;
    if pool_tokens_minted == 0 {
        return Err(Error::MintZero);
    }
    let h_token_required = mul_div_floor(
        reserves.h_token_balance,
        pool_tokens_minted,
        reserves.total_supply,
    )?;

    let quote = MintQuote {
        underlying_offered,
        h_token_required,
        pool_tokens_minted,
    };
    reserves_after_mint(reserves, &quote)?.check_interest_rate()?;
    Ok(quote)
}

/// Compute the pro-rata underlying and hToken returned for burned shares.
///
/// The underlying share rounds down to whole native units, so the pool can
/// keep a fraction of a unit more than the burned shares cover. A burn that
/// would leave the remaining virtual reserves short of the underlying fails
/// with `NegativeInterestRate`.
pub fn burn_outputs(reserves: &PoolReserves, pool_tokens_burned: u128) -> Result<BurnQuote, Error> {
    if pool_tokens_burned == 0 {
        return Err(Error::BurnZero);
    }
    if reserves.total_supply == 0 {
        return Err(Error::DivisionByZero);
    }
    if pool_tokens_burned > reserves.total_supply {
        return Err(Error::BurnExceedsBalance);
    }

    let normalized_underlying = mul_div_floor(
        pool_tokens_burned,
        reserves.normalized_underlying_reserves()?,
        reserves.total_supply,
    )?;
    let underlying_returned = reserves.denormalize(normalized_underlying);
    let h_token_returned = mul_div_floor(
        pool_tokens_burned,
        reserves.h_token_balance,
        reserves.total_supply,
    )?;

    if underlying_returned == 0 && h_token_returned == 0 {
        return Err(Error::BurnZero);
    }

    let quote = BurnQuote {
        pool_tokens_burned,
        underlying_returned,
        h_token_returned,
    };
    reserves_after_burn(reserves, &quote)?.check_interest_rate()?;
    Ok(quote)
}

/// Reserves once a mint is settled
pub fn reserves_after_mint(reserves: &PoolReserves, quote: &MintQuote) -> Result<PoolReserves, Error> {
    Ok(PoolReserves {
        h_token_balance: reserves
            .h_token_balance
            .checked_add(quote.h_token_required)
            .ok_or(Error::Overflow)?,
        underlying_balance: reserves
            .underlying_balance
            .checked_add(quote.underlying_offered)
            .ok_or(Error::Overflow)?,
        total_supply: reserves
            .total_supply
            .checked_add(quote.pool_tokens_minted)
            .ok_or(Error::Overflow)?,
        underlying_precision_scalar: reserves.underlying_precision_scalar,
    })
}

/// Reserves once a burn is settled
pub fn reserves_after_burn(reserves: &PoolReserves, quote: &BurnQuote) -> Result<PoolReserves, Error> {
    Ok(PoolReserves {
        h_token_balance: reserves
            .h_token_balance
            .checked_sub(quote.h_token_returned)
            .ok_or(Error::ReservesUnderflow)?,
        underlying_balance: reserves
            .underlying_balance
            .checked_sub(quote.underlying_returned)
            .ok_or(Error::ReservesUnderflow)?,
        total_supply: reserves
            .total_supply
            .checked_sub(quote.pool_tokens_burned)
            .ok_or(Error::BurnExceedsBalance)?,
        underlying_precision_scalar: reserves.underlying_precision_scalar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldspace_types::SCALE;

    const SCALAR: u128 = 100_000_000_000;

    fn reserves(h: u128, u_native: u128, supply: u128) -> PoolReserves {
        PoolReserves {
            h_token_balance: h,
            underlying_balance: u_native,
            total_supply: supply,
            underlying_precision_scalar: SCALAR,
        }
    }

    #[test]
    fn test_first_mint_seeds_with_underlying_only() {
        let quote = mint_inputs(&reserves(0, 0, 0), 1_000_000_000).unwrap();
        assert_eq!(quote.pool_tokens_minted, 100 * SCALE);
        assert_eq!(quote.h_token_required, 0);
    }

    #[test]
    fn test_first_mint_credits_underlying_already_held() {
        // 10 underlying sent to the empty pool before anyone minted
        let quote = mint_inputs(&reserves(0, 100_000_000, 0), 1_000_000_000).unwrap();
        assert_eq!(quote.pool_tokens_minted, 110 * SCALE);
        assert_eq!(quote.h_token_required, 0);

        let after = reserves_after_mint(&reserves(0, 100_000_000, 0), &quote).unwrap();
        assert_eq!(after.check_interest_rate(), Ok(()));
        assert_eq!(
            after.virtual_h_token_reserves(),
            after.normalized_underlying_reserves()
        );
    }

    #[test]
    fn test_first_mint_ignores_h_token_already_held() {
        let quote = mint_inputs(&reserves(5 * SCALE, 0, 0), 1_000_000_000).unwrap();
        assert_eq!(quote.pool_tokens_minted, 100 * SCALE);
        assert_eq!(quote.h_token_required, 0);
    }

    #[test]
    fn test_mint_zero() {
        assert_eq!(mint_inputs(&reserves(0, 0, 0), 0), Err(Error::MintZero));
        // 1 native unit against a huge pool mints nothing
        assert_eq!(
            mint_inputs(&reserves(0, 1_000_000_000_000_000, 1), 1),
            Err(Error::MintZero)
        );
    }

    #[test]
    fn test_mint_into_drained_pool() {
        assert_eq!(
            mint_inputs(&reserves(0, 0, SCALE), 10),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn test_proportional_mint() {
        let r = reserves(40 * SCALE, 1_000_000_000, 100 * SCALE);
        let quote = mint_inputs(&r, 500_000_000).unwrap();
        assert_eq!(quote.pool_tokens_minted, 50 * SCALE);
        assert_eq!(quote.h_token_required, 20 * SCALE);
    }

    #[test]
    fn test_mint_then_burn_returns_deposit() {
        let r = reserves(40 * SCALE, 1_000_000_000, 100 * SCALE);
        let mint = mint_inputs(&r, 500_000_000).unwrap();
        let after = reserves_after_mint(&r, &mint).unwrap();

        let burn = burn_outputs(&after, mint.pool_tokens_minted).unwrap();
        assert_eq!(burn.underlying_returned, mint.underlying_offered);
        assert_eq!(burn.h_token_returned, mint.h_token_required);
    }

    #[test]
    fn test_burn_pro_rata() {
        let r = reserves(60 * SCALE, 1_500_000_000, 150 * SCALE);
        let quote = burn_outputs(&r, 15 * SCALE).unwrap();
        assert_eq!(quote.underlying_returned, 150_000_000);
        assert_eq!(quote.h_token_returned, 6 * SCALE);
    }

    #[test]
    fn test_burn_errors() {
        let r = reserves(60 * SCALE, 1_500_000_000, 150 * SCALE);
        assert_eq!(burn_outputs(&r, 0), Err(Error::BurnZero));
        assert_eq!(
            burn_outputs(&r, 150 * SCALE + 1),
            Err(Error::BurnExceedsBalance)
        );
        assert_eq!(
            burn_outputs(&reserves(0, 0, 0), 1),
            Err(Error::DivisionByZero)
        );
        // 1 share of 150e18 is worth less than one unit of either token
        assert_eq!(burn_outputs(&reserves(0, 1_500_000_000, 150 * SCALE), 1), Err(Error::BurnZero));
    }

    #[test]
    fn test_burn_keeping_rounded_off_underlying_is_negative_interest() {
        // Burning 1e11 + 1 shares returns one native unit and leaves the pool
        // holding more normalized underlying than remaining shares
        let r = reserves(0, 1_000_000_000, 100 * SCALE);
        assert_eq!(
            burn_outputs(&r, 100_000_000_001),
            Err(Error::NegativeInterestRate)
        );

        // Whole native units burn cleanly
        let quote = burn_outputs(&r, 100_000_000_000).unwrap();
        assert_eq!(quote.underlying_returned, 1);
        let after = reserves_after_burn(&r, &quote).unwrap();
        assert_eq!(after.check_interest_rate(), Ok(()));
    }

    #[test]
    fn test_burn_rounding_absorbed_by_h_token_reserves() {
        let r = reserves(SCALE, 1_000_000_000, 100 * SCALE);
        let quote = burn_outputs(&r, 100_000_000_001).unwrap();
        assert_eq!(quote.underlying_returned, 1);
        assert_eq!(quote.h_token_returned, 1_000_000_000);
        let after = reserves_after_burn(&r, &quote).unwrap();
        assert_eq!(after.check_interest_rate(), Ok(()));
    }

    #[test]
    fn test_burn_everything_empties_pool() {
        let r = reserves(60 * SCALE, 1_500_000_000, 150 * SCALE);
        let quote = burn_outputs(&r, 150 * SCALE).unwrap();
        let after = reserves_after_burn(&r, &quote).unwrap();
        assert_eq!(after, reserves(0, 0, 0));
    }

    #[test]
    fn test_mint_overflow() {
        let r = reserves(u128::MAX, 1, u128::MAX);
        assert_eq!(mint_inputs(&r, 2), Err(Error::Overflow));
    }
}
