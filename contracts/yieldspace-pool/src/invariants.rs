// ============================================================================
// INVARIANTS MODULE - For Formal Verification
// ============================================================================
//
// Predicates over reserve snapshots and operation quotes that must hold
// after every state-mutating call. Shared by the unit tests, the Certora
// rules and the debug assertions in the trade and liquidity paths.
//
// INVARIANT CATEGORIES:
//
// 1. PRICING INVARIANTS
//    - Implied interest rate is never negative
//    - Virtual hToken reserves are representable
//
// 2. SUPPLY INVARIANTS
//    - LP balances never exceed the LP supply
//    - An empty pool has no LP supply and vice versa
//
// 3. CONSERVATION INVARIANTS
//    - Trades move exactly the quoted amounts
//    - Mint followed by burn returns the deposit
//
// ============================================================================

use yieldspace_types::{PoolReserves, TradeQuote};
#[cfg(any(test, feature = "certora"))]
use yieldspace_types::{BurnQuote, MintQuote};

// ============================================================================
// PRICING INVARIANTS
// ============================================================================

/// Invariant: an hToken is never worth more than its underlying before maturity
///
/// Property:
///   virtual_h_token_reserves >= normalized_underlying_reserves
pub fn interest_rate_non_negative(reserves: &PoolReserves) -> bool {
    match (
        reserves.virtual_h_token_reserves(),
        reserves.normalized_underlying_reserves(),
    ) {
        (Ok(virtual_h_token), Ok(normalized_underlying)) => virtual_h_token >= normalized_underlying,
        _ => false,
    }
}

/// Invariant: h_token_balance + total_supply fits in a u128
pub fn virtual_reserves_representable(reserves: &PoolReserves) -> bool {
    reserves.virtual_h_token_reserves().is_ok()
}

// ============================================================================
// SUPPLY INVARIANTS
// ============================================================================

/// Invariant: a single holder never owns more shares than exist
pub fn balance_within_supply(balance: u128, total_supply: u128) -> bool {
    balance <= total_supply
}

/// Invariant: the pool only holds underlying while shares are outstanding
///
/// Property:
///   total_supply == 0 => underlying_balance == 0
///
/// Donations to an empty pool break this until the next mint credits them,
/// so the property is only checked on states left behind by a burn.
pub fn empty_pool_has_no_underlying(reserves: &PoolReserves) -> bool {
    reserves.total_supply != 0 || reserves.underlying_balance == 0
}

// ============================================================================
// CONSERVATION INVARIANTS
// ============================================================================

/// Invariant: reserves move by exactly the quoted amounts
///
/// Property:
///   hToken leaves  => h' = h - h_amount and u' = u + u_amount
///   hToken enters  => h' = h + h_amount and u' = u - u_amount
///   LP supply is untouched
pub fn trade_moves_quoted_amounts(
    before: &PoolReserves,
    after: &PoolReserves,
    quote: &TradeQuote,
) -> bool {
    let balances_match = if quote.kind.h_token_leaves_pool() {
        before.h_token_balance.checked_sub(quote.h_token_amount) == Some(after.h_token_balance)
            && before.underlying_balance.checked_add(quote.underlying_amount)
                == Some(after.underlying_balance)
    } else {
        before.h_token_balance.checked_add(quote.h_token_amount) == Some(after.h_token_balance)
            && before.underlying_balance.checked_sub(quote.underlying_amount)
                == Some(after.underlying_balance)
    };
    balances_match && before.total_supply == after.total_supply
}

/// Invariant: burning freshly minted shares returns exactly what was paid
#[cfg(any(test, feature = "certora"))]
pub fn mint_burn_neutral(mint: &MintQuote, burn: &BurnQuote) -> bool {
    mint.pool_tokens_minted == burn.pool_tokens_burned
        && mint.underlying_offered == burn.underlying_returned
        && mint.h_token_required == burn.h_token_returned
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldspace_types::{TradeKind, SCALE};

    fn reserves(h: u128, u: u128, supply: u128) -> PoolReserves {
        PoolReserves {
            h_token_balance: h,
            underlying_balance: u,
            total_supply: supply,
            underlying_precision_scalar: 1,
        }
    }

    #[test]
    fn test_interest_rate_non_negative() {
        assert!(interest_rate_non_negative(&reserves(0, 100 * SCALE, 100 * SCALE)));
        assert!(interest_rate_non_negative(&reserves(10, 110, 100)));
        assert!(!interest_rate_non_negative(&reserves(0, 101, 100)));
        // Unrepresentable reserves never satisfy the invariant
        assert!(!interest_rate_non_negative(&reserves(u128::MAX, 0, 1)));
    }

    #[test]
    fn test_virtual_reserves_representable() {
        assert!(virtual_reserves_representable(&reserves(u128::MAX - 1, 0, 1)));
        assert!(!virtual_reserves_representable(&reserves(u128::MAX, 0, 1)));
    }

    #[test]
    fn test_balance_within_supply() {
        assert!(balance_within_supply(0, 0));
        assert!(balance_within_supply(100, 100));
        assert!(!balance_within_supply(101, 100));
    }

    #[test]
    fn test_empty_pool_has_no_underlying() {
        assert!(empty_pool_has_no_underlying(&reserves(0, 0, 0)));
        assert!(empty_pool_has_no_underlying(&reserves(0, 5, 5)));
        assert!(!empty_pool_has_no_underlying(&reserves(0, 5, 0)));
    }

    #[test]
    fn test_trade_moves_quoted_amounts() {
        let before = reserves(100, 100, 100);
        let quote = TradeQuote {
            kind: TradeKind::BuyHToken,
            underlying_amount: 8,
            h_token_amount: 10,
        };
        assert!(trade_moves_quoted_amounts(&before, &reserves(90, 108, 100), &quote));
        assert!(!trade_moves_quoted_amounts(&before, &reserves(90, 107, 100), &quote));
        assert!(!trade_moves_quoted_amounts(&before, &reserves(90, 108, 101), &quote));

        let quote = TradeQuote {
            kind: TradeKind::SellHToken,
            underlying_amount: 8,
            h_token_amount: 10,
        };
        assert!(trade_moves_quoted_amounts(&before, &reserves(110, 92, 100), &quote));
    }

    #[test]
    fn test_mint_burn_neutral() {
        let mint = MintQuote {
            underlying_offered: 50,
            h_token_required: 20,
            pool_tokens_minted: 50,
        };
        let exact = BurnQuote {
            pool_tokens_burned: 50,
            underlying_returned: 50,
            h_token_returned: 20,
        };
        let short = BurnQuote {
            h_token_returned: 19,
            ..exact.clone()
        };
        assert!(mint_burn_neutral(&mint, &exact));
        assert!(!mint_burn_neutral(&mint, &short));
    }
}
