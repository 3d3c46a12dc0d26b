// ============================================================================
// TRADE SPECIFICATIONS
// ============================================================================
//
// KEY PROPERTIES:
// 1. Zero amounts are always rejected
// 2. Successful hToken outflows keep the interest rate non-negative
// 3. Settled reserves move by exactly the quoted amounts
//
// ============================================================================

use super::model::nondet_healthy_reserves;
use crate::invariants::{interest_rate_non_negative, trade_moves_quoted_amounts};
use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use yieldspace_math::{quote_trade, reserves_after_trade};
use yieldspace_types::TradeKind;

fn kind_from(selector: u32) -> TradeKind {
    match selector % 4 {
        0 => TradeKind::BuyHToken,
        1 => TradeKind::BuyUnderlying,
        2 => TradeKind::SellHToken,
        _ => TradeKind::SellUnderlying,
    }
}

/// RULE: A zero amount never produces a quote
#[rule]
pub fn zero_trade_rejected(selector: u32, now: u64, maturity: u64) {
    let reserves = nondet_healthy_reserves();
    let kind = kind_from(selector);
    cvlr_assert!(quote_trade(&reserves, kind, 0, now, maturity) == Err(kind.zero_amount_error()));
}

/// RULE: Trades keep the implied interest rate non-negative
#[rule]
pub fn trade_preserves_interest_rate(selector: u32, amount: u128, now: u64, maturity: u64) {
    let reserves = nondet_healthy_reserves();
    let kind = kind_from(selector);

    if let Ok(quote) = quote_trade(&reserves, kind, amount, now, maturity) {
        if let Ok(after) = reserves_after_trade(&reserves, &quote) {
            cvlr_assert!(interest_rate_non_negative(&after));
        }
    }
}

/// RULE: Settlement moves exactly the quoted amounts
#[rule]
pub fn trade_settles_quote(selector: u32, amount: u128, now: u64, maturity: u64) {
    cvlr_assume!(amount > 0);
    let reserves = nondet_healthy_reserves();

    if let Ok(quote) = quote_trade(&reserves, kind_from(selector), amount, now, maturity) {
        cvlr_assert!(quote.underlying_amount > 0 && quote.h_token_amount > 0);
        if let Ok(after) = reserves_after_trade(&reserves, &quote) {
            cvlr_assert!(trade_moves_quoted_amounts(&reserves, &after, &quote));
        }
    }
}
