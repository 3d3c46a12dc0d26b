// ============================================================================
// LIQUIDITY SPECIFICATIONS
// ============================================================================
//
// KEY PROPERTIES:
// 1. Zero deposits and withdrawals are rejected
// 2. The first deposit takes no hToken
// 3. Burning freshly minted shares returns no more than was deposited
// 4. Seeding a pool and burning everything returns the deposit exactly
// 5. Mint and burn keep the implied interest rate non-negative
//
// ============================================================================

use super::model::{nondet_healthy_reserves, nondet_reserves};
use crate::invariants::{
    balance_within_supply, empty_pool_has_no_underlying, interest_rate_non_negative,
    mint_burn_neutral,
};
use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use yieldspace_math::{burn_outputs, mint_inputs, reserves_after_burn, reserves_after_mint};
use yieldspace_types::Error;

/// RULE: Zero deposits and zero burns fail
#[rule]
pub fn zero_liquidity_rejected() {
    let reserves = nondet_reserves();
    cvlr_assert!(mint_inputs(&reserves, 0) == Err(Error::MintZero));
    cvlr_assert!(burn_outputs(&reserves, 0) == Err(Error::BurnZero));
}

/// RULE: Seeding an empty pool requires no hToken
#[rule]
pub fn first_mint_takes_no_h_token(underlying_offered: u128) {
    let reserves = nondet_reserves();
    cvlr_assume!(reserves.total_supply == 0);

    if let Ok(quote) = mint_inputs(&reserves, underlying_offered) {
        cvlr_assert!(quote.h_token_required == 0);
        cvlr_assert!(quote.pool_tokens_minted > 0);
    }
}

/// RULE: Mint then burn never pays out more than was paid in
#[rule]
pub fn mint_burn_never_profits(underlying_offered: u128) {
    let reserves = nondet_reserves();
    // Tokens donated to an empty pool go to the first depositor
    cvlr_assume!(empty_pool_has_no_underlying(&reserves));
    cvlr_assume!(reserves.total_supply > 0 || reserves.h_token_balance == 0);

    if let Ok(mint) = mint_inputs(&reserves, underlying_offered) {
        if let Ok(after) = reserves_after_mint(&reserves, &mint) {
            cvlr_assert!(balance_within_supply(mint.pool_tokens_minted, after.total_supply));
            if let Ok(burn) = burn_outputs(&after, mint.pool_tokens_minted) {
                cvlr_assert!(burn.underlying_returned <= mint.underlying_offered);
                cvlr_assert!(burn.h_token_returned <= mint.h_token_required);
            }
        }
    }
}

/// RULE: The only provider of a fresh pool gets the deposit back in full
#[rule]
pub fn seed_then_exit_is_neutral(underlying_offered: u128) {
    let reserves = nondet_reserves();
    cvlr_assume!(reserves.total_supply == 0);
    cvlr_assume!(reserves.underlying_balance == 0);
    cvlr_assume!(reserves.h_token_balance == 0);

    if let Ok(mint) = mint_inputs(&reserves, underlying_offered) {
        if let Ok(after) = reserves_after_mint(&reserves, &mint) {
            if let Ok(burn) = burn_outputs(&after, mint.pool_tokens_minted) {
                cvlr_assert!(mint_burn_neutral(&mint, &burn));
            }
        }
    }
}

/// RULE: Accepted mints and burns leave virtual hToken covering underlying
#[rule]
pub fn liquidity_preserves_interest_rate(underlying_offered: u128, pool_tokens_burned: u128) {
    let reserves = nondet_healthy_reserves();

    if let Ok(mint) = mint_inputs(&reserves, underlying_offered) {
        if let Ok(after) = reserves_after_mint(&reserves, &mint) {
            cvlr_assert!(interest_rate_non_negative(&after));
        }
    }
    if let Ok(burn) = burn_outputs(&reserves, pool_tokens_burned) {
        if let Ok(after) = reserves_after_burn(&reserves, &burn) {
            cvlr_assert!(interest_rate_non_negative(&after));
            cvlr_assert!(empty_pool_has_no_underlying(&after));
        }
    }
}
