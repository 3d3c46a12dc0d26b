// ============================================================================
// MATH SPECIFICATIONS
// ============================================================================
//
// KEY PROPERTIES:
// 1. The yield exponent stays in (0, 1] inside the pricing window
// 2. Trading stops at maturity
// 3. mul_div_floor never rounds up
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume, cvlr_satisfy};
use cvlr_soroban_derive::rule;
use yieldspace_math::{mul_div_floor, time_to_maturity, yield_exponent, Fixed60x18};
use yieldspace_types::{Error, CUTOFF_TIME_TO_MATURITY, G1, G2};

/// RULE: Sanity - the exponent is reachable
#[rule]
pub fn sanity_yield_exponent(ttm: u64) {
    cvlr_assume!(ttm <= CUTOFF_TIME_TO_MATURITY);
    let exponent = yield_exponent(ttm, Fixed60x18::new(G1));
    cvlr_satisfy!(exponent.is_ok());
}

/// RULE: The exponent is in (0, 1] for both fee coefficients
#[rule]
pub fn yield_exponent_bounded(ttm: u64) {
    cvlr_assume!(ttm <= CUTOFF_TIME_TO_MATURITY);
    for g in [G1, G2] {
        if let Ok(exponent) = yield_exponent(ttm, Fixed60x18::new(g)) {
            cvlr_assert!(exponent > Fixed60x18::ZERO);
            cvlr_assert!(exponent <= Fixed60x18::ONE);
        }
    }
}

/// RULE: Past the cutoff every exponent is rejected
#[rule]
pub fn yield_exponent_rejects_past_cutoff(ttm: u64) {
    cvlr_assume!(ttm > CUTOFF_TIME_TO_MATURITY);
    cvlr_assert!(yield_exponent(ttm, Fixed60x18::new(G1)) == Err(Error::TooFarFromMaturity));
}

/// RULE: No time to maturity at or after maturity
#[rule]
pub fn matured_bond_rejected(now: u64, maturity: u64) {
    cvlr_assume!(now >= maturity);
    cvlr_assert!(time_to_maturity(now, maturity) == Err(Error::BondMatured));
}

/// RULE: mul_div_floor rounds down
#[rule]
pub fn mul_div_floor_rounds_down(a: u128, b: u128, c: u128) {
    cvlr_assume!(c > 0);
    cvlr_assume!(a <= u64::MAX as u128);
    cvlr_assume!(b <= u64::MAX as u128);

    if let Ok(result) = mul_div_floor(a, b, c) {
        cvlr_assert!(result * c <= a * b);
        cvlr_assert!(a * b - result * c < c);
    }
}
