// ============================================================================
// MODEL - nondeterministic pool state
// ============================================================================

use cvlr::asserts::cvlr_assume;
use cvlr::nondet::nondet;
use yieldspace_types::{precision_scalar, PoolReserves};

/// Arbitrary reserves for an underlying with 1..=18 decimals
pub fn nondet_reserves() -> PoolReserves {
    let decimals: u32 = nondet();
    cvlr_assume!(decimals >= 1 && decimals <= 18);

    PoolReserves {
        h_token_balance: nondet(),
        underlying_balance: nondet(),
        total_supply: nondet(),
        underlying_precision_scalar: precision_scalar(decimals).unwrap_or(1),
    }
}

/// Arbitrary reserves that already satisfy the pricing invariants
pub fn nondet_healthy_reserves() -> PoolReserves {
    let reserves = nondet_reserves();
    cvlr_assume!(crate::invariants::virtual_reserves_representable(&reserves));
    cvlr_assume!(crate::invariants::interest_rate_non_negative(&reserves));
    reserves
}
