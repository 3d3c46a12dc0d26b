// ============================================================================
// CERTORA SUNBEAM FORMAL VERIFICATION SPECIFICATIONS
// ============================================================================
//
// Rules for the YieldSpace pool, built on the predicates in invariants.rs.
//
// STRUCTURE:
//
// - model.rs           : Nondeterministic reserve snapshots
// - math_specs.rs      : Fixed-point and yield exponent rules
// - trade_specs.rs     : Trade quoting rules
// - liquidity_specs.rs : Mint/burn quoting rules
//
// USAGE:
// - Certora build: cargo build --features certora -p yieldspace-pool
// - Verification: certoraSorobanProver yieldspace_pool.conf
//
// ============================================================================

pub mod model;

pub mod liquidity_specs;
pub mod math_specs;
pub mod trade_specs;
