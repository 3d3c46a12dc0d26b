#![no_std]

mod error;
mod events;
mod pool;
mod trade;

pub use error::*;
pub use events::*;
pub use pool::*;
pub use trade::*;

/// 1.0 in 60.18-decimal fixed point
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Fee coefficient applied when underlying is sold to the pool (0.95)
pub const G1: u128 = 950_000_000_000_000_000;

/// Fee coefficient applied when hToken is sold to the pool (1 / 0.95, floored)
pub const G2: u128 = 1_052_631_578_947_368_421;

/// Reciprocal of the seconds in four years, as a 60.18-decimal number
/// 1 / 126_144_000 ~= 7.927447996e-9
pub const K: u128 = 7_927_447_996;

/// Longest time to maturity (in seconds) for which trades are priced.
/// Past this point g2 * k * t reaches 1 and the yield exponent hits zero.
pub const CUTOFF_TIME_TO_MATURITY: u64 = 119_836_799;

/// Decimals of the hToken side, always 18
pub const H_TOKEN_DECIMALS: u32 = 18;
