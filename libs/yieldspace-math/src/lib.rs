#![no_std]

pub mod fixed_point;
pub mod liquidity_math;
pub mod trade_math;
pub mod yield_exponent;
pub mod yield_space;

pub use fixed_point::*;
pub use liquidity_math::*;
pub use trade_math::*;
pub use yield_exponent::*;
pub use yield_space::*;
