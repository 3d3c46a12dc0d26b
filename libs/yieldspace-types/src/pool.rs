use crate::{Error, H_TOKEN_DECIMALS};
use soroban_sdk::{contracttype, Address};

/// Pool configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// hToken (fixed-maturity bond) address, 18 decimals
    pub h_token: Address,
    /// Underlying token address
    pub underlying: Address,
    /// Unix timestamp at which the hToken matures
    pub maturity: u64,
    /// 10^(18 - underlying decimals)
    pub underlying_precision_scalar: u128,
}

/// Snapshot of what the pool holds, read fresh for every operation.
///
/// Token balances are the pool contract's own balances on the token
/// contracts, so anything sent to the pool directly is part of the reserves.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolReserves {
    /// hToken balance held by the pool (18 decimals)
    pub h_token_balance: u128,
    /// Underlying balance held by the pool (native decimals)
    pub underlying_balance: u128,
    /// Total supply of LP shares
    pub total_supply: u128,
    /// 10^(18 - underlying decimals)
    pub underlying_precision_scalar: u128,
}

impl PoolReserves {
    /// hToken balance plus the LP share supply.
    ///
    /// Counting the shares as hToken keeps the pool's implied interest rate
    /// non-negative while it holds no real hToken.
    pub fn virtual_h_token_reserves(&self) -> Result<u128, Error> {
        self.h_token_balance
            .checked_add(self.total_supply)
            .ok_or(Error::VirtualHTokenReservesOverflow)
    }

    /// Underlying balance scaled to 18 decimals
    pub fn normalized_underlying_reserves(&self) -> Result<u128, Error> {
        self.normalize(self.underlying_balance)
    }

    /// Fails with `NegativeInterestRate` when the virtual hToken reserves
    /// no longer cover the normalized underlying reserves
    pub fn check_interest_rate(&self) -> Result<(), Error> {
        if self.virtual_h_token_reserves()? < self.normalized_underlying_reserves()? {
            return Err(Error::NegativeInterestRate);
        }
        Ok(())
    }

    /// Scale a native underlying amount up to 18 decimals
    pub fn normalize(&self, amount: u128) -> Result<u128, Error> {
        normalize(amount, self.underlying_precision_scalar)
    }

    /// Scale an 18-decimal amount down to native underlying decimals (floor)
    pub fn denormalize(&self, amount: u128) -> u128 {
        denormalize(amount, self.underlying_precision_scalar)
    }
}

/// Precision scalar for an underlying with `decimals` decimals.
///
/// Zero decimals and anything above 18 are rejected.
pub fn precision_scalar(decimals: u32) -> Result<u128, Error> {
    if decimals == 0 {
        return Err(Error::UnderlyingDecimalsZero);
    }
    if decimals > H_TOKEN_DECIMALS {
        return Err(Error::UnderlyingDecimalsOverflow);
    }
    Ok(10u128.pow(H_TOKEN_DECIMALS - decimals))
}

pub fn normalize(amount: u128, scalar: u128) -> Result<u128, Error> {
    amount.checked_mul(scalar).ok_or(Error::Overflow)
}

pub fn denormalize(amount: u128, scalar: u128) -> u128 {
    // scalar is at least 1 for any configured pool
    amount / scalar.max(1)
}
