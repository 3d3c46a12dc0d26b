use crate::{Error, G1, G2};
use soroban_sdk::contracttype;

/// The four ways to trade against the pool.
///
/// Buy/sell is from the trader's point of view and names the side whose
/// amount is fixed by the caller.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TradeKind {
    /// Exact hToken out, underlying in
    BuyHToken,
    /// Exact underlying out, hToken in
    BuyUnderlying,
    /// Exact hToken in, underlying out
    SellHToken,
    /// Exact underlying in, hToken out
    SellUnderlying,
}

impl TradeKind {
    /// Fee coefficient fed into the yield exponent.
    ///
    /// Underlying flowing in uses g1 (< 1), hToken flowing in uses g2 (> 1).
    /// Both choices shrink what the trader gets.
    pub fn fee_coefficient(&self) -> u128 {
        match self {
            TradeKind::BuyHToken | TradeKind::SellUnderlying => G1,
            TradeKind::BuyUnderlying | TradeKind::SellHToken => G2,
        }
    }

    /// True when the trader receives hToken from the pool
    pub fn h_token_leaves_pool(&self) -> bool {
        matches!(self, TradeKind::BuyHToken | TradeKind::SellUnderlying)
    }

    /// Error for a zero amount on this kind of trade
    pub fn zero_amount_error(&self) -> Error {
        match self {
            TradeKind::BuyHToken => Error::BuyHTokenZero,
            TradeKind::BuyUnderlying => Error::BuyUnderlyingZero,
            TradeKind::SellHToken => Error::SellHTokenZero,
            TradeKind::SellUnderlying => Error::SellUnderlyingZero,
        }
    }
}

// ============================================================================
// OPERATION QUOTES - pure computation results
// Quotes are computed and validated before any token moves, then committed
// ============================================================================

/// Outcome of pricing a trade
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeQuote {
    pub kind: TradeKind,
    /// Underlying moved, in native decimals
    pub underlying_amount: u128,
    /// hToken moved, 18 decimals
    pub h_token_amount: u128,
}

impl TradeQuote {
    /// The amount the caller pays or receives that was not fixed up front
    pub fn computed_amount(&self) -> u128 {
        match self.kind {
            TradeKind::BuyHToken | TradeKind::SellHToken => self.underlying_amount,
            TradeKind::BuyUnderlying | TradeKind::SellUnderlying => self.h_token_amount,
        }
    }

    /// Signed reserve deltas (underlying, hToken) as seen by the pool.
    /// Positive amounts flow into the pool.
    pub fn signed_amounts(&self) -> Result<(i128, i128), Error> {
        let underlying = i128::try_from(self.underlying_amount).map_err(|_| Error::Overflow)?;
        let h_token = i128::try_from(self.h_token_amount).map_err(|_| Error::Overflow)?;
        if self.kind.h_token_leaves_pool() {
            Ok((underlying, -h_token))
        } else {
            Ok((-underlying, h_token))
        }
    }
}

/// Outcome of pricing a liquidity deposit
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintQuote {
    /// Underlying taken from the provider, native decimals
    pub underlying_offered: u128,
    /// hToken taken from the provider
    pub h_token_required: u128,
    /// LP shares issued
    pub pool_tokens_minted: u128,
}

/// Outcome of pricing a liquidity withdrawal
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnQuote {
    pub pool_tokens_burned: u128,
    /// Underlying returned, native decimals
    pub underlying_returned: u128,
    pub h_token_returned: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_coefficient_by_direction() {
        assert_eq!(TradeKind::BuyHToken.fee_coefficient(), G1);
        assert_eq!(TradeKind::SellUnderlying.fee_coefficient(), G1);
        assert_eq!(TradeKind::BuyUnderlying.fee_coefficient(), G2);
        assert_eq!(TradeKind::SellHToken.fee_coefficient(), G2);
    }

    #[test]
    fn test_signed_amounts() {
        let quote = TradeQuote {
            kind: TradeKind::BuyHToken,
            underlying_amount: 30,
            h_token_amount: 31,
        };
        assert_eq!(quote.signed_amounts(), Ok((30, -31)));
        assert_eq!(quote.computed_amount(), 30);

        let quote = TradeQuote {
            kind: TradeKind::SellHToken,
            underlying_amount: 8,
            h_token_amount: 10,
        };
        assert_eq!(quote.signed_amounts(), Ok((-8, 10)));

        let quote = TradeQuote {
            kind: TradeKind::BuyUnderlying,
            underlying_amount: 1,
            h_token_amount: u128::MAX,
        };
        assert_eq!(quote.signed_amounts(), Err(Error::Overflow));
    }
}
