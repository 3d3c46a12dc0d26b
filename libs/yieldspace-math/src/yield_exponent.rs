use crate::Fixed60x18;
use ethnum::U256;
use yieldspace_types::{Error, TradeKind, CUTOFF_TIME_TO_MATURITY, K};

/// Seconds left until maturity. Trading stops once maturity is reached.
pub fn time_to_maturity(now: u64, maturity: u64) -> Result<u64, Error> {
    if now >= maturity {
        return Err(Error::BondMatured);
    }
    Ok(maturity - now)
}

/// Yield exponent `1 - g * k * t` for a time to maturity in seconds.
///
/// # Arguments
/// * `time_to_maturity` - Seconds until the hToken matures
/// * `g` - Fee coefficient, g1 or g2
///
/// Fails with `TooFarFromMaturity` past the cutoff or whenever `g * k * t`
/// would reach one.
pub fn yield_exponent(time_to_maturity: u64, g: Fixed60x18) -> Result<Fixed60x18, Error> {
    if time_to_maturity > CUTOFF_TIME_TO_MATURITY {
        return Err(Error::TooFarFromMaturity);
    }
    let t = Fixed60x18::from_uint(U256::from(time_to_maturity))?.mul(Fixed60x18::new(K))?;
    let decay = g.mul(t)?;
    Fixed60x18::ONE
        .checked_sub(decay)
        .filter(|exponent| *exponent > Fixed60x18::ZERO)
        .ok_or(Error::TooFarFromMaturity)
}

/// Yield exponent with the fee coefficient matching the trade direction
pub fn trade_exponent(kind: TradeKind, time_to_maturity: u64) -> Result<Fixed60x18, Error> {
    yield_exponent(time_to_maturity, Fixed60x18::new(kind.fee_coefficient()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldspace_types::{G1, G2, SCALE};

    const ONE_YEAR: u64 = 31_536_000;

    #[test]
    fn test_time_to_maturity() {
        assert_eq!(time_to_maturity(100, 250), Ok(150));
        assert_eq!(time_to_maturity(250, 250), Err(Error::BondMatured));
        assert_eq!(time_to_maturity(251, 250), Err(Error::BondMatured));
    }

    #[test]
    fn test_exponent_one_year_out() {
        assert_eq!(
            yield_exponent(ONE_YEAR, Fixed60x18::new(G1)),
            Ok(Fixed60x18::new(762_499_999_998_236_800))
        );
        assert_eq!(
            yield_exponent(ONE_YEAR, Fixed60x18::new(G2)),
            Ok(Fixed60x18::new(736_842_105_261_204_211))
        );
        assert_eq!(
            yield_exponent(ONE_YEAR, Fixed60x18::ONE),
            Ok(Fixed60x18::new(749_999_999_998_144_000))
        );
    }

    #[test]
    fn test_exponent_at_cutoff() {
        assert_eq!(
            yield_exponent(CUTOFF_TIME_TO_MATURITY, Fixed60x18::new(G1)),
            Ok(Fixed60x18::new(97_500_007_524_375_436))
        );
        assert_eq!(
            yield_exponent(CUTOFF_TIME_TO_MATURITY, Fixed60x18::new(G2)),
            Ok(Fixed60x18::new(8_337_258_101))
        );
    }

    #[test]
    fn test_exponent_past_cutoff() {
        let past = CUTOFF_TIME_TO_MATURITY + 1;
        assert_eq!(
            yield_exponent(past, Fixed60x18::new(G1)),
            Err(Error::TooFarFromMaturity)
        );
        assert_eq!(
            yield_exponent(past, Fixed60x18::new(G2)),
            Err(Error::TooFarFromMaturity)
        );
    }

    #[test]
    fn test_exponent_approaches_one_near_maturity() {
        let e = yield_exponent(1, Fixed60x18::new(G2)).unwrap();
        assert!(e < Fixed60x18::ONE);
        assert!(e > Fixed60x18::new(SCALE - 10_000_000_000));
    }

    #[test]
    fn test_trade_exponent_uses_direction_fee() {
        let e1 = yield_exponent(ONE_YEAR, Fixed60x18::new(G1)).unwrap();
        let e2 = yield_exponent(ONE_YEAR, Fixed60x18::new(G2)).unwrap();
        assert_eq!(trade_exponent(TradeKind::BuyHToken, ONE_YEAR), Ok(e1));
        assert_eq!(trade_exponent(TradeKind::SellUnderlying, ONE_YEAR), Ok(e1));
        assert_eq!(trade_exponent(TradeKind::BuyUnderlying, ONE_YEAR), Ok(e2));
        assert_eq!(trade_exponent(TradeKind::SellHToken, ONE_YEAR), Ok(e2));
    }
}
