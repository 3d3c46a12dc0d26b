use ethnum::U256;
use yieldspace_types::{Error, SCALE};

const HALF_SCALE: u128 = SCALE / 2;

/// Fractional powers of two in 64.64 binary fixed point.
/// Entry `i` is 2^(2^-(i+1)) * 2^64, rounded to nearest.
const EXP2_FACTORS: [u128; 64] = [
    0x16A09E667F3BCC909,
    0x1306FE0A31B7152DF,
    0x1172B83C7D517ADCE,
    0x10B5586CF9890F62A,
    0x1059B0D31585743AE,
    0x102C9A3E778060EE7,
    0x10163DA9FB33356D8,
    0x100B1AFA5ABCBED61,
    0x10058C86DA1C09EA2,
    0x1002C605E2E8CEC50,
    0x100162F3904051FA1,
    0x1000B175EFFDC76BA,
    0x100058BA01FB9F96D,
    0x10002C5CC37DA9492,
    0x1000162E525EE0547,
    0x10000B17255775C04,
    0x1000058B91B5BC9AE,
    0x100002C5C89D5EC6D,
    0x10000162E43F4F831,
    0x100000B1721BCFC9A,
    0x10000058B90CF1E6E,
    0x1000002C5C863B73F,
    0x100000162E430E5A2,
    0x1000000B172183551,
    0x100000058B90C0B49,
    0x10000002C5C8601CC,
    0x1000000162E42FFF0,
    0x10000000B17217FBB,
    0x1000000058B90BFCE,
    0x100000002C5C85FE3,
    0x10000000162E42FF1,
    0x100000000B17217F8,
    0x10000000058B90BFC,
    0x1000000002C5C85FE,
    0x100000000162E42FF,
    0x1000000000B17217F,
    0x100000000058B90C0,
    0x10000000002C5C860,
    0x1000000000162E430,
    0x10000000000B17218,
    0x1000000000058B90C,
    0x100000000002C5C86,
    0x10000000000162E43,
    0x100000000000B1721,
    0x10000000000058B91,
    0x1000000000002C5C8,
    0x100000000000162E4,
    0x1000000000000B172,
    0x100000000000058B9,
    0x10000000000002C5D,
    0x1000000000000162E,
    0x10000000000000B17,
    0x1000000000000058C,
    0x100000000000002C6,
    0x10000000000000163,
    0x100000000000000B1,
    0x10000000000000059,
    0x1000000000000002C,
    0x10000000000000016,
    0x1000000000000000B,
    0x10000000000000006,
    0x10000000000000003,
    0x10000000000000001,
    0x10000000000000001,
];

/// Unsigned 60.18-decimal fixed-point number backed by a 256-bit integer.
///
/// The raw value is the number times 10^18, so `Fixed60x18::new(SCALE)` is 1.0.
/// Arithmetic never wraps: overflow and division by zero surface as [`Error`].
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Fixed60x18(U256);

impl Fixed60x18 {
    pub const ZERO: Self = Self(U256::ZERO);
    pub const ONE: Self = Self(U256::new(SCALE));
    pub const MAX: Self = Self(U256::MAX);

    /// Wrap a raw 18-decimal value
    pub const fn new(raw: u128) -> Self {
        Self(U256::new(raw))
    }

    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> U256 {
        self.0
    }

    /// Convert back to a raw u128, failing when the value needs more bits
    pub fn to_u128(self) -> Result<u128, Error> {
        let (high, low) = self.0.into_words();
        if high != 0 {
            return Err(Error::Overflow);
        }
        Ok(low)
    }

    /// Turn a whole number into fixed point (x * 10^18)
    pub fn from_uint(x: U256) -> Result<Self, Error> {
        if x > U256::MAX / U256::new(SCALE) {
            return Err(Error::FromUintOverflow);
        }
        Ok(Self(x * U256::new(SCALE)))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn abs_diff(self, rhs: Self) -> Self {
        if self >= rhs {
            Self(self.0 - rhs.0)
        } else {
            Self(rhs.0 - self.0)
        }
    }

    /// x * y / 10^18, rounded half up
    pub fn mul(self, rhs: Self) -> Result<Self, Error> {
        let product = self.0.checked_mul(rhs.0).ok_or(Error::Overflow)?;
        let rounded = product
            .checked_add(U256::new(HALF_SCALE))
            .ok_or(Error::Overflow)?;
        Ok(Self(rounded / U256::new(SCALE)))
    }

    /// x * 10^18 / y, rounded half up
    pub fn div(self, rhs: Self) -> Result<Self, Error> {
        if rhs.0 == U256::ZERO {
            return Err(Error::DivisionByZero);
        }
        let numerator = self
            .0
            .checked_mul(U256::new(SCALE))
            .ok_or(Error::Overflow)?
            .checked_add(rhs.0 >> 1u32)
            .ok_or(Error::Overflow)?;
        Ok(Self(numerator / rhs.0))
    }

    /// 1 / x, rounded down
    pub fn inv(self) -> Result<Self, Error> {
        if self.0 == U256::ZERO {
            return Err(Error::DivisionByZero);
        }
        Ok(Self(U256::new(SCALE * SCALE) / self.0))
    }

    /// Binary logarithm for x >= 1.
    ///
    /// Integer part from the most significant bit, fraction by repeated
    /// squaring. Inputs below one would need a signed result and fail with
    /// `Log2InputTooSmall`.
    pub(crate) fn log2(self) -> Result<Self, Error> {
        if self < Self::ONE {
            return Err(Error::Log2InputTooSmall);
        }
        let scale = U256::new(SCALE);
        let n = msb(self.0 / scale);
        let mut result = U256::from(n) * scale;

        let mut y = self.0 >> n;
        if y == scale {
            return Ok(Self(result));
        }

        let double_scale = U256::new(2 * SCALE);
        let mut delta = U256::new(HALF_SCALE);
        while delta > U256::ZERO {
            y = (y * y) / scale;
            if y >= double_scale {
                result += delta;
                y >>= 1u32;
            }
            delta >>= 1u32;
        }
        Ok(Self(result))
    }

    /// Binary exponent, 2^x.
    ///
    /// The input is converted to 192.64 binary fixed point and each set
    /// fraction bit multiplies in one factor from [`EXP2_FACTORS`].
    pub(crate) fn exp2(self) -> Result<Self, Error> {
        if self.0 >= U256::new(192 * SCALE) {
            return Err(Error::Exp2InputTooBig);
        }
        let x_192x64 = (self.0 << 64u32) / U256::new(SCALE);
        let low = x_192x64.as_u128();
        let int_part = (low >> 64) as u32;
        let fraction = low as u64;

        // Starts at 0.5 in 64.192 and stays below 2^192, so each product fits
        let mut result = U256::ONE << 191u32;
        for (i, factor) in EXP2_FACTORS.iter().enumerate() {
            if fraction & (1u64 << (63 - i)) != 0 {
                result = (result * U256::new(*factor)) >> 64u32;
            }
        }

        result *= U256::new(SCALE);
        result >>= 191 - int_part;
        Ok(Self(result))
    }

    /// x^y for fixed-point base and exponent.
    ///
    /// 0^0 = 1, 0^y = 0, x^0 = 1 and 1^y = 1. Bases below one go through
    /// the inverse so the logarithm stays non-negative.
    pub fn pow(self, y: Self) -> Result<Self, Error> {
        if self == Self::ZERO {
            return Ok(if y == Self::ZERO { Self::ONE } else { Self::ZERO });
        }
        if y == Self::ZERO || self == Self::ONE {
            return Ok(Self::ONE);
        }
        if y == Self::ONE {
            return Ok(self);
        }

        if self > Self::ONE {
            return self.log2()?.mul(y)?.exp2();
        }

        let inverse = self.inv()?;
        inverse.log2()?.mul(y)?.exp2()?.inv()
    }
}

/// Index of the most significant set bit. `x` must be non-zero.
fn msb(x: U256) -> u32 {
    255 - x.leading_zeros()
}

/// a * b / denominator with a 256-bit intermediate, rounded down
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128, Error> {
    if denominator == 0 {
        return Err(Error::DivisionByZero);
    }
    let result = U256::from(a) * U256::from(b) / U256::from(denominator);
    Fixed60x18::from_raw(result).to_u128()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fx(raw: u128) -> Fixed60x18 {
        Fixed60x18::new(raw)
    }

    #[test]
    fn test_mul_rounds_half_up() {
        assert_eq!(fx(2 * SCALE).mul(fx(3 * SCALE)), Ok(fx(6 * SCALE)));
        // 0.5e-18 * 1 rounds up to 1e-18
        assert_eq!(fx(1).mul(fx(HALF_SCALE)), Ok(fx(1)));
        assert_eq!(fx(1).mul(fx(HALF_SCALE - 1)), Ok(fx(0)));
        assert_eq!(Fixed60x18::MAX.mul(fx(2)), Err(Error::Overflow));
    }

    #[test]
    fn test_div() {
        assert_eq!(fx(SCALE).div(fx(G1_RAW)), Ok(fx(yieldspace_types::G2)));
        assert_eq!(fx(6 * SCALE).div(fx(3 * SCALE)), Ok(fx(2 * SCALE)));
        assert_eq!(fx(SCALE).div(Fixed60x18::ZERO), Err(Error::DivisionByZero));
        assert_eq!(Fixed60x18::MAX.div(fx(SCALE)), Err(Error::Overflow));
    }

    const G1_RAW: u128 = yieldspace_types::G1;

    #[test]
    fn test_from_uint() {
        assert_eq!(Fixed60x18::from_uint(U256::new(5)), Ok(fx(5 * SCALE)));
        assert_eq!(
            Fixed60x18::from_uint(U256::MAX),
            Err(Error::FromUintOverflow)
        );
    }

    #[test]
    fn test_to_u128() {
        assert_eq!(fx(42).to_u128(), Ok(42));
        assert_eq!(Fixed60x18::MAX.to_u128(), Err(Error::Overflow));
    }

    #[test]
    fn test_log2() {
        assert_eq!(Fixed60x18::ONE.log2(), Ok(Fixed60x18::ZERO));
        assert_eq!(fx(8 * SCALE).log2(), Ok(fx(3 * SCALE)));
        assert_eq!(fx(2 * SCALE).log2(), Ok(fx(SCALE)));
    }

    #[test]
    fn test_log2_below_one_is_an_error() {
        assert_eq!(fx(HALF_SCALE).log2(), Err(Error::Log2InputTooSmall));
        assert_eq!(fx(SCALE - 1).log2(), Err(Error::Log2InputTooSmall));
        assert_eq!(Fixed60x18::ZERO.log2(), Err(Error::Log2InputTooSmall));
    }

    #[test]
    fn test_exp2() {
        assert_eq!(Fixed60x18::ZERO.exp2(), Ok(Fixed60x18::ONE));
        assert_eq!(fx(3 * SCALE).exp2(), Ok(fx(8 * SCALE)));
        assert_eq!(fx(192 * SCALE).exp2(), Err(Error::Exp2InputTooBig));
        assert!(fx(191 * SCALE).exp2().is_ok());
    }

    #[test]
    fn test_pow_edge_cases() {
        assert_eq!(Fixed60x18::ZERO.pow(Fixed60x18::ZERO), Ok(Fixed60x18::ONE));
        assert_eq!(Fixed60x18::ZERO.pow(fx(HALF_SCALE)), Ok(Fixed60x18::ZERO));
        assert_eq!(fx(7 * SCALE).pow(Fixed60x18::ZERO), Ok(Fixed60x18::ONE));
        assert_eq!(Fixed60x18::ONE.pow(fx(123 * SCALE)), Ok(Fixed60x18::ONE));
        assert_eq!(fx(12_345).pow(Fixed60x18::ONE), Ok(fx(12_345)));
    }

    #[test]
    fn test_pow_values() {
        // sqrt(2)
        assert_eq!(
            fx(2 * SCALE).pow(fx(HALF_SCALE)),
            Ok(fx(1_414_213_562_373_095_048))
        );
        assert_eq!(fx(2 * SCALE).pow(fx(3 * SCALE)), Ok(fx(8 * SCALE)));
        assert_eq!(
            fx(2 * SCALE).pow(fx(762_500_000_000_000_000)),
            Ok(fx(1_696_427_764_457_314_008))
        );
        assert_eq!(
            fx(1_500_000_000_000_000_000).pow(fx(HALF_SCALE)),
            Ok(fx(1_224_744_871_391_589_042))
        );
    }

    #[test]
    fn test_pow_result_too_large() {
        assert_eq!(
            fx(2 * SCALE).pow(fx(192 * SCALE)),
            Err(Error::Exp2InputTooBig)
        );
    }

    #[test]
    fn test_pow_base_below_one() {
        // sqrt(1/3)
        assert_eq!(
            fx(333_333_333_333_333_333).pow(fx(HALF_SCALE)),
            Ok(fx(577_350_269_189_625_767))
        );
    }

    #[test]
    fn test_mul_div_floor() {
        assert_eq!(
            mul_div_floor(100 * SCALE, 50 * SCALE, 100 * SCALE),
            Ok(50 * SCALE)
        );
        assert_eq!(mul_div_floor(10, 10, 3), Ok(33));
        assert_eq!(mul_div_floor(1, 1, 0), Err(Error::DivisionByZero));
        assert_eq!(mul_div_floor(u128::MAX, 2, 1), Err(Error::Overflow));
    }
}
