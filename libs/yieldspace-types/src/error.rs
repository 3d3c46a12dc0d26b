use soroban_sdk::contracterror;

/// Every way a pool operation can fail.
///
/// Codes are grouped: 1-9 initialization, 10-19 zero amounts, 20-29 time,
/// 30-39 fixed-point arithmetic, 40-49 reserve bounds, 50-59 invariant checks.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    UnderlyingDecimalsOverflow = 2,
    UnderlyingDecimalsZero = 3,

    MintZero = 10,
    BurnZero = 11,
    BuyHTokenZero = 12,
    BuyHTokenUnderlyingZero = 13,
    BuyUnderlyingZero = 14,
    SellHTokenZero = 15,
    SellUnderlyingZero = 16,

    BondMatured = 20,
    TooFarFromMaturity = 21,

    Overflow = 30,
    DivisionByZero = 31,
    Exp2InputTooBig = 32,
    FromUintOverflow = 33,
    VirtualHTokenReservesOverflow = 34,
    Log2InputTooSmall = 35,

    ReservesUnderflow = 40,
    ReservesOverflow = 41,
    ReservesFactorsUnderflow = 42,
    LossyPrecisionUnderflow = 43,

    NegativeInterestRate = 50,
    InsufficientHTokenReserves = 51,
    BurnExceedsBalance = 52,
}
