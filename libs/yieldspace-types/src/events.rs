use soroban_sdk::{contracttype, Address};

/// Emitted on every trade. Amounts are signed from the pool's side:
/// positive flows in, negative flows out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeEvent {
    pub maturity: u64,
    pub from: Address,
    pub to: Address,
    pub underlying_amount: i128,
    pub h_token_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddLiquidityEvent {
    pub maturity: u64,
    pub provider: Address,
    pub underlying_amount: u128,
    pub h_token_amount: u128,
    pub pool_tokens_minted: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoveLiquidityEvent {
    pub maturity: u64,
    pub provider: Address,
    pub underlying_amount: u128,
    pub h_token_amount: u128,
    pub pool_tokens_burned: u128,
}
