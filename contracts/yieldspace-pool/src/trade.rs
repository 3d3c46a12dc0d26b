use crate::events;
use crate::invariants::{interest_rate_non_negative, trade_moves_quoted_amounts};
use crate::storage::{get_config, read_reserves};
use soroban_sdk::{token, Address, Env};
use yieldspace_math::{quote_trade, reserves_after_trade};
use yieldspace_types::{Error, TradeEvent, TradeKind, TradeQuote};

/// Price a trade against the current reserves and ledger time
pub fn quote(env: &Env, kind: TradeKind, amount: u128) -> Result<TradeQuote, Error> {
    let config = get_config(env);
    let reserves = read_reserves(env, &config)?;
    quote_trade(
        &reserves,
        kind,
        amount,
        env.ledger().timestamp(),
        config.maturity,
    )
}

/// Execute a trade
///
/// # Arguments
/// * `from` - Account paying into the pool
/// * `to` - Account receiving from the pool
/// * `kind` - Trade direction
/// * `amount` - Amount fixed by the caller
///
/// # Returns
/// The amount computed by the pool: paid by `from` for buys, received by
/// `to` for sells
pub fn execute_trade(
    env: &Env,
    from: Address,
    to: Address,
    kind: TradeKind,
    amount: u128,
) -> Result<u128, Error> {
    let config = get_config(env);
    let reserves = read_reserves(env, &config)?;
    let quote = quote_trade(
        &reserves,
        kind,
        amount,
        env.ledger().timestamp(),
        config.maturity,
    )?;
    let (underlying_delta, h_token_delta) = quote.signed_amounts()?;

    let after = reserves_after_trade(&reserves, &quote)?;
    debug_assert!(trade_moves_quoted_amounts(&reserves, &after, &quote));
    debug_assert!(!kind.h_token_leaves_pool() || interest_rate_non_negative(&after));

    let contract_address = env.current_contract_address();
    let underlying = token::Client::new(env, &config.underlying);
    let h_token = token::Client::new(env, &config.h_token);

    if kind.h_token_leaves_pool() {
        underlying.transfer(&from, &contract_address, &underlying_delta);
        h_token.transfer(&contract_address, &to, &-h_token_delta);
    } else {
        h_token.transfer(&from, &contract_address, &h_token_delta);
        underlying.transfer(&contract_address, &to, &-underlying_delta);
    }

    events::trade(
        env,
        TradeEvent {
            maturity: config.maturity,
            from,
            to,
            underlying_amount: underlying_delta,
            h_token_amount: h_token_delta,
        },
    );

    Ok(quote.computed_amount())
}
