use soroban_sdk::{log, Env, Symbol};
use yieldspace_types::{AddLiquidityEvent, PoolConfig, RemoveLiquidityEvent, TradeEvent};

pub fn initialized(env: &Env, config: &PoolConfig) {
    env.events().publish(
        (Symbol::new(env, "initialize"), config.h_token.clone()),
        (
            config.underlying.clone(),
            config.maturity,
            config.underlying_precision_scalar,
        ),
    );
}

pub fn add_liquidity(env: &Env, event: AddLiquidityEvent) {
    log!(
        env,
        "add_liquidity",
        event.underlying_amount,
        event.h_token_amount,
        event.pool_tokens_minted
    );
    env.events().publish(
        (Symbol::new(env, "add_liquidity"), event.provider.clone()),
        event,
    );
}

pub fn remove_liquidity(env: &Env, event: RemoveLiquidityEvent) {
    log!(
        env,
        "remove_liquidity",
        event.underlying_amount,
        event.h_token_amount,
        event.pool_tokens_burned
    );
    env.events().publish(
        (Symbol::new(env, "remove_liquidity"), event.provider.clone()),
        event,
    );
}

pub fn trade(env: &Env, event: TradeEvent) {
    log!(env, "trade", event.underlying_amount, event.h_token_amount);
    env.events().publish(
        (Symbol::new(env, "trade"), event.from.clone(), event.to.clone()),
        event,
    );
}

