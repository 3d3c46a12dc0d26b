use crate::events;
use crate::invariants::{
    balance_within_supply, empty_pool_has_no_underlying, interest_rate_non_negative,
    virtual_reserves_representable,
};
use crate::storage::{get_balance, get_config, read_reserves, set_balance, set_total_supply};
use soroban_sdk::{token, Address, Env};
use yieldspace_math::{burn_outputs, mint_inputs, reserves_after_burn, reserves_after_mint};
use yieldspace_types::{AddLiquidityEvent, BurnQuote, Error, MintQuote, RemoveLiquidityEvent};

fn to_i128(amount: u128) -> Result<i128, Error> {
    i128::try_from(amount).map_err(|_| Error::Overflow)
}

/// Price a deposit against the current reserves
pub fn quote_mint(env: &Env, underlying_offered: u128) -> Result<MintQuote, Error> {
    let config = get_config(env);
    let reserves = read_reserves(env, &config)?;
    mint_inputs(&reserves, underlying_offered)
}

/// Price a withdrawal against the current reserves
pub fn quote_burn(env: &Env, pool_tokens_burned: u128) -> Result<BurnQuote, Error> {
    let config = get_config(env);
    let reserves = read_reserves(env, &config)?;
    burn_outputs(&reserves, pool_tokens_burned)
}

/// Mint (add) liquidity: take underlying plus the proportional hToken and
/// issue LP shares to the provider
pub fn mint(env: &Env, provider: Address, underlying_offered: u128) -> Result<u128, Error> {
    let config = get_config(env);
    let reserves = read_reserves(env, &config)?;
    let quote = mint_inputs(&reserves, underlying_offered)?;

    let underlying_amount = to_i128(quote.underlying_offered)?;
    let h_token_amount = to_i128(quote.h_token_required)?;
    let after = reserves_after_mint(&reserves, &quote)?;
    let balance = get_balance(env, &provider)
        .checked_add(quote.pool_tokens_minted)
        .ok_or(Error::Overflow)?;
    debug_assert!(balance_within_supply(balance, after.total_supply));
    debug_assert!(virtual_reserves_representable(&after));
    debug_assert!(interest_rate_non_negative(&after));

    set_total_supply(env, after.total_supply);
    set_balance(env, &provider, balance);

    // Transfer tokens from provider
    let contract_address = env.current_contract_address();
    token::Client::new(env, &config.underlying).transfer(
        &provider,
        &contract_address,
        &underlying_amount,
    );
    if h_token_amount > 0 {
        token::Client::new(env, &config.h_token).transfer(
            &provider,
            &contract_address,
            &h_token_amount,
        );
    }

    events::add_liquidity(
        env,
        AddLiquidityEvent {
            maturity: config.maturity,
            provider,
            underlying_amount: quote.underlying_offered,
            h_token_amount: quote.h_token_required,
            pool_tokens_minted: quote.pool_tokens_minted,
        },
    );

    Ok(quote.pool_tokens_minted)
}

/// Burn (remove) liquidity: destroy the provider's shares and pay out the
/// pro-rata reserves
///
/// # Returns
/// (underlying_returned, h_token_returned)
pub fn burn(env: &Env, provider: Address, pool_tokens_burned: u128) -> Result<(u128, u128), Error> {
    let config = get_config(env);
    let reserves = read_reserves(env, &config)?;
    let quote = burn_outputs(&reserves, pool_tokens_burned)?;

    let balance = get_balance(env, &provider);
    if quote.pool_tokens_burned > balance {
        return Err(Error::BurnExceedsBalance);
    }

    let underlying_amount = to_i128(quote.underlying_returned)?;
    let h_token_amount = to_i128(quote.h_token_returned)?;

    let after = reserves_after_burn(&reserves, &quote)?;
    debug_assert!(interest_rate_non_negative(&after));
    debug_assert!(empty_pool_has_no_underlying(&after));

    set_total_supply(env, after.total_supply);
    set_balance(env, &provider, balance - quote.pool_tokens_burned);

    // Transfer tokens to provider
    let contract_address = env.current_contract_address();
    if underlying_amount > 0 {
        token::Client::new(env, &config.underlying).transfer(
            &contract_address,
            &provider,
            &underlying_amount,
        );
    }
    if h_token_amount > 0 {
        token::Client::new(env, &config.h_token).transfer(
            &contract_address,
            &provider,
            &h_token_amount,
        );
    }

    events::remove_liquidity(
        env,
        RemoveLiquidityEvent {
            maturity: config.maturity,
            provider,
            underlying_amount: quote.underlying_returned,
            h_token_amount: quote.h_token_returned,
            pool_tokens_burned: quote.pool_tokens_burned,
        },
    );

    Ok((quote.underlying_returned, quote.h_token_returned))
}
