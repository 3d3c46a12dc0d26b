#![no_std]

mod events;
mod invariants;
mod liquidity;
mod storage;
mod trade;

#[cfg(feature = "certora")]
mod certora_specs;

use soroban_sdk::{contract, contractimpl, token, Address, Env};
use storage::{get_balance, get_config, get_total_supply, has_config, read_reserves, set_config};
use yieldspace_types::{precision_scalar, Error, PoolConfig, PoolReserves, TradeKind};

/// Fixed-maturity AMM between an hToken and its underlying, priced on the
/// YieldSpace invariant.
#[contract]
pub struct YieldSpacePool;

#[contractimpl]
impl YieldSpacePool {
    /// Initialize a new pool
    ///
    /// Reads the underlying's decimals once and stores the precision scalar
    /// used to normalize underlying amounts to 18 decimals.
    pub fn initialize(
        env: Env,
        h_token: Address,
        underlying: Address,
        maturity: u64,
    ) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if maturity <= env.ledger().timestamp() {
            return Err(Error::BondMatured);
        }

        let decimals = token::Client::new(&env, &underlying).decimals();
        let config = PoolConfig {
            h_token,
            underlying,
            maturity,
            underlying_precision_scalar: precision_scalar(decimals)?,
        };
        set_config(&env, &config);
        storage::set_total_supply(&env, 0);

        events::initialized(&env, &config);
        Ok(())
    }

    /// Add liquidity
    ///
    /// # Arguments
    /// * `provider` - Pays the underlying and hToken, receives LP shares
    /// * `underlying_offered` - Underlying deposited, native decimals
    ///
    /// # Returns
    /// LP shares minted
    pub fn mint(env: Env, provider: Address, underlying_offered: u128) -> Result<u128, Error> {
        provider.require_auth();
        liquidity::mint(&env, provider, underlying_offered)
    }

    /// Remove liquidity
    ///
    /// # Returns
    /// (underlying_returned, h_token_returned)
    pub fn burn(
        env: Env,
        provider: Address,
        pool_tokens_burned: u128,
    ) -> Result<(u128, u128), Error> {
        provider.require_auth();
        liquidity::burn(&env, provider, pool_tokens_burned)
    }

    /// Buy an exact amount of hToken with underlying
    ///
    /// # Returns
    /// Underlying paid by `from`
    pub fn buy_h_token(env: Env, from: Address, to: Address, h_token_out: u128) -> Result<u128, Error> {
        from.require_auth();
        trade::execute_trade(&env, from, to, TradeKind::BuyHToken, h_token_out)
    }

    /// Buy an exact amount of underlying with hToken
    ///
    /// # Returns
    /// hToken paid by `from`
    pub fn buy_underlying(
        env: Env,
        from: Address,
        to: Address,
        underlying_out: u128,
    ) -> Result<u128, Error> {
        from.require_auth();
        trade::execute_trade(&env, from, to, TradeKind::BuyUnderlying, underlying_out)
    }

    /// Sell an exact amount of hToken for underlying
    ///
    /// # Returns
    /// Underlying received by `to`
    pub fn sell_h_token(env: Env, from: Address, to: Address, h_token_in: u128) -> Result<u128, Error> {
        from.require_auth();
        trade::execute_trade(&env, from, to, TradeKind::SellHToken, h_token_in)
    }

    /// Sell an exact amount of underlying for hToken
    ///
    /// # Returns
    /// hToken received by `to`
    pub fn sell_underlying(
        env: Env,
        from: Address,
        to: Address,
        underlying_in: u128,
    ) -> Result<u128, Error> {
        from.require_auth();
        trade::execute_trade(&env, from, to, TradeKind::SellUnderlying, underlying_in)
    }

    // === Quotes ===

    pub fn quote_buy_h_token(env: Env, h_token_out: u128) -> Result<u128, Error> {
        Ok(trade::quote(&env, TradeKind::BuyHToken, h_token_out)?.computed_amount())
    }

    pub fn quote_buy_underlying(env: Env, underlying_out: u128) -> Result<u128, Error> {
        Ok(trade::quote(&env, TradeKind::BuyUnderlying, underlying_out)?.computed_amount())
    }

    pub fn quote_sell_h_token(env: Env, h_token_in: u128) -> Result<u128, Error> {
        Ok(trade::quote(&env, TradeKind::SellHToken, h_token_in)?.computed_amount())
    }

    pub fn quote_sell_underlying(env: Env, underlying_in: u128) -> Result<u128, Error> {
        Ok(trade::quote(&env, TradeKind::SellUnderlying, underlying_in)?.computed_amount())
    }

    /// # Returns
    /// (h_token_required, pool_tokens_minted)
    pub fn get_mint_inputs(env: Env, underlying_offered: u128) -> Result<(u128, u128), Error> {
        let quote = liquidity::quote_mint(&env, underlying_offered)?;
        Ok((quote.h_token_required, quote.pool_tokens_minted))
    }

    /// # Returns
    /// (underlying_returned, h_token_returned)
    pub fn get_burn_outputs(env: Env, pool_tokens_burned: u128) -> Result<(u128, u128), Error> {
        let quote = liquidity::quote_burn(&env, pool_tokens_burned)?;
        Ok((quote.underlying_returned, quote.h_token_returned))
    }

    // === View Functions ===

    /// Underlying reserves scaled to 18 decimals
    pub fn normalized_underlying_reserves(env: Env) -> Result<u128, Error> {
        Self::get_reserves(env)?.normalized_underlying_reserves()
    }

    /// hToken balance plus LP supply
    pub fn virtual_h_token_reserves(env: Env) -> Result<u128, Error> {
        Self::get_reserves(env)?.virtual_h_token_reserves()
    }

    /// Current token balances and LP supply
    pub fn get_reserves(env: Env) -> Result<PoolReserves, Error> {
        let config = get_config(&env);
        read_reserves(&env, &config)
    }

    /// Get pool configuration
    pub fn get_config(env: Env) -> PoolConfig {
        get_config(&env)
    }

    /// Total LP shares outstanding
    pub fn total_supply(env: Env) -> u128 {
        get_total_supply(&env)
    }

    /// LP shares held by `id`
    pub fn balance(env: Env, id: Address) -> u128 {
        get_balance(&env, &id)
    }

    pub fn maturity(env: Env) -> u64 {
        get_config(&env).maturity
    }

    pub fn h_token(env: Env) -> Address {
        get_config(&env).h_token
    }

    pub fn underlying(env: Env) -> Address {
        get_config(&env).underlying
    }
}
