use soroban_sdk::{contracttype, token, Address, Env};
use yieldspace_types::{Error, PoolConfig, PoolReserves};

// ============================================================================
// STORAGE LAYOUT
// ============================================================================
// - Config and LP total supply live in Instance storage (read on every call)
// - LP balances live in Persistent storage, one entry per holder
// - Token reserves are never stored: they are the pool's balances on the
//   hToken and underlying contracts, read fresh for each operation
// ============================================================================

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool configuration (Instance storage)
    Config,
    /// LP share supply (Instance storage)
    TotalSupply,
    /// LP share balance per holder (Persistent storage)
    Balance(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> PoolConfig {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("Pool not initialized")
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === LP supply ===

pub fn get_total_supply(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: u128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    extend_instance_ttl(env);
}

// === LP balances ===

pub fn get_balance(env: &Env, owner: &Address) -> u128 {
    let key = DataKey::Balance(owner.clone());
    let balance = env.storage().persistent().get(&key).unwrap_or(0);
    if balance > 0 {
        extend_persistent_ttl(env, &key);
    }
    balance
}

pub fn set_balance(env: &Env, owner: &Address, balance: u128) {
    let key = DataKey::Balance(owner.clone());
    if balance == 0 {
        // Drop empty balances
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        extend_persistent_ttl(env, &key);
    }
}

// === Reserves ===

/// The pool's own balance on a token contract
fn token_balance(env: &Env, token: &Address) -> Result<u128, Error> {
    let balance = token::Client::new(env, token).balance(&env.current_contract_address());
    u128::try_from(balance).map_err(|_| Error::Overflow)
}

/// Snapshot of token balances and LP supply for pricing
pub fn read_reserves(env: &Env, config: &PoolConfig) -> Result<PoolReserves, Error> {
    Ok(PoolReserves {
        h_token_balance: token_balance(env, &config.h_token)?,
        underlying_balance: token_balance(env, &config.underlying)?,
        total_supply: get_total_supply(env),
        underlying_precision_scalar: config.underlying_precision_scalar,
    })
}
