use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:assetra-registry";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

#[cw_serde]
pub struct ContractInfo {
    pub name: String,
    pub symbol: String,
}

#[cw_serde]
pub struct TokenInfo {
    pub owner: Addr,
    /// Spenders allowed to move this single token; cleared on every transfer
    pub approvals: Vec<Addr>,
    pub token_uri: Option<String>,
}

pub const CONTRACT_INFO: Item<ContractInfo> = Item::new("contract_info");

pub const ADMIN: Item<Addr> = Item::new("admin");

pub const MINTERS: Map<&Addr, bool> = Map::new("minters");

pub const TOKENS: Map<&str, TokenInfo> = Map::new("tokens");

pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");

/// (owner, operator) => approved for all of owner's tokens
pub const OPERATORS: Map<(&Addr, &Addr), bool> = Map::new("operators");
