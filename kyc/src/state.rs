use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:assetra-kyc";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ADMIN: Item<Addr> = Item::new("admin");

/// account => time of verification
pub const VERIFIED: Map<&Addr, Timestamp> = Map::new("verified");
