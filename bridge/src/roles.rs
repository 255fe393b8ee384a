//! Capability checks performed at each entry point.

use cosmwasm_std::{Addr, StdResult, Storage};

use crate::error::ContractError;
use crate::state::{Config, RELAYERS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Configures the bridge and reverts stuck intents
    Admin,
    /// Attests intents observed on other chains and confirms their execution
    Relayer,
}

pub fn has_role(
    storage: &dyn Storage,
    config: &Config,
    role: Role,
    addr: &Addr,
) -> StdResult<bool> {
    match role {
        Role::Admin => Ok(*addr == config.admin),
        Role::Relayer => Ok(RELAYERS.may_load(storage, addr)?.unwrap_or(false)),
    }
}

/// Fail unless `addr` holds `role`.
pub fn ensure_role(
    storage: &dyn Storage,
    config: &Config,
    role: Role,
    addr: &Addr,
) -> Result<(), ContractError> {
    if has_role(storage, config, role, addr)? {
        return Ok(());
    }
    Err(missing_role(role, addr))
}

/// Fail unless `addr` holds at least one of `roles`. The error names the first role.
pub fn ensure_any_role(
    storage: &dyn Storage,
    config: &Config,
    roles: &[Role],
    addr: &Addr,
) -> Result<(), ContractError> {
    for role in roles {
        if has_role(storage, config, *role, addr)? {
            return Ok(());
        }
    }
    Err(missing_role(roles.first().copied().unwrap_or(Role::Admin), addr))
}

fn missing_role(role: Role, addr: &Addr) -> ContractError {
    match role {
        Role::Admin => ContractError::Unauthorized,
        Role::Relayer => ContractError::UnknownRelayer {
            relayer: addr.to_string(),
        },
    }
}
