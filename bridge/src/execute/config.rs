//! Configuration handlers (admin only).
//!
//! Rate limit, quorum threshold, relayer set, chain registry, eligibility
//! registry and revert cooldown.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::rate_limit::validate_rate_limit;
use crate::roles::{ensure_role, Role};
use crate::state::{
    ChainConfig, CHAINS, CONFIG, MAX_REVERT_COOLDOWN, RATE_LIMIT, RELAYERS, RELAYER_COUNT,
};

// ============================================================================
// Rate Limit
// ============================================================================

pub fn execute_set_rate_limit(
    deps: DepsMut,
    info: MessageInfo,
    window_seconds: u64,
    max_per_window: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    let limit = validate_rate_limit(window_seconds, max_per_window)?;
    RATE_LIMIT.save(deps.storage, &limit)?;

    Ok(Response::new()
        .add_attribute("method", "set_rate_limit")
        .add_attribute("window_seconds", window_seconds.to_string())
        .add_attribute("max_per_window", max_per_window.to_string()))
}

// ============================================================================
// Quorum and Relayers
// ============================================================================

/// Takes effect at the next attestation, including for intents already pending.
pub fn execute_set_required_approvals(
    deps: DepsMut,
    info: MessageInfo,
    required: u32,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    let relayer_count = RELAYER_COUNT.load(deps.storage)?;
    if required == 0 || required > relayer_count {
        return Err(ContractError::InvalidRequiredApprovals {
            required,
            relayer_count,
        });
    }

    config.required_approvals = required;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_required_approvals")
        .add_attribute("required_approvals", required.to_string()))
}

pub fn execute_add_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    let relayer_addr = deps.api.addr_validate(&relayer)?;
    let existing = RELAYERS
        .may_load(deps.storage, &relayer_addr)?
        .unwrap_or(false);
    if existing {
        return Err(ContractError::RelayerAlreadyRegistered);
    }

    RELAYERS.save(deps.storage, &relayer_addr, &true)?;
    let count = RELAYER_COUNT.load(deps.storage)?;
    RELAYER_COUNT.save(deps.storage, &(count + 1))?;

    Ok(Response::new()
        .add_attribute("method", "add_relayer")
        .add_attribute("relayer", relayer_addr)
        .add_attribute("relayer_count", (count + 1).to_string()))
}

/// Attestations already submitted by the relayer keep counting.
pub fn execute_remove_relayer(
    deps: DepsMut,
    info: MessageInfo,
    relayer: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    let relayer_addr = deps.api.addr_validate(&relayer)?;
    let existing = RELAYERS
        .may_load(deps.storage, &relayer_addr)?
        .unwrap_or(false);
    if !existing {
        return Err(ContractError::RelayerNotRegistered);
    }

    let count = RELAYER_COUNT.load(deps.storage)?;
    if count - 1 < config.required_approvals {
        return Err(ContractError::CannotRemoveRelayer {
            relayer_count: count - 1,
            required: config.required_approvals,
        });
    }

    RELAYERS.remove(deps.storage, &relayer_addr);
    RELAYER_COUNT.save(deps.storage, &(count - 1))?;

    Ok(Response::new()
        .add_attribute("method", "remove_relayer")
        .add_attribute("relayer", relayer_addr)
        .add_attribute("relayer_count", (count - 1).to_string()))
}

// ============================================================================
// Chain Registry
// ============================================================================

pub fn execute_register_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    name: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    if chain_id == config.this_chain_id {
        return Err(ContractError::ChainNotSupported { chain_id });
    }

    let chain = ChainConfig {
        chain_id,
        name: name.clone(),
        enabled: true,
    };
    CHAINS.save(deps.storage, chain_id, &chain)?;

    Ok(Response::new()
        .add_attribute("method", "register_chain")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("name", name))
}

pub fn execute_update_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    name: Option<String>,
    enabled: Option<bool>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    let mut chain = CHAINS
        .may_load(deps.storage, chain_id)?
        .ok_or(ContractError::ChainNotSupported { chain_id })?;

    if let Some(name) = name {
        chain.name = name;
    }
    if let Some(enabled) = enabled {
        chain.enabled = enabled;
    }
    CHAINS.save(deps.storage, chain_id, &chain)?;

    Ok(Response::new()
        .add_attribute("method", "update_chain")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("enabled", chain.enabled.to_string()))
}

// ============================================================================
// Collaborators and Timing
// ============================================================================

pub fn execute_set_eligibility_registry(
    deps: DepsMut,
    info: MessageInfo,
    registry: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    config.eligibility_registry = registry
        .map(|r| deps.api.addr_validate(&r))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    let shown = config
        .eligibility_registry
        .map(|r| r.to_string())
        .unwrap_or_else(|| "none".to_string());

    Ok(Response::new()
        .add_attribute("method", "set_eligibility_registry")
        .add_attribute("eligibility_registry", shown))
}

pub fn execute_set_revert_cooldown(
    deps: DepsMut,
    info: MessageInfo,
    seconds: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    if seconds > MAX_REVERT_COOLDOWN {
        return Err(ContractError::InvalidRevertCooldown {
            seconds,
            max: MAX_REVERT_COOLDOWN,
        });
    }
    config.revert_cooldown = seconds;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_revert_cooldown")
        .add_attribute("revert_cooldown", seconds.to_string()))
}
