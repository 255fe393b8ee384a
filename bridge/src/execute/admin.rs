//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause contract
//! - Admin transfer (propose/accept/cancel)
//! - Intent revert after the cooldown

use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response};

use common::registry::registry_msg;
use common::RegistryExecuteMsg;

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, parse_intent_id};
use crate::roles::{ensure_role, Role};
use crate::state::{
    wrapped_token_id, IntentKind, IntentStatus, PendingAdmin, WrappedUnit,
    ADMIN_TIMELOCK_DURATION, CONFIG, CUSTODY, INTENTS, PENDING_ADMIN, STATS, WRAPPED_UNITS,
};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the contract (stops outbound transfers and attestations).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "pause"))
}

pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "unpause"))
}

// ============================================================================
// Admin Transfer
// ============================================================================

/// Propose a new admin (starts timelock).
pub fn execute_propose_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    let new_admin_addr = deps.api.addr_validate(&new_admin)?;
    let pending = PendingAdmin {
        new_address: new_admin_addr.clone(),
        execute_after: env.block.time.plus_seconds(ADMIN_TIMELOCK_DURATION),
    };
    PENDING_ADMIN.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_attribute("method", "propose_admin")
        .add_attribute("new_admin", new_admin_addr.to_string())
        .add_attribute("execute_after", pending.execute_after.seconds().to_string()))
}

/// Accept pending admin role (after timelock).
pub fn execute_accept_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_ADMIN
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingAdmin)?;

    if info.sender != pending.new_address {
        return Err(ContractError::UnauthorizedPendingAdmin);
    }

    if env.block.time < pending.execute_after {
        let remaining = pending.execute_after.seconds() - env.block.time.seconds();
        return Err(ContractError::TimelockNotExpired {
            remaining_seconds: remaining,
        });
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.admin = pending.new_address.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_admin")
        .add_attribute("new_admin", pending.new_address.to_string()))
}

pub fn execute_cancel_admin_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    if !PENDING_ADMIN.exists(deps.storage) {
        return Err(ContractError::NoPendingAdmin);
    }
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_admin_proposal"))
}

// ============================================================================
// Intent Revert
// ============================================================================

/// Cancel an intent that never settled.
///
/// On the origin chain (`Locked`) the outbound effect is undone: a custodied
/// original goes back to the sender, a burned wrapped unit is minted again.
/// An origin intent whose execution relayers have confirmed is `Executed` and
/// refused here. On the destination (`AttestationPending`) the intent is only
/// marked, and further attestations are absorbed.
pub fn execute_revert_intent(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    intent_id: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Admin, &info.sender)?;

    let id = parse_intent_id(&intent_id)?;
    let id_hex = bytes32_to_hex(&id);
    let mut intent = INTENTS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::IntentNotFound {
            intent_id: id_hex.clone(),
        })?;

    if !matches!(
        intent.status,
        IntentStatus::Locked | IntentStatus::AttestationPending
    ) {
        return Err(ContractError::IntentNotRevertible {
            intent_id: id_hex,
            status: intent.status.as_str().to_string(),
        });
    }

    let unlock_at = intent.created_at.plus_seconds(config.revert_cooldown);
    if env.block.time < unlock_at {
        return Err(ContractError::RevertCooldownActive {
            remaining_seconds: unlock_at.seconds() - env.block.time.seconds(),
        });
    }

    let mut stats = STATS.load(deps.storage)?;
    let mut res = Response::new()
        .add_attribute("method", "revert_intent")
        .add_attribute("intent_id", id_hex.clone())
        .add_attribute("kind", intent.kind.as_str())
        .add_attribute("asset_ref", intent.asset_ref.clone());

    if intent.status == IntentStatus::Locked {
        let sender = deps.api.addr_validate(&intent.sender)?;
        let undo = match intent.kind {
            IntentKind::Lock => {
                let custody = CUSTODY.may_load(deps.storage, &intent.asset_ref)?;
                if custody.map(|c| c.intent_id) != Some(id) {
                    return Err(ContractError::InvariantViolation {
                        reason: format!("asset {} is not held for {}", intent.asset_ref, id_hex),
                    });
                }
                CUSTODY.remove(deps.storage, &intent.asset_ref);
                stats.custodied = stats.custodied.saturating_sub(1);

                registry_msg(
                    &config.asset_registry,
                    &RegistryExecuteMsg::TransferNft {
                        recipient: sender.to_string(),
                        token_id: intent.asset_ref.clone(),
                    },
                )?
            }
            IntentKind::Burn => {
                // The burned unit came from the chain the intent was heading to
                let key = (intent.destination_chain_id, intent.asset_ref.as_str());
                if WRAPPED_UNITS.has(deps.storage, key) {
                    return Err(ContractError::InvariantViolation {
                        reason: format!(
                            "asset {} from chain {} already has an outstanding wrapped unit",
                            intent.asset_ref, intent.destination_chain_id
                        ),
                    });
                }
                WRAPPED_UNITS.save(deps.storage, key, &WrappedUnit { intent_id: id })?;
                stats.wrapped_outstanding += 1;

                registry_msg(
                    &config.wrapped_registry,
                    &RegistryExecuteMsg::Mint {
                        token_id: wrapped_token_id(intent.destination_chain_id, &intent.asset_ref),
                        owner: sender.to_string(),
                        token_uri: intent.token_uri.clone(),
                    },
                )?
            }
        };
        res = res
            .add_message(undo)
            .add_attribute("returned_to", sender);
    }

    intent.status = IntentStatus::Reverted;
    intent.reverted_at = Some(env.block.time);
    INTENTS.save(deps.storage, &id, &intent)?;

    stats.total_reverted += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(res)
}
