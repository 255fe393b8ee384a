//! Outbound transfer handlers (Lock, Burn and the ReceiveNft hook).
//!
//! Every successful outbound call records an intent in `INTENTS` and `OUTBOX`
//! and emits the lock record attributes relayers read.

use cosmwasm_std::{from_json, Addr, Deps, DepsMut, Env, MessageInfo, Response, Storage};

use common::eligibility::query_is_eligible;
use common::registry::{query_nft_info, query_owner_of, registry_msg};
use common::{NftReceiveMsg, RegistryExecuteMsg};

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_intent_id};
use crate::msg::ReceiveMsg;
use crate::rate_limit::check_and_consume;
use crate::state::{
    parse_wrapped_token_id, wrapped_token_id, Config, Custody, IntentKind, IntentStatus,
    TransferIntent, CHAINS, CONFIG, CUSTODY, INTENTS, OUTBOX, OUTGOING_NONCE, STATS,
    WRAPPED_UNITS,
};

/// Lock an original the caller has approved the bridge to move.
pub fn execute_lock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset_ref: String,
    recipient: String,
    destination_chain_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_outbound(deps.storage, &config, &recipient, destination_chain_id)?;
    ensure_owner(deps.as_ref(), &config.asset_registry, &info.sender, &asset_ref)?;

    let custody_msg = registry_msg(
        &config.asset_registry,
        &RegistryExecuteMsg::TransferNft {
            recipient: env.contract.address.to_string(),
            token_id: asset_ref.clone(),
        },
    )?;

    let res = lock_asset(
        deps,
        &env,
        &config,
        info.sender,
        asset_ref,
        recipient,
        destination_chain_id,
    )?;
    Ok(res.add_message(custody_msg))
}

/// Burn a wrapped unit the caller has approved the bridge to burn.
///
/// `asset_ref` names the original in its origin registry; the wrapped unit
/// burned is the one minted for it from `destination_chain_id`.
pub fn execute_burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset_ref: String,
    recipient: String,
    destination_chain_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_outbound(deps.storage, &config, &recipient, destination_chain_id)?;
    ensure_owner(
        deps.as_ref(),
        &config.wrapped_registry,
        &info.sender,
        &wrapped_token_id(destination_chain_id, &asset_ref),
    )?;

    burn_wrapped(
        deps,
        &env,
        &config,
        info.sender,
        asset_ref,
        recipient,
        destination_chain_id,
    )
}

/// `SendNft` hook. The registry has already moved the certificate to the bridge.
pub fn execute_receive_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    receive: NftReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let sender = deps.api.addr_validate(&receive.sender)?;

    let receive_msg: ReceiveMsg = from_json(&receive.msg)?;
    let res = match receive_msg {
        ReceiveMsg::Lock {
            recipient,
            destination_chain_id,
        } => {
            if info.sender != config.asset_registry {
                return Err(ContractError::UnauthorizedCollaborator {
                    sender: info.sender.to_string(),
                    expected: "asset registry".to_string(),
                });
            }
            ensure_outbound(deps.storage, &config, &recipient, destination_chain_id)?;
            lock_asset(
                deps,
                &env,
                &config,
                sender,
                receive.token_id,
                recipient,
                destination_chain_id,
            )?
        }
        ReceiveMsg::Burn {
            recipient,
            destination_chain_id,
        } => {
            if info.sender != config.wrapped_registry {
                return Err(ContractError::UnauthorizedCollaborator {
                    sender: info.sender.to_string(),
                    expected: "wrapped registry".to_string(),
                });
            }
            ensure_outbound(deps.storage, &config, &recipient, destination_chain_id)?;
            let asset_ref = match parse_wrapped_token_id(&receive.token_id) {
                Some((origin, asset_ref)) if origin == destination_chain_id => asset_ref,
                _ => {
                    return Err(ContractError::ChainNotSupported {
                        chain_id: destination_chain_id,
                    })
                }
            };
            burn_wrapped(
                deps,
                &env,
                &config,
                sender,
                asset_ref.to_string(),
                recipient,
                destination_chain_id,
            )?
        }
    };

    Ok(res.add_attribute("via", "receive_nft"))
}

// ============================================================================
// Shared Ledger Logic
// ============================================================================

fn lock_asset(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    sender: Addr,
    asset_ref: String,
    recipient: String,
    destination_chain_id: u64,
) -> Result<Response, ContractError> {
    ensure_eligible(deps.as_ref(), config, &sender)?;
    check_and_consume(deps.storage, &sender, env.block.time.seconds())?;

    if CUSTODY.has(deps.storage, &asset_ref) {
        return Err(ContractError::InvariantViolation {
            reason: format!("asset {} is already in custody", asset_ref),
        });
    }

    let token_uri = query_nft_info(&deps.querier, &config.asset_registry, &asset_ref)?.token_uri;

    let intent = record_outgoing_intent(
        deps.storage,
        env,
        config,
        IntentKind::Lock,
        asset_ref,
        &sender,
        recipient,
        destination_chain_id,
        token_uri,
    )?;

    CUSTODY.save(
        deps.storage,
        &intent.asset_ref,
        &Custody {
            intent_id: intent.intent_id,
            depositor: sender,
        },
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_locked += 1;
    stats.custodied += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_attribute("action", "lock")
        .add_attributes(intent_attributes(&intent)))
}

fn burn_wrapped(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    sender: Addr,
    asset_ref: String,
    recipient: String,
    destination_chain_id: u64,
) -> Result<Response, ContractError> {
    // Wrapped units only ever go back to the chain that holds their original
    if !WRAPPED_UNITS.has(deps.storage, (destination_chain_id, asset_ref.as_str())) {
        return Err(ContractError::InvariantViolation {
            reason: format!(
                "asset {} from chain {} has no outstanding wrapped unit",
                asset_ref, destination_chain_id
            ),
        });
    }
    let token_id = wrapped_token_id(destination_chain_id, &asset_ref);

    ensure_eligible(deps.as_ref(), config, &sender)?;
    check_and_consume(deps.storage, &sender, env.block.time.seconds())?;

    let token_uri =
        query_nft_info(&deps.querier, &config.wrapped_registry, &token_id)?.token_uri;

    let intent = record_outgoing_intent(
        deps.storage,
        env,
        config,
        IntentKind::Burn,
        asset_ref,
        &sender,
        recipient,
        destination_chain_id,
        token_uri,
    )?;

    WRAPPED_UNITS.remove(deps.storage, (destination_chain_id, intent.asset_ref.as_str()));

    let mut stats = STATS.load(deps.storage)?;
    stats.total_burned += 1;
    stats.wrapped_outstanding = stats.wrapped_outstanding.saturating_sub(1);
    STATS.save(deps.storage, &stats)?;

    let burn_msg = registry_msg(
        &config.wrapped_registry,
        &RegistryExecuteMsg::Burn {
            token_id: token_id.clone(),
        },
    )?;

    Ok(Response::new()
        .add_message(burn_msg)
        .add_attribute("action", "burn")
        .add_attribute("wrapped_token_id", token_id)
        .add_attributes(intent_attributes(&intent)))
}

/// Assign the next nonce, hash the intent and store it in `INTENTS` and `OUTBOX`.
#[allow(clippy::too_many_arguments)]
fn record_outgoing_intent(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
    kind: IntentKind,
    asset_ref: String,
    sender: &Addr,
    recipient: String,
    destination_chain_id: u64,
    token_uri: Option<String>,
) -> Result<TransferIntent, ContractError> {
    let nonce = OUTGOING_NONCE.load(storage)?;
    OUTGOING_NONCE.save(storage, &(nonce + 1))?;

    let intent_id = compute_intent_id(
        kind,
        config.this_chain_id,
        destination_chain_id,
        &asset_ref,
        sender.as_str(),
        &recipient,
        token_uri.as_deref(),
        nonce,
    );
    if INTENTS.has(storage, &intent_id) {
        return Err(ContractError::InvariantViolation {
            reason: format!("intent {} already exists", bytes32_to_hex(&intent_id)),
        });
    }

    let intent = TransferIntent {
        intent_id,
        kind,
        asset_ref,
        origin_chain_id: config.this_chain_id,
        destination_chain_id,
        sender: sender.to_string(),
        recipient,
        nonce,
        token_uri,
        status: IntentStatus::Locked,
        created_at: env.block.time,
        executed_at: None,
        reverted_at: None,
    };
    INTENTS.save(storage, &intent_id, &intent)?;
    OUTBOX.save(storage, nonce, &intent_id)?;

    Ok(intent)
}

/// The lock record relayers read. Attribute keys are a stable wire format.
fn intent_attributes(intent: &TransferIntent) -> Vec<(&'static str, String)> {
    vec![
        ("intent_id", bytes32_to_hex(&intent.intent_id)),
        ("kind", intent.kind.as_str().to_string()),
        ("asset_ref", intent.asset_ref.clone()),
        ("origin_chain_id", intent.origin_chain_id.to_string()),
        ("destination_chain_id", intent.destination_chain_id.to_string()),
        ("sender", intent.sender.clone()),
        ("recipient", intent.recipient.clone()),
        ("nonce", intent.nonce.to_string()),
        ("token_uri", intent.token_uri.clone().unwrap_or_default()),
        ("created_at", intent.created_at.seconds().to_string()),
    ]
}

// ============================================================================
// Preconditions
// ============================================================================

fn ensure_outbound(
    storage: &dyn Storage,
    config: &Config,
    recipient: &str,
    destination_chain_id: u64,
) -> Result<(), ContractError> {
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    if destination_chain_id == config.this_chain_id {
        return Err(ContractError::ChainNotSupported {
            chain_id: destination_chain_id,
        });
    }
    let chain = CHAINS
        .may_load(storage, destination_chain_id)?
        .ok_or(ContractError::ChainNotSupported {
            chain_id: destination_chain_id,
        })?;
    if !chain.enabled {
        return Err(ContractError::ChainNotSupported {
            chain_id: destination_chain_id,
        });
    }

    if recipient.trim().is_empty() {
        return Err(ContractError::InvalidRecipient {
            reason: "recipient cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// A missing certificate counts as not owned.
fn ensure_owner(
    deps: Deps,
    registry: &Addr,
    account: &Addr,
    asset_ref: &str,
) -> Result<(), ContractError> {
    let owned = query_owner_of(&deps.querier, registry, asset_ref)
        .map(|res| res.owner == account.as_str())
        .unwrap_or(false);
    if !owned {
        return Err(ContractError::NotOwner {
            account: account.to_string(),
            asset_ref: asset_ref.to_string(),
        });
    }
    Ok(())
}

fn ensure_eligible(deps: Deps, config: &Config, account: &Addr) -> Result<(), ContractError> {
    let Some(registry) = &config.eligibility_registry else {
        return Ok(());
    };
    if !query_is_eligible(&deps.querier, registry, account)? {
        return Err(ContractError::NotEligible {
            account: account.to_string(),
        });
    }
    Ok(())
}
