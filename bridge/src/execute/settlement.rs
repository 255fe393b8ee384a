//! Execution of quorumed intents.
//!
//! The effect (mint of a wrapped unit, or release of a custodied original) is
//! sent as a `reply_always` sub-message. The intent becomes `Executed` only in
//! the success reply; a failed effect is rolled back by the chain and the
//! intent stays `Quorumed` until `RetryExecution` re-drives it.

use cosmwasm_std::{
    Binary, DepsMut, Env, MessageInfo, Reply, Response, Storage, SubMsg, SubMsgResult,
};

use common::registry::registry_msg;
use common::RegistryExecuteMsg;

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, parse_intent_id};
use crate::roles::{ensure_any_role, Role};
use crate::state::{
    wrapped_token_id, Config, IntentKind, IntentStatus, TransferIntent, WrappedUnit, CONFIG,
    CUSTODY, EXECUTE_REPLY_ID, INTENTS, PENDING_EXECUTION, STATS, WRAPPED_UNITS,
};

/// Build the effect sub-message for a quorumed intent.
///
/// Fails with `InvariantViolation` if running the effect would break 1:1
/// backing or re-run an executed intent.
pub(crate) fn dispatch_execution(
    storage: &mut dyn Storage,
    config: &Config,
    intent: &TransferIntent,
) -> Result<SubMsg, ContractError> {
    if intent.status == IntentStatus::Executed {
        return Err(ContractError::InvariantViolation {
            reason: format!(
                "intent {} is already executed",
                bytes32_to_hex(&intent.intent_id)
            ),
        });
    }

    let effect = match intent.kind {
        IntentKind::Lock => {
            let key = (intent.origin_chain_id, intent.asset_ref.as_str());
            if WRAPPED_UNITS.has(storage, key) {
                return Err(ContractError::InvariantViolation {
                    reason: format!(
                        "asset {} from chain {} already has an outstanding wrapped unit",
                        intent.asset_ref, intent.origin_chain_id
                    ),
                });
            }
            registry_msg(
                &config.wrapped_registry,
                &RegistryExecuteMsg::Mint {
                    token_id: wrapped_token_id(intent.origin_chain_id, &intent.asset_ref),
                    owner: intent.recipient.clone(),
                    token_uri: intent.token_uri.clone(),
                },
            )?
        }
        IntentKind::Burn => {
            if !CUSTODY.has(storage, &intent.asset_ref) {
                return Err(ContractError::InvariantViolation {
                    reason: format!("asset {} is not in custody", intent.asset_ref),
                });
            }
            registry_msg(
                &config.asset_registry,
                &RegistryExecuteMsg::TransferNft {
                    recipient: intent.recipient.clone(),
                    token_id: intent.asset_ref.clone(),
                },
            )?
        }
    };

    PENDING_EXECUTION.save(storage, &intent.intent_id)?;
    Ok(SubMsg::reply_always(effect, EXECUTE_REPLY_ID))
}

/// Settle the intent whose effect sub-message just finished.
pub fn handle_execution_reply(
    deps: DepsMut,
    env: Env,
    reply: Reply,
) -> Result<Response, ContractError> {
    let intent_id = PENDING_EXECUTION.load(deps.storage)?;
    PENDING_EXECUTION.remove(deps.storage);

    let mut intent = INTENTS.load(deps.storage, &intent_id)?;
    let mut stats = STATS.load(deps.storage)?;
    let id_hex = bytes32_to_hex(&intent_id);

    match reply.result {
        SubMsgResult::Ok(_) => {
            let effect = match intent.kind {
                IntentKind::Lock => {
                    WRAPPED_UNITS.save(
                        deps.storage,
                        (intent.origin_chain_id, intent.asset_ref.as_str()),
                        &WrappedUnit { intent_id },
                    )?;
                    stats.total_minted += 1;
                    stats.wrapped_outstanding += 1;
                    "mint"
                }
                IntentKind::Burn => {
                    CUSTODY.remove(deps.storage, &intent.asset_ref);
                    stats.total_released += 1;
                    stats.custodied = stats.custodied.saturating_sub(1);
                    "release"
                }
            };

            intent.status = IntentStatus::Executed;
            intent.executed_at = Some(env.block.time);
            INTENTS.save(deps.storage, &intent_id, &intent)?;
            STATS.save(deps.storage, &stats)?;

            Ok(Response::new()
                .add_attribute("action", "execute_intent")
                .add_attribute("intent_id", id_hex)
                .add_attribute("effect", effect)
                .add_attribute("asset_ref", intent.asset_ref)
                .add_attribute("recipient", intent.recipient))
        }
        SubMsgResult::Err(reason) => {
            stats.failed_executions += 1;
            STATS.save(deps.storage, &stats)?;

            Ok(Response::new()
                .add_attribute("action", "execution_failed")
                .add_attribute("intent_id", id_hex)
                .add_attribute("status", intent.status.as_str())
                .add_attribute("reason", reason))
        }
    }
}

/// Re-drive a quorumed intent whose effect failed (relayer or admin).
pub fn execute_retry_execution(
    deps: DepsMut,
    info: MessageInfo,
    intent_id: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    ensure_any_role(
        deps.storage,
        &config,
        &[Role::Relayer, Role::Admin],
        &info.sender,
    )?;

    let id = parse_intent_id(&intent_id)?;
    let id_hex = bytes32_to_hex(&id);
    let intent = INTENTS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::IntentNotFound {
            intent_id: id_hex.clone(),
        })?;

    match intent.status {
        IntentStatus::Quorumed => {}
        IntentStatus::Executed => {
            return Err(ContractError::AlreadyReleased { intent_id: id_hex })
        }
        other => {
            return Err(ContractError::IntentNotRetryable {
                intent_id: id_hex,
                status: other.as_str().to_string(),
            })
        }
    }

    let execution = dispatch_execution(deps.storage, &config, &intent)?;

    Ok(Response::new()
        .add_submessage(execution)
        .add_attribute("action", "retry_execution")
        .add_attribute("intent_id", id_hex)
        .add_attribute("retried_by", info.sender))
}
