//! Relayer attestations for intents arriving from other chains, and relayer
//! confirmations for intents that left this chain.
//!
//! The threshold is read once at the start of each call. An incoming intent
//! executes on the attestation that first brings its distinct-relayer count to
//! the threshold; later attestations are recorded or absorbed but never
//! trigger a second execution. Confirmations run the same count in the other
//! direction and move the outbound intent to `Executed`.

use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::execute::settlement::dispatch_execution;
use crate::hash::{bytes32_to_hex, compute_intent_id, parse_intent_id};
use crate::msg::IntentPayload;
use crate::roles::{ensure_role, Role};
use crate::state::{
    Attestation, IntentStatus, TransferIntent, ATTESTATIONS, ATTESTATION_COUNT, CHAINS, CONFIG,
    CONFIRMATIONS, CONFIRMATION_COUNT, INTENTS,
};

/// Execute handler for attesting an intent (relayer only).
pub fn execute_attest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    payload: IntentPayload,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    ensure_role(deps.storage, &config, Role::Relayer, &info.sender)?;

    let claimed = parse_intent_id(&payload.intent_id)?;
    let computed = compute_intent_id(
        payload.kind,
        payload.origin_chain_id,
        payload.destination_chain_id,
        &payload.asset_ref,
        &payload.sender,
        &payload.recipient,
        payload.token_uri.as_deref(),
        payload.nonce,
    );
    if claimed != computed {
        return Err(ContractError::IntentHashMismatch {
            claimed: bytes32_to_hex(&claimed),
            computed: bytes32_to_hex(&computed),
        });
    }

    if payload.destination_chain_id != config.this_chain_id {
        return Err(ContractError::ChainNotSupported {
            chain_id: payload.destination_chain_id,
        });
    }
    // Disabled chains still settle in-flight intents; only registration is required.
    if payload.origin_chain_id == config.this_chain_id
        || !CHAINS.has(deps.storage, payload.origin_chain_id)
    {
        return Err(ContractError::ChainNotSupported {
            chain_id: payload.origin_chain_id,
        });
    }

    let mut intent = match INTENTS.may_load(deps.storage, &claimed)? {
        Some(intent) => intent,
        None => TransferIntent {
            intent_id: claimed,
            kind: payload.kind,
            asset_ref: payload.asset_ref,
            origin_chain_id: payload.origin_chain_id,
            destination_chain_id: payload.destination_chain_id,
            sender: payload.sender,
            recipient: payload.recipient,
            nonce: payload.nonce,
            token_uri: payload.token_uri,
            status: IntentStatus::AttestationPending,
            created_at: env.block.time,
            executed_at: None,
            reverted_at: None,
        },
    };

    let res = Response::new()
        .add_attribute("action", "attest")
        .add_attribute("intent_id", bytes32_to_hex(&claimed))
        .add_attribute("relayer", info.sender.as_str());

    match intent.status {
        IntentStatus::Executed => return Ok(res.add_attribute("result", "already_executed")),
        IntentStatus::Reverted => return Ok(res.add_attribute("result", "reverted")),
        _ => {}
    }

    let mut count = ATTESTATION_COUNT
        .may_load(deps.storage, &claimed)?
        .unwrap_or(0);

    if ATTESTATIONS.has(deps.storage, (claimed.as_slice(), &info.sender)) {
        return Ok(res
            .add_attribute("result", "duplicate")
            .add_attribute("attestations", count.to_string())
            .add_attribute("required", config.required_approvals.to_string()));
    }

    ATTESTATIONS.save(
        deps.storage,
        (claimed.as_slice(), &info.sender),
        &Attestation {
            submitted_at: env.block.time,
        },
    )?;
    count += 1;
    ATTESTATION_COUNT.save(deps.storage, &claimed, &count)?;

    let res = res
        .add_attribute("attestations", count.to_string())
        .add_attribute("required", config.required_approvals.to_string());

    if intent.status == IntentStatus::AttestationPending && count >= config.required_approvals {
        intent.status = IntentStatus::Quorumed;
        INTENTS.save(deps.storage, &claimed, &intent)?;

        let execution = dispatch_execution(deps.storage, &config, &intent)?;
        return Ok(res
            .add_submessage(execution)
            .add_attribute("result", "quorum_reached"));
    }

    INTENTS.save(deps.storage, &claimed, &intent)?;
    Ok(res.add_attribute("result", "recorded"))
}

/// Execute handler for confirming that an intent created here executed on its
/// destination (relayer only).
///
/// Not blocked by pause: a confirmation only narrows what the admin may revert.
pub fn execute_confirm_execution(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    intent_id: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_role(deps.storage, &config, Role::Relayer, &info.sender)?;

    let id = parse_intent_id(&intent_id)?;
    let id_hex = bytes32_to_hex(&id);
    let mut intent = INTENTS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::IntentNotFound {
            intent_id: id_hex.clone(),
        })?;

    // Incoming intents settle through attestations, not confirmations
    if intent.origin_chain_id != config.this_chain_id {
        return Err(ContractError::ChainNotSupported {
            chain_id: intent.origin_chain_id,
        });
    }

    let res = Response::new()
        .add_attribute("action", "confirm_execution")
        .add_attribute("intent_id", id_hex)
        .add_attribute("relayer", info.sender.as_str());

    match intent.status {
        IntentStatus::Executed => return Ok(res.add_attribute("result", "already_executed")),
        IntentStatus::Reverted => return Ok(res.add_attribute("result", "reverted")),
        _ => {}
    }

    let mut count = CONFIRMATION_COUNT
        .may_load(deps.storage, &id)?
        .unwrap_or(0);

    if CONFIRMATIONS.has(deps.storage, (id.as_slice(), &info.sender)) {
        return Ok(res
            .add_attribute("result", "duplicate")
            .add_attribute("confirmations", count.to_string())
            .add_attribute("required", config.required_approvals.to_string()));
    }

    CONFIRMATIONS.save(
        deps.storage,
        (id.as_slice(), &info.sender),
        &Attestation {
            submitted_at: env.block.time,
        },
    )?;
    count += 1;
    CONFIRMATION_COUNT.save(deps.storage, &id, &count)?;

    let res = res
        .add_attribute("confirmations", count.to_string())
        .add_attribute("required", config.required_approvals.to_string());

    if count >= config.required_approvals {
        intent.status = IntentStatus::Executed;
        intent.executed_at = Some(env.block.time);
        INTENTS.save(deps.storage, &id, &intent)?;
        return Ok(res.add_attribute("result", "confirmed"));
    }

    Ok(res.add_attribute("result", "recorded"))
}
