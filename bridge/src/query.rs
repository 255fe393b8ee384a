//! Query handlers for the asset bridge contract.

use cosmwasm_std::{Addr, Binary, Deps, Env, Order, StdError, StdResult, Storage};
use cw_storage_plus::Bound;

use crate::hash::{bytes32_to_hex, compute_intent_id, parse_intent_id};
use crate::msg::{
    AttestationInfo, AttestationsResponse, ChainsResponse, ComputeIntentIdResponse,
    ConfigResponse, CustodyResponse, HasAttestedResponse, IntentPayload, IntentResponse,
    IntentsResponse, IsRelayerResponse, NonceResponse, OutboxEntry, OutboxResponse,
    PendingAdminResponse, RateLimitResponse, RateWindowResponse, RelayersResponse,
    SupplyResponse, WrappedUnitResponse,
};
use crate::rate_limit::{current_window, window_ends_at};
use crate::state::{
    wrapped_token_id, ChainConfig, IntentKind, Stats, TransferIntent, ATTESTATIONS,
    ATTESTATION_COUNT, CHAINS, CONFIG, CONFIRMATION_COUNT, CUSTODY, DEFAULT_LIMIT, INTENTS,
    MAX_LIMIT, OUTBOX, OUTGOING_NONCE, PENDING_ADMIN, RATE_LIMIT, RATE_WINDOWS, RELAYERS,
    RELAYER_COUNT, STATS, WRAPPED_UNITS,
};

fn intent_id_bytes(id: &Binary) -> StdResult<[u8; 32]> {
    parse_intent_id(id).map_err(|err| StdError::generic_err(err.to_string()))
}

fn to_response(storage: &dyn Storage, intent: TransferIntent) -> StdResult<IntentResponse> {
    let attestations = ATTESTATION_COUNT
        .may_load(storage, &intent.intent_id)?
        .unwrap_or(0);
    let confirmations = CONFIRMATION_COUNT
        .may_load(storage, &intent.intent_id)?
        .unwrap_or(0);
    Ok(IntentResponse {
        intent_id: Binary::from(intent.intent_id.to_vec()),
        kind: intent.kind,
        asset_ref: intent.asset_ref,
        origin_chain_id: intent.origin_chain_id,
        destination_chain_id: intent.destination_chain_id,
        sender: intent.sender,
        recipient: intent.recipient,
        nonce: intent.nonce,
        token_uri: intent.token_uri,
        status: intent.status,
        created_at: intent.created_at,
        executed_at: intent.executed_at,
        reverted_at: intent.reverted_at,
        attestations,
        confirmations,
    })
}

// ============================================================================
// Configuration Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let relayer_count = RELAYER_COUNT.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        this_chain_id: config.this_chain_id,
        asset_registry: config.asset_registry,
        wrapped_registry: config.wrapped_registry,
        eligibility_registry: config.eligibility_registry,
        required_approvals: config.required_approvals,
        relayer_count,
        revert_cooldown: config.revert_cooldown,
    })
}

pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}

pub fn query_chain(deps: Deps, chain_id: u64) -> StdResult<ChainConfig> {
    CHAINS.load(deps.storage, chain_id)
}

pub fn query_chains(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ChainsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let chains = CHAINS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, chain)| chain))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ChainsResponse { chains })
}

// ============================================================================
// Intent Queries
// ============================================================================

pub fn query_intent(deps: Deps, intent_id: Binary) -> StdResult<IntentResponse> {
    let id = intent_id_bytes(&intent_id)?;
    let intent = INTENTS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| StdError::not_found(format!("intent {}", bytes32_to_hex(&id))))?;
    to_response(deps.storage, intent)
}

pub fn query_intents(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<IntentsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after
        .as_ref()
        .map(|id| Bound::exclusive(id.as_slice()));

    let intents = INTENTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_, intent) = item?;
            to_response(deps.storage, intent)
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(IntentsResponse { intents })
}

/// Outbound intents in nonce order.
pub fn query_outbox(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<OutboxResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let entries = OUTBOX
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (nonce, intent_id) = item?;
            let intent = INTENTS.load(deps.storage, &intent_id)?;
            Ok(OutboxEntry {
                nonce,
                status: intent.status,
                payload: IntentPayload::from(&intent),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(OutboxResponse { entries })
}

pub fn query_current_nonce(deps: Deps) -> StdResult<NonceResponse> {
    let nonce = OUTGOING_NONCE.load(deps.storage)?;
    Ok(NonceResponse { nonce })
}

#[allow(clippy::too_many_arguments)]
pub fn query_compute_intent_id(
    kind: IntentKind,
    asset_ref: String,
    origin_chain_id: u64,
    destination_chain_id: u64,
    sender: String,
    recipient: String,
    nonce: u64,
    token_uri: Option<String>,
) -> StdResult<ComputeIntentIdResponse> {
    let id = compute_intent_id(
        kind,
        origin_chain_id,
        destination_chain_id,
        &asset_ref,
        &sender,
        &recipient,
        token_uri.as_deref(),
        nonce,
    );
    Ok(ComputeIntentIdResponse {
        intent_id: Binary::from(id.to_vec()),
        intent_id_hex: bytes32_to_hex(&id),
    })
}

// ============================================================================
// Attestation and Relayer Queries
// ============================================================================

pub fn query_attestations(deps: Deps, intent_id: Binary) -> StdResult<AttestationsResponse> {
    let id = intent_id_bytes(&intent_id)?;
    let config = CONFIG.load(deps.storage)?;

    let attestations = ATTESTATIONS
        .prefix(id.as_slice())
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (relayer, attestation) = item?;
            Ok(AttestationInfo {
                relayer,
                submitted_at: attestation.submitted_at,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    let count = ATTESTATION_COUNT.may_load(deps.storage, &id)?.unwrap_or(0);

    Ok(AttestationsResponse {
        intent_id,
        count,
        required: config.required_approvals,
        attestations,
    })
}

pub fn query_has_attested(
    deps: Deps,
    intent_id: Binary,
    relayer: String,
) -> StdResult<HasAttestedResponse> {
    let id = intent_id_bytes(&intent_id)?;
    let relayer = deps.api.addr_validate(&relayer)?;
    Ok(HasAttestedResponse {
        attested: ATTESTATIONS.has(deps.storage, (id.as_slice(), &relayer)),
    })
}

pub fn query_relayers(deps: Deps) -> StdResult<RelayersResponse> {
    let config = CONFIG.load(deps.storage)?;

    let relayers: Vec<Addr> = RELAYERS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| {
            let (addr, active) = item.ok()?;
            if active {
                Some(addr)
            } else {
                None
            }
        })
        .collect();

    Ok(RelayersResponse {
        relayers,
        required_approvals: config.required_approvals,
    })
}

pub fn query_is_relayer(deps: Deps, address: String) -> StdResult<IsRelayerResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let is_relayer = RELAYERS.may_load(deps.storage, &addr)?.unwrap_or(false);
    Ok(IsRelayerResponse { is_relayer })
}

// ============================================================================
// Rate Limit Queries
// ============================================================================

pub fn query_rate_limit(deps: Deps) -> StdResult<RateLimitResponse> {
    let limit = RATE_LIMIT.load(deps.storage)?;
    Ok(RateLimitResponse {
        window_seconds: limit.window_seconds,
        max_per_window: limit.max_per_window,
    })
}

/// The stored window is reset here, as the next transfer would see it.
pub fn query_rate_window(deps: Deps, env: Env, account: String) -> StdResult<RateWindowResponse> {
    let account = deps.api.addr_validate(&account)?;
    let limit = RATE_LIMIT.load(deps.storage)?;
    let stored = RATE_WINDOWS.may_load(deps.storage, &account)?;
    let window = current_window(stored, limit.window_seconds, env.block.time.seconds());

    Ok(RateWindowResponse {
        account,
        window_start: window.window_start,
        count_in_window: window.count_in_window,
        remaining: limit.max_per_window.saturating_sub(window.count_in_window),
        window_ends_at: window_ends_at(&window, limit.window_seconds),
    })
}

// ============================================================================
// Custody and Supply Queries
// ============================================================================

pub fn query_custody(deps: Deps, asset_ref: String) -> StdResult<CustodyResponse> {
    let custody = CUSTODY.may_load(deps.storage, &asset_ref)?;
    Ok(CustodyResponse {
        in_custody: custody.is_some(),
        intent_id: custody
            .as_ref()
            .map(|c| Binary::from(c.intent_id.to_vec())),
        depositor: custody.map(|c| c.depositor),
        asset_ref,
    })
}

pub fn query_wrapped_unit(
    deps: Deps,
    origin_chain_id: u64,
    asset_ref: String,
) -> StdResult<WrappedUnitResponse> {
    let unit = WRAPPED_UNITS.may_load(deps.storage, (origin_chain_id, asset_ref.as_str()))?;
    Ok(WrappedUnitResponse {
        origin_chain_id,
        token_id: wrapped_token_id(origin_chain_id, &asset_ref),
        outstanding: unit.is_some(),
        intent_id: unit.map(|u| Binary::from(u.intent_id.to_vec())),
        asset_ref,
    })
}

pub fn query_supply(deps: Deps) -> StdResult<SupplyResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(SupplyResponse {
        custodied: stats.custodied,
        wrapped_outstanding: stats.wrapped_outstanding,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<Stats> {
    STATS.load(deps.storage)
}
