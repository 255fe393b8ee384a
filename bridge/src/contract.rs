//! Assetra Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_add_relayer, execute_attest, execute_burn,
    execute_cancel_admin_proposal, execute_confirm_execution, execute_lock, execute_pause,
    execute_propose_admin, execute_receive_nft, execute_register_chain, execute_remove_relayer,
    execute_retry_execution, execute_revert_intent, execute_set_eligibility_registry,
    execute_set_rate_limit, execute_set_required_approvals, execute_set_revert_cooldown,
    execute_unpause, execute_update_chain, handle_execution_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_attestations, query_chain, query_chains, query_compute_intent_id, query_config,
    query_current_nonce, query_custody, query_has_attested, query_intent, query_intents,
    query_is_relayer, query_outbox, query_pending_admin, query_rate_limit, query_rate_window,
    query_relayers, query_stats, query_supply, query_wrapped_unit,
};
use crate::rate_limit::validate_rate_limit;
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_REVERT_COOLDOWN,
    EXECUTE_REPLY_ID, MAX_REVERT_COOLDOWN, OUTGOING_NONCE, RATE_LIMIT, RELAYERS, RELAYER_COUNT,
    STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let asset_registry = deps.api.addr_validate(&msg.asset_registry)?;
    let wrapped_registry = deps.api.addr_validate(&msg.wrapped_registry)?;
    let eligibility_registry = msg
        .eligibility_registry
        .map(|r| deps.api.addr_validate(&r))
        .transpose()?;

    // Duplicates in the list count once
    let mut relayer_count = 0u32;
    for relayer_str in &msg.relayers {
        let relayer = deps.api.addr_validate(relayer_str)?;
        if RELAYERS.has(deps.storage, &relayer) {
            continue;
        }
        RELAYERS.save(deps.storage, &relayer, &true)?;
        relayer_count += 1;
    }
    RELAYER_COUNT.save(deps.storage, &relayer_count)?;

    if msg.required_approvals == 0 || msg.required_approvals > relayer_count {
        return Err(ContractError::InvalidRequiredApprovals {
            required: msg.required_approvals,
            relayer_count,
        });
    }

    let limit = validate_rate_limit(msg.window_seconds, msg.max_per_window)?;
    RATE_LIMIT.save(deps.storage, &limit)?;

    let revert_cooldown = msg.revert_cooldown.unwrap_or(DEFAULT_REVERT_COOLDOWN);
    if revert_cooldown > MAX_REVERT_COOLDOWN {
        return Err(ContractError::InvalidRevertCooldown {
            seconds: revert_cooldown,
            max: MAX_REVERT_COOLDOWN,
        });
    }

    let config = Config {
        admin,
        paused: false,
        this_chain_id: msg.this_chain_id,
        asset_registry,
        wrapped_registry,
        eligibility_registry,
        required_approvals: msg.required_approvals,
        revert_cooldown,
    };
    CONFIG.save(deps.storage, &config)?;

    STATS.save(deps.storage, &Stats::default())?;
    OUTGOING_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("this_chain_id", config.this_chain_id.to_string())
        .add_attribute("relayer_count", relayer_count.to_string())
        .add_attribute("required_approvals", config.required_approvals.to_string())
        .add_attribute("window_seconds", limit.window_seconds.to_string())
        .add_attribute("max_per_window", limit.max_per_window.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound transfers
        ExecuteMsg::Lock {
            asset_ref,
            recipient,
            destination_chain_id,
        } => execute_lock(deps, env, info, asset_ref, recipient, destination_chain_id),
        ExecuteMsg::Burn {
            asset_ref,
            recipient,
            destination_chain_id,
        } => execute_burn(deps, env, info, asset_ref, recipient, destination_chain_id),
        ExecuteMsg::ReceiveNft(receive) => execute_receive_nft(deps, env, info, receive),

        // Incoming transfers
        ExecuteMsg::Attest { intent } => execute_attest(deps, env, info, intent),
        ExecuteMsg::RetryExecution { intent_id } => {
            execute_retry_execution(deps, info, intent_id)
        }
        ExecuteMsg::ConfirmExecution { intent_id } => {
            execute_confirm_execution(deps, env, info, intent_id)
        }

        // Administration
        ExecuteMsg::RevertIntent { intent_id } => {
            execute_revert_intent(deps, env, info, intent_id)
        }
        ExecuteMsg::SetRateLimit {
            window_seconds,
            max_per_window,
        } => execute_set_rate_limit(deps, info, window_seconds, max_per_window),
        ExecuteMsg::SetRequiredApprovals { required } => {
            execute_set_required_approvals(deps, info, required)
        }
        ExecuteMsg::AddRelayer { relayer } => execute_add_relayer(deps, info, relayer),
        ExecuteMsg::RemoveRelayer { relayer } => execute_remove_relayer(deps, info, relayer),
        ExecuteMsg::RegisterChain { chain_id, name } => {
            execute_register_chain(deps, info, chain_id, name)
        }
        ExecuteMsg::UpdateChain {
            chain_id,
            name,
            enabled,
        } => execute_update_chain(deps, info, chain_id, name, enabled),
        ExecuteMsg::SetEligibilityRegistry { registry } => {
            execute_set_eligibility_registry(deps, info, registry)
        }
        ExecuteMsg::SetRevertCooldown { seconds } => {
            execute_set_revert_cooldown(deps, info, seconds)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeAdmin { new_admin } => {
            execute_propose_admin(deps, env, info, new_admin)
        }
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        EXECUTE_REPLY_ID => handle_execution_reply(deps, env, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Intent { intent_id } => to_json_binary(&query_intent(deps, intent_id)?),
        QueryMsg::Intents { start_after, limit } => {
            to_json_binary(&query_intents(deps, start_after, limit)?)
        }
        QueryMsg::Outbox { start_after, limit } => {
            to_json_binary(&query_outbox(deps, start_after, limit)?)
        }
        QueryMsg::Attestations { intent_id } => {
            to_json_binary(&query_attestations(deps, intent_id)?)
        }
        QueryMsg::HasAttested { intent_id, relayer } => {
            to_json_binary(&query_has_attested(deps, intent_id, relayer)?)
        }
        QueryMsg::Relayers {} => to_json_binary(&query_relayers(deps)?),
        QueryMsg::IsRelayer { address } => to_json_binary(&query_is_relayer(deps, address)?),
        QueryMsg::RateLimit {} => to_json_binary(&query_rate_limit(deps)?),
        QueryMsg::RateWindow { account } => {
            to_json_binary(&query_rate_window(deps, env, account)?)
        }
        QueryMsg::Custody { asset_ref } => to_json_binary(&query_custody(deps, asset_ref)?),
        QueryMsg::WrappedUnit {
            origin_chain_id,
            asset_ref,
        } => to_json_binary(&query_wrapped_unit(deps, origin_chain_id, asset_ref)?),
        QueryMsg::Supply {} => to_json_binary(&query_supply(deps)?),
        QueryMsg::Chain { chain_id } => to_json_binary(&query_chain(deps, chain_id)?),
        QueryMsg::Chains { start_after, limit } => {
            to_json_binary(&query_chains(deps, start_after, limit)?)
        }
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::CurrentNonce {} => to_json_binary(&query_current_nonce(deps)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
        QueryMsg::ComputeIntentId {
            kind,
            asset_ref,
            origin_chain_id,
            destination_chain_id,
            sender,
            recipient,
            nonce,
            token_uri,
        } => to_json_binary(&query_compute_intent_id(
            kind,
            asset_ref,
            origin_chain_id,
            destination_chain_id,
            sender,
            recipient,
            nonce,
            token_uri,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
