use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult, Storage,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use common::registry::NftReceiveMsg;

use crate::error::ContractError;
use crate::msg::{
    ContractInfoResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, MintersResponse,
    NftInfoResponse, NumTokensResponse, OwnerOfResponse, QueryMsg, TokensResponse,
};
use crate::state::{
    ContractInfo, TokenInfo, ADMIN, CONTRACT_INFO, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_LIMIT,
    MAX_LIMIT, MINTERS, OPERATORS, TOKENS, TOKEN_COUNT,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    ADMIN.save(deps.storage, &admin)?;

    CONTRACT_INFO.save(
        deps.storage,
        &ContractInfo {
            name: msg.name.clone(),
            symbol: msg.symbol,
        },
    )?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;

    for minter in &msg.minters {
        let minter = deps.api.addr_validate(minter)?;
        MINTERS.save(deps.storage, &minter, &true)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("name", msg.name)
        .add_attribute("admin", admin)
        .add_attribute("minter_count", msg.minters.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint {
            token_id,
            owner,
            token_uri,
        } => execute_mint(deps, info, token_id, owner, token_uri),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, info, recipient, token_id),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_send_nft(deps, info, contract, token_id, msg),
        ExecuteMsg::Approve { spender, token_id } => {
            execute_approve(deps, info, spender, token_id)
        }
        ExecuteMsg::Revoke { spender, token_id } => execute_revoke(deps, info, spender, token_id),
        ExecuteMsg::ApproveAll { operator } => execute_approve_all(deps, info, operator),
        ExecuteMsg::RevokeAll { operator } => execute_revoke_all(deps, info, operator),
        ExecuteMsg::Burn { token_id } => execute_burn(deps, info, token_id),
        ExecuteMsg::AddMinter { minter } => execute_add_minter(deps, info, minter),
        ExecuteMsg::RemoveMinter { minter } => execute_remove_minter(deps, info, minter),
    }
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
    owner: String,
    token_uri: Option<String>,
) -> Result<Response, ContractError> {
    let is_minter = MINTERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(false);
    if !is_minter {
        return Err(ContractError::NotMinter);
    }

    let owner = deps.api.addr_validate(&owner)?;

    if TOKENS.has(deps.storage, &token_id) {
        return Err(ContractError::TokenExists { token_id });
    }

    let token = TokenInfo {
        owner: owner.clone(),
        approvals: vec![],
        token_uri,
    };
    TOKENS.save(deps.storage, &token_id, &token)?;
    TOKEN_COUNT.update(deps.storage, |count| -> StdResult<u64> { Ok(count + 1) })?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("minter", info.sender)
        .add_attribute("owner", owner)
        .add_attribute("token_id", token_id))
}

fn execute_transfer_nft(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    transfer(deps.storage, &info.sender, &recipient, &token_id)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("token_id", token_id))
}

fn execute_send_nft(
    deps: DepsMut,
    info: MessageInfo,
    contract: String,
    token_id: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    let contract = deps.api.addr_validate(&contract)?;
    transfer(deps.storage, &info.sender, &contract, &token_id)?;

    let hook = NftReceiveMsg {
        sender: info.sender.to_string(),
        token_id: token_id.clone(),
        msg,
    }
    .into_cosmos_msg(contract.clone())?;

    Ok(Response::new()
        .add_message(hook)
        .add_attribute("action", "send_nft")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", contract)
        .add_attribute("token_id", token_id))
}

fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let mut token = load_token(deps.storage, &token_id)?;

    if !is_owner_or_operator(deps.storage, &token, &info.sender)? {
        return Err(ContractError::NotOwnerOrApproved { token_id });
    }

    if !token.approvals.contains(&spender) {
        token.approvals.push(spender.clone());
    }
    TOKENS.save(deps.storage, &token_id, &token)?;

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("spender", spender)
        .add_attribute("token_id", token_id))
}

fn execute_revoke(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let mut token = load_token(deps.storage, &token_id)?;

    if !is_owner_or_operator(deps.storage, &token, &info.sender)? {
        return Err(ContractError::NotOwnerOrApproved { token_id });
    }

    token.approvals.retain(|a| *a != spender);
    TOKENS.save(deps.storage, &token_id, &token)?;

    Ok(Response::new()
        .add_attribute("action", "revoke")
        .add_attribute("spender", spender)
        .add_attribute("token_id", token_id))
}

fn execute_approve_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    let operator = deps.api.addr_validate(&operator)?;
    OPERATORS.save(deps.storage, (&info.sender, &operator), &true)?;

    Ok(Response::new()
        .add_attribute("action", "approve_all")
        .add_attribute("owner", info.sender)
        .add_attribute("operator", operator))
}

fn execute_revoke_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    let operator = deps.api.addr_validate(&operator)?;
    OPERATORS.remove(deps.storage, (&info.sender, &operator));

    Ok(Response::new()
        .add_attribute("action", "revoke_all")
        .add_attribute("owner", info.sender)
        .add_attribute("operator", operator))
}

fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    let token = load_token(deps.storage, &token_id)?;
    if !can_move(deps.storage, &token, &info.sender)? {
        return Err(ContractError::NotOwnerOrApproved { token_id });
    }

    TOKENS.remove(deps.storage, &token_id);
    TOKEN_COUNT.update(deps.storage, |count| -> StdResult<u64> {
        Ok(count.saturating_sub(1))
    })?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("sender", info.sender)
        .add_attribute("owner", token.owner)
        .add_attribute("token_id", token_id))
}

fn execute_add_minter(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
) -> Result<Response, ContractError> {
    let admin = ADMIN.load(deps.storage)?;
    if info.sender != admin {
        return Err(ContractError::Unauthorized);
    }

    let minter = deps.api.addr_validate(&minter)?;
    MINTERS.save(deps.storage, &minter, &true)?;

    Ok(Response::new()
        .add_attribute("action", "add_minter")
        .add_attribute("minter", minter))
}

fn execute_remove_minter(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
) -> Result<Response, ContractError> {
    let admin = ADMIN.load(deps.storage)?;
    if info.sender != admin {
        return Err(ContractError::Unauthorized);
    }

    let minter = deps.api.addr_validate(&minter)?;
    MINTERS.remove(deps.storage, &minter);

    Ok(Response::new()
        .add_attribute("action", "remove_minter")
        .add_attribute("minter", minter))
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn load_token(storage: &dyn Storage, token_id: &str) -> Result<TokenInfo, ContractError> {
    TOKENS
        .may_load(storage, token_id)?
        .ok_or_else(|| ContractError::TokenNotFound {
            token_id: token_id.to_string(),
        })
}

fn is_owner_or_operator(
    storage: &dyn Storage,
    token: &TokenInfo,
    sender: &Addr,
) -> StdResult<bool> {
    if token.owner == *sender {
        return Ok(true);
    }
    Ok(OPERATORS
        .may_load(storage, (&token.owner, sender))?
        .unwrap_or(false))
}

fn can_move(storage: &dyn Storage, token: &TokenInfo, sender: &Addr) -> StdResult<bool> {
    if token.approvals.contains(sender) {
        return Ok(true);
    }
    is_owner_or_operator(storage, token, sender)
}

fn transfer(
    storage: &mut dyn Storage,
    sender: &Addr,
    recipient: &Addr,
    token_id: &str,
) -> Result<(), ContractError> {
    let mut token = load_token(storage, token_id)?;
    if !can_move(storage, &token, sender)? {
        return Err(ContractError::NotOwnerOrApproved {
            token_id: token_id.to_string(),
        });
    }

    token.owner = recipient.clone();
    token.approvals.clear();
    TOKENS.save(storage, token_id, &token)?;
    Ok(())
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::OwnerOf { token_id } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::NftInfo { token_id } => to_json_binary(&query_nft_info(deps, token_id)?),
        QueryMsg::NumTokens {} => to_json_binary(&NumTokensResponse {
            count: TOKEN_COUNT.load(deps.storage)?,
        }),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_tokens(deps, owner, start_after, limit)?),
        QueryMsg::Minters {} => to_json_binary(&query_minters(deps)?),
        QueryMsg::ContractInfo {} => {
            let info = CONTRACT_INFO.load(deps.storage)?;
            to_json_binary(&ContractInfoResponse {
                name: info.name,
                symbol: info.symbol,
            })
        }
    }
}

fn query_owner_of(deps: Deps, token_id: String) -> StdResult<OwnerOfResponse> {
    let token = TOKENS.load(deps.storage, &token_id)?;
    Ok(OwnerOfResponse {
        owner: token.owner.to_string(),
        approvals: token.approvals.iter().map(|a| a.to_string()).collect(),
    })
}

fn query_nft_info(deps: Deps, token_id: String) -> StdResult<NftInfoResponse> {
    let token = TOKENS.load(deps.storage, &token_id)?;
    Ok(NftInfoResponse {
        token_uri: token.token_uri,
    })
}

fn query_tokens(
    deps: Deps,
    owner: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    // Registries hold a handful of certificates per owner; a full scan is fine here.
    let tokens = TOKENS
        .range(deps.storage, start, None, Order::Ascending)
        .filter(|item| match item {
            Ok((_, token)) => token.owner == owner,
            Err(_) => true,
        })
        .take(limit)
        .map(|item| item.map(|(id, _)| id))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokensResponse { tokens })
}

fn query_minters(deps: Deps) -> StdResult<MintersResponse> {
    let minters = MINTERS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((addr, true)) => Some(Ok(addr)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<StdResult<Vec<Addr>>>()?;
    Ok(MintersResponse { minters })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
