use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{
    AdminResponse, EligibilityResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg,
    VerifiedAccount, VerifiedAccountsResponse,
};
use crate::state::{ADMIN, CONTRACT_NAME, CONTRACT_VERSION, VERIFIED};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    ADMIN.save(deps.storage, &admin)?;

    for address in &msg.verified {
        let account = deps.api.addr_validate(address)?;
        VERIFIED.save(deps.storage, &account, &env.block.time)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("verified_count", msg.verified.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Verify { address } => execute_verify(deps, env, info, address),
        ExecuteMsg::Unverify { address } => execute_unverify(deps, info, address),
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, info, admin),
    }
}

fn execute_verify(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let admin = ADMIN.load(deps.storage)?;
    if info.sender != admin {
        return Err(ContractError::Unauthorized);
    }

    let account = deps.api.addr_validate(&address)?;
    VERIFIED.save(deps.storage, &account, &env.block.time)?;

    Ok(Response::new()
        .add_attribute("action", "verify")
        .add_attribute("account", account))
}

fn execute_unverify(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let admin = ADMIN.load(deps.storage)?;
    if info.sender != admin {
        return Err(ContractError::Unauthorized);
    }

    let account = deps.api.addr_validate(&address)?;
    if !VERIFIED.has(deps.storage, &account) {
        return Err(ContractError::NotVerified { address });
    }
    VERIFIED.remove(deps.storage, &account);

    Ok(Response::new()
        .add_attribute("action", "unverify")
        .add_attribute("account", account))
}

fn execute_update_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    let current = ADMIN.load(deps.storage)?;
    if info.sender != current {
        return Err(ContractError::Unauthorized);
    }

    let admin = deps.api.addr_validate(&admin)?;
    ADMIN.save(deps.storage, &admin)?;

    Ok(Response::new()
        .add_attribute("action", "update_admin")
        .add_attribute("admin", admin))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsEligible { address } => to_json_binary(&query_is_eligible(deps, address)?),
        QueryMsg::Admin {} => to_json_binary(&AdminResponse {
            admin: ADMIN.load(deps.storage)?.to_string(),
        }),
        QueryMsg::VerifiedAccounts { start_after, limit } => {
            to_json_binary(&query_verified_accounts(deps, start_after, limit)?)
        }
    }
}

fn query_is_eligible(deps: Deps, address: String) -> StdResult<EligibilityResponse> {
    let account = deps.api.addr_validate(&address)?;
    Ok(EligibilityResponse {
        eligible: VERIFIED.has(deps.storage, &account),
    })
}

fn query_verified_accounts(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<VerifiedAccountsResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start_addr = start_after
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let accounts = VERIFIED
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (address, verified_at) = item?;
            Ok(VerifiedAccount {
                address,
                verified_at,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(VerifiedAccountsResponse { accounts })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
