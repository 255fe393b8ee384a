//! Certificate registry interface (cw721-style).
//!
//! Used for both the registry of original certificates and the registry of
//! wrapped units minted by the bridge on the destination chain.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, QuerierWrapper, StdResult, WasmMsg,
};

#[cw_serde]
pub enum RegistryExecuteMsg {
    /// Mint a new certificate (minter only)
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
    },
    /// Move a certificate to another account (owner, approved spender or operator)
    TransferNft { recipient: String, token_id: String },
    /// Move a certificate to a contract and invoke its `ReceiveNft` hook
    SendNft {
        contract: String,
        token_id: String,
        msg: Binary,
    },
    /// Allow `spender` to move a single certificate
    Approve { spender: String, token_id: String },
    /// Withdraw a single-certificate approval
    Revoke { spender: String, token_id: String },
    /// Allow `operator` to move every certificate of the sender
    ApproveAll { operator: String },
    /// Withdraw an operator grant
    RevokeAll { operator: String },
    /// Destroy a certificate (owner, approved spender or operator)
    Burn { token_id: String },
    /// Grant the minter role (admin only)
    AddMinter { minter: String },
    /// Revoke the minter role (admin only)
    RemoveMinter { minter: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: String },

    #[returns(NftInfoResponse)]
    NftInfo { token_id: String },

    #[returns(NumTokensResponse)]
    NumTokens {},

    /// Certificates held by `owner`, ordered by token id
    #[returns(TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(MintersResponse)]
    Minters {},

    #[returns(ContractInfoResponse)]
    ContractInfo {},
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
    pub approvals: Vec<String>,
}

#[cw_serde]
pub struct NftInfoResponse {
    pub token_uri: Option<String>,
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<String>,
}

#[cw_serde]
pub struct MintersResponse {
    pub minters: Vec<Addr>,
}

#[cw_serde]
pub struct ContractInfoResponse {
    pub name: String,
    pub symbol: String,
}

/// Payload delivered to a contract by `SendNft`.
#[cw_serde]
pub struct NftReceiveMsg {
    /// Account that called `SendNft`
    pub sender: String,
    pub token_id: String,
    pub msg: Binary,
}

impl NftReceiveMsg {
    /// Serialize as `{"receive_nft": {...}}`, the hook variant receivers expose.
    pub fn into_binary(self) -> StdResult<Binary> {
        let msg = ReceiverExecuteMsg::ReceiveNft(self);
        to_json_binary(&msg)
    }

    pub fn into_cosmos_msg<T: Into<String>>(self, contract_addr: T) -> StdResult<CosmosMsg> {
        let msg = self.into_binary()?;
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg,
            funds: vec![],
        }
        .into())
    }
}

#[cw_serde]
enum ReceiverExecuteMsg {
    ReceiveNft(NftReceiveMsg),
}

/// Build a `WasmMsg` executing `msg` on `registry`.
pub fn registry_msg(registry: &Addr, msg: &RegistryExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: registry.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}

pub fn query_owner_of(
    querier: &QuerierWrapper,
    registry: &Addr,
    token_id: &str,
) -> StdResult<OwnerOfResponse> {
    querier.query_wasm_smart(
        registry,
        &RegistryQueryMsg::OwnerOf {
            token_id: token_id.to_string(),
        },
    )
}

pub fn query_nft_info(
    querier: &QuerierWrapper,
    registry: &Addr,
    token_id: &str,
) -> StdResult<NftInfoResponse> {
    querier.query_wasm_smart(
        registry,
        &RegistryQueryMsg::NftInfo {
            token_id: token_id.to_string(),
        },
    )
}
