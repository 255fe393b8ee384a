use cosmwasm_schema::cw_serde;

pub use common::registry::{
    ContractInfoResponse, MintersResponse, NftInfoResponse, NumTokensResponse, OwnerOfResponse,
    RegistryExecuteMsg as ExecuteMsg, RegistryQueryMsg as QueryMsg, TokensResponse,
};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    /// Admin who manages the minter set
    pub admin: String,
    /// Initial minters (may be empty; the bridge is usually added after it is instantiated)
    pub minters: Vec<String>,
}

#[cw_serde]
pub struct MigrateMsg {}
