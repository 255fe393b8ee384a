use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp};

pub use common::eligibility::EligibilityResponse;

#[cw_serde]
pub struct InstantiateMsg {
    /// Admin who can verify and unverify accounts
    pub admin: String,
    /// Accounts verified at instantiation
    pub verified: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Admin: mark an account as verified
    Verify { address: String },
    /// Admin: withdraw an account's verification
    Unverify { address: String },
    /// Admin: hand the admin role to another account
    UpdateAdmin { admin: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Whether the account passed verification. Wire-compatible with
    /// `common::eligibility::EligibilityQueryMsg`.
    #[returns(EligibilityResponse)]
    IsEligible { address: String },
    /// Returns the admin address
    #[returns(AdminResponse)]
    Admin {},
    /// Verified accounts ordered by address
    #[returns(VerifiedAccountsResponse)]
    VerifiedAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct AdminResponse {
    pub admin: String,
}

#[cw_serde]
pub struct VerifiedAccount {
    pub address: Addr,
    pub verified_at: Timestamp,
}

#[cw_serde]
pub struct VerifiedAccountsResponse {
    pub accounts: Vec<VerifiedAccount>,
}

#[cw_serde]
pub struct MigrateMsg {}
