//! Eligibility (KYC) registry interface.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult};

/// The single query the bridge relies on. Any contract answering
/// `{"is_eligible":{"address":"..."}}` can serve as the eligibility registry.
#[cw_serde]
#[derive(QueryResponses)]
pub enum EligibilityQueryMsg {
    #[returns(EligibilityResponse)]
    IsEligible { address: String },
}

#[cw_serde]
pub struct EligibilityResponse {
    pub eligible: bool,
}

/// Ask `registry` whether `account` may move assets across the bridge.
pub fn query_is_eligible(
    querier: &QuerierWrapper,
    registry: &Addr,
    account: &Addr,
) -> StdResult<bool> {
    let res: EligibilityResponse = querier.query_wasm_smart(
        registry,
        &EligibilityQueryMsg::IsEligible {
            address: account.to_string(),
        },
    )?;
    Ok(res.eligible)
}
