//! Common - Shared Collaborator Interfaces for the Assetra Bridge Contracts
//!
//! The bridge never links against the registry or kyc crates directly. It talks
//! to them through the message and response types defined here, so any contract
//! that speaks this wire format can stand in as a collaborator.

pub mod eligibility;
pub mod registry;

pub use eligibility::{EligibilityQueryMsg, EligibilityResponse};
pub use registry::{
    NftInfoResponse, NftReceiveMsg, OwnerOfResponse, RegistryExecuteMsg, RegistryQueryMsg,
};
