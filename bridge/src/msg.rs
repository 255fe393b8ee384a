//! Message types for the Assetra asset bridge
//!
//! This module defines all messages for instantiation, execution, and queries.

use common::NftReceiveMsg;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp};

use crate::state::{IntentKind, IntentStatus, TransferIntent};

pub use crate::state::{ChainConfig, Stats};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Chain id of the ledger this deployment lives on
    pub this_chain_id: u64,
    /// Registry of original certificates native to this chain
    pub asset_registry: String,
    /// Registry of wrapped units; the bridge must be granted its minter role
    pub wrapped_registry: String,
    /// Eligibility registry consulted on outbound transfers
    pub eligibility_registry: Option<String>,
    /// Initial relayer addresses
    pub relayers: Vec<String>,
    /// Distinct relayer attestations needed to execute an intent
    pub required_approvals: u32,
    /// Rate limit window length in seconds
    pub window_seconds: u64,
    /// Outbound transfers allowed per account per window
    pub max_per_window: u32,
    /// Revert cooldown in seconds (default: 24 hours)
    pub revert_cooldown: Option<u64>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound Transfers
    // ========================================================================
    /// Move an original certificate into custody and record a lock intent.
    /// The caller must have approved the bridge on the asset registry.
    Lock {
        asset_ref: String,
        /// Account on the destination chain
        recipient: String,
        destination_chain_id: u64,
    },

    /// Burn a wrapped unit and record a burn intent that releases the
    /// original on its origin chain. The caller must have approved the bridge
    /// on the wrapped registry.
    Burn {
        asset_ref: String,
        recipient: String,
        destination_chain_id: u64,
    },

    /// Hook invoked by a registry's `SendNft`, carrying a `ReceiveMsg`
    ReceiveNft(NftReceiveMsg),

    // ========================================================================
    // Incoming Transfers
    // ========================================================================
    /// Attest an intent read from the origin chain's outbox (relayer only).
    /// Executes the intent when the attestation reaches quorum.
    Attest { intent: IntentPayload },

    /// Re-drive a quorumed intent whose effect failed (relayer or admin)
    RetryExecution { intent_id: Binary },

    /// Confirm that an intent created on this chain executed on its
    /// destination (relayer only). Once `required_approvals` relayers agree
    /// the intent becomes `Executed` here and can no longer be reverted.
    ConfirmExecution { intent_id: Binary },

    // ========================================================================
    // Administration
    // ========================================================================
    /// Cancel a locked or pending intent after the revert cooldown (admin only).
    /// Intents whose execution has been confirmed are `Executed` and refused.
    RevertIntent { intent_id: Binary },

    SetRateLimit {
        window_seconds: u64,
        max_per_window: u32,
    },

    /// Must stay within 1..=relayer count
    SetRequiredApprovals { required: u32 },

    AddRelayer { relayer: String },

    RemoveRelayer { relayer: String },

    RegisterChain { chain_id: u64, name: String },

    UpdateChain {
        chain_id: u64,
        name: Option<String>,
        enabled: Option<bool>,
    },

    /// Set or clear (None) the eligibility registry
    SetEligibilityRegistry { registry: Option<String> },

    /// At most 30 days
    SetRevertCooldown { seconds: u64 },

    /// Stop outbound transfers and attestations
    Pause {},

    Unpause {},

    /// Propose a new admin (starts 7-day timelock)
    ProposeAdmin { new_admin: String },

    /// Accept the admin role once the timelock has passed (pending admin only)
    AcceptAdmin {},

    CancelAdminProposal {},
}

/// Messages embedded in `SendNft` to the bridge
#[cw_serde]
pub enum ReceiveMsg {
    /// Sent through the asset registry
    Lock {
        recipient: String,
        destination_chain_id: u64,
    },
    /// Sent through the wrapped registry
    Burn {
        recipient: String,
        destination_chain_id: u64,
    },
}

/// Everything a relayer reads from the origin chain's lock record.
/// The destination recomputes `intent_id` from the remaining fields.
#[cw_serde]
pub struct IntentPayload {
    pub intent_id: Binary,
    pub kind: IntentKind,
    pub asset_ref: String,
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    pub sender: String,
    pub recipient: String,
    pub nonce: u64,
    pub token_uri: Option<String>,
}

impl From<&TransferIntent> for IntentPayload {
    fn from(intent: &TransferIntent) -> Self {
        IntentPayload {
            intent_id: Binary::from(intent.intent_id.to_vec()),
            kind: intent.kind,
            asset_ref: intent.asset_ref.clone(),
            origin_chain_id: intent.origin_chain_id,
            destination_chain_id: intent.destination_chain_id,
            sender: intent.sender.clone(),
            recipient: intent.recipient.clone(),
            nonce: intent.nonce,
            token_uri: intent.token_uri.clone(),
        }
    }
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Fails if the intent is unknown
    #[returns(IntentResponse)]
    Intent { intent_id: Binary },

    /// All intents ordered by id
    #[returns(IntentsResponse)]
    Intents {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    /// Intents created on this chain, ordered by nonce. Relayers poll this.
    #[returns(OutboxResponse)]
    Outbox {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(AttestationsResponse)]
    Attestations { intent_id: Binary },

    #[returns(HasAttestedResponse)]
    HasAttested { intent_id: Binary, relayer: String },

    #[returns(RelayersResponse)]
    Relayers {},

    #[returns(IsRelayerResponse)]
    IsRelayer { address: String },

    #[returns(RateLimitResponse)]
    RateLimit {},

    /// Window of `account` as it would be evaluated at the current block time
    #[returns(RateWindowResponse)]
    RateWindow { account: String },

    #[returns(CustodyResponse)]
    Custody { asset_ref: String },

    /// Wrapped unit of original `asset_ref` from `origin_chain_id`
    #[returns(WrappedUnitResponse)]
    WrappedUnit {
        origin_chain_id: u64,
        asset_ref: String,
    },

    /// Originals in custody and wrapped units outstanding
    #[returns(SupplyResponse)]
    Supply {},

    #[returns(ChainConfig)]
    Chain { chain_id: u64 },

    #[returns(ChainsResponse)]
    Chains {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(Stats)]
    Stats {},

    /// Nonce the next outbound intent will use
    #[returns(NonceResponse)]
    CurrentNonce {},

    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    /// Compute an intent id without touching state
    #[returns(ComputeIntentIdResponse)]
    ComputeIntentId {
        kind: IntentKind,
        asset_ref: String,
        origin_chain_id: u64,
        destination_chain_id: u64,
        sender: String,
        recipient: String,
        nonce: u64,
        token_uri: Option<String>,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub this_chain_id: u64,
    pub asset_registry: Addr,
    pub wrapped_registry: Addr,
    pub eligibility_registry: Option<Addr>,
    pub required_approvals: u32,
    pub relayer_count: u32,
    pub revert_cooldown: u64,
}

#[cw_serde]
pub struct IntentResponse {
    pub intent_id: Binary,
    pub kind: IntentKind,
    pub asset_ref: String,
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    pub sender: String,
    pub recipient: String,
    pub nonce: u64,
    pub token_uri: Option<String>,
    pub status: IntentStatus,
    pub created_at: Timestamp,
    pub executed_at: Option<Timestamp>,
    pub reverted_at: Option<Timestamp>,
    /// Distinct relayers that attested so far
    pub attestations: u32,
    /// Distinct relayers that confirmed execution on the destination
    /// (outbound intents only)
    pub confirmations: u32,
}

impl IntentResponse {
    pub fn payload(&self) -> IntentPayload {
        IntentPayload {
            intent_id: self.intent_id.clone(),
            kind: self.kind,
            asset_ref: self.asset_ref.clone(),
            origin_chain_id: self.origin_chain_id,
            destination_chain_id: self.destination_chain_id,
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            nonce: self.nonce,
            token_uri: self.token_uri.clone(),
        }
    }
}

#[cw_serde]
pub struct IntentsResponse {
    pub intents: Vec<IntentResponse>,
}

#[cw_serde]
pub struct OutboxEntry {
    pub nonce: u64,
    pub status: IntentStatus,
    pub payload: IntentPayload,
}

#[cw_serde]
pub struct OutboxResponse {
    pub entries: Vec<OutboxEntry>,
}

#[cw_serde]
pub struct AttestationInfo {
    pub relayer: Addr,
    pub submitted_at: Timestamp,
}

#[cw_serde]
pub struct AttestationsResponse {
    pub intent_id: Binary,
    pub count: u32,
    pub required: u32,
    pub attestations: Vec<AttestationInfo>,
}

#[cw_serde]
pub struct HasAttestedResponse {
    pub attested: bool,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<Addr>,
    pub required_approvals: u32,
}

#[cw_serde]
pub struct IsRelayerResponse {
    pub is_relayer: bool,
}

#[cw_serde]
pub struct RateLimitResponse {
    pub window_seconds: u64,
    pub max_per_window: u32,
}

#[cw_serde]
pub struct RateWindowResponse {
    pub account: Addr,
    pub window_start: u64,
    pub count_in_window: u32,
    pub remaining: u32,
    pub window_ends_at: u64,
}

#[cw_serde]
pub struct CustodyResponse {
    pub asset_ref: String,
    pub in_custody: bool,
    pub intent_id: Option<Binary>,
    pub depositor: Option<Addr>,
}

#[cw_serde]
pub struct WrappedUnitResponse {
    pub origin_chain_id: u64,
    pub asset_ref: String,
    /// Token id in the wrapped registry
    pub token_id: String,
    pub outstanding: bool,
    pub intent_id: Option<Binary>,
}

#[cw_serde]
pub struct SupplyResponse {
    pub custodied: u64,
    pub wrapped_outstanding: u64,
}

#[cw_serde]
pub struct ChainsResponse {
    pub chains: Vec<ChainConfig>,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct ComputeIntentIdResponse {
    pub intent_id: Binary,
    pub intent_id_hex: String,
}
