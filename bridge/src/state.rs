//! State definitions for the Assetra asset bridge
//!
//! One deployment holds both sides of the bridge: intents originating here
//! (custody and burn records, outbox, execution confirmations) and intents
//! arriving from other chains (attestations, wrapped unit records). All of
//! them share the `INTENTS` map; the origin chain id folded into the intent
//! hash keeps the two apart.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Whether the bridge is currently paused
    pub paused: bool,
    /// Chain id of the ledger this deployment lives on
    pub this_chain_id: u64,
    /// Registry holding original certificates native to this chain
    pub asset_registry: Addr,
    /// Registry holding wrapped units minted by this bridge
    pub wrapped_registry: Addr,
    /// Eligibility registry consulted on outbound transfers (none = everyone eligible)
    pub eligibility_registry: Option<Addr>,
    /// Distinct relayer attestations needed to execute an incoming intent
    pub required_approvals: u32,
    /// Seconds after `created_at` before an intent may be reverted
    pub revert_cooldown: u64,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

/// Remote chain registration
#[cw_serde]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Human-readable chain name
    pub name: String,
    /// Whether new outbound transfers may target this chain
    pub enabled: bool,
}

/// Global outbound rate limit, applied per account
#[cw_serde]
pub struct RateLimitConfig {
    pub window_seconds: u64,
    pub max_per_window: u32,
}

/// Fixed-window usage for one account
#[cw_serde]
pub struct RateWindow {
    /// Block time (seconds) the current window opened
    pub window_start: u64,
    /// Outbound transfers counted in the current window
    pub count_in_window: u32,
}

// ============================================================================
// Transfer Intents
// ============================================================================

/// What an intent moves and which effect it has on the destination.
#[cw_serde]
#[derive(Copy)]
pub enum IntentKind {
    /// Original custodied on the origin chain, wrapped unit minted on the destination
    Lock,
    /// Wrapped unit burned on the origin chain, original released on the destination
    Burn,
}

impl IntentKind {
    /// Byte committed into the intent hash
    pub fn code(&self) -> u8 {
        match self {
            IntentKind::Lock => 1,
            IntentKind::Burn => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Lock => "lock",
            IntentKind::Burn => "burn",
        }
    }
}

/// Intent lifecycle. Moves forward only, except the admin `Reverted` path.
#[cw_serde]
#[derive(Copy)]
pub enum IntentStatus {
    /// Recorded on the origin chain, waiting for relayers to confirm execution
    Locked,
    /// Seen by at least one relayer on the destination, below quorum
    AttestationPending,
    /// Quorum reached; the effect has not succeeded yet
    Quorumed,
    /// Effect applied on the destination, or confirmed by a relayer quorum on
    /// the origin. Immutable from here on.
    Executed,
    /// Cancelled by the admin after the cooldown
    Reverted,
}

impl IntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentStatus::Locked => "locked",
            IntentStatus::AttestationPending => "attestation_pending",
            IntentStatus::Quorumed => "quorumed",
            IntentStatus::Executed => "executed",
            IntentStatus::Reverted => "reverted",
        }
    }
}

/// One cross-ledger movement of one asset
#[cw_serde]
pub struct TransferIntent {
    /// keccak256 of the payload fields, see `hash::compute_intent_id`
    pub intent_id: [u8; 32],
    pub kind: IntentKind,
    /// Certificate token id in the origin registry
    pub asset_ref: String,
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    /// Account on the origin chain
    pub sender: String,
    /// Account on the destination chain
    pub recipient: String,
    /// Outbound nonce of the origin bridge
    pub nonce: u64,
    /// Certificate metadata carried to the wrapped unit
    pub token_uri: Option<String>,
    pub status: IntentStatus,
    /// Lock time on the origin chain, first attestation time on the destination
    pub created_at: Timestamp,
    pub executed_at: Option<Timestamp>,
    pub reverted_at: Option<Timestamp>,
}

/// A single relayer's vote for an intent
#[cw_serde]
pub struct Attestation {
    pub submitted_at: Timestamp,
}

/// Original certificate held by the bridge
#[cw_serde]
pub struct Custody {
    /// Intent that moved the certificate into custody
    pub intent_id: [u8; 32],
    /// Account the certificate came from
    pub depositor: Addr,
}

/// Token id of the wrapped unit for `asset_ref` from `origin_chain_id`.
///
/// Asset refs are only unique within their origin registry, so the wrapped
/// registry namespaces them by origin chain: `"{origin_chain_id}/{asset_ref}"`.
pub fn wrapped_token_id(origin_chain_id: u64, asset_ref: &str) -> String {
    format!("{}/{}", origin_chain_id, asset_ref)
}

/// Split a wrapped token id back into origin chain and asset ref.
pub fn parse_wrapped_token_id(token_id: &str) -> Option<(u64, &str)> {
    let (chain, asset_ref) = token_id.split_once('/')?;
    let chain = chain.parse().ok()?;
    Some((chain, asset_ref))
}

/// Wrapped unit minted by the bridge and not yet burned
#[cw_serde]
pub struct WrappedUnit {
    /// Intent that minted (or re-minted) the unit
    pub intent_id: [u8; 32],
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Lock intents created here
    pub total_locked: u64,
    /// Burn intents created here
    pub total_burned: u64,
    /// Wrapped units minted by executed intents
    pub total_minted: u64,
    /// Originals released by executed intents
    pub total_released: u64,
    pub total_reverted: u64,
    /// Execution attempts whose effect failed
    pub failed_executions: u64,
    /// Originals currently in custody
    pub custodied: u64,
    /// Wrapped units currently outstanding
    pub wrapped_outstanding: u64,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:assetra-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Default revert cooldown in seconds (24 hours)
pub const DEFAULT_REVERT_COOLDOWN: u64 = 86_400;

/// Upper bound on the revert cooldown (30 days)
pub const MAX_REVERT_COOLDOWN: u64 = 2_592_000;

/// Reply id for the execute-on-quorum sub-message
pub const EXECUTE_REPLY_ID: u64 = 1;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Registered remote chains
pub const CHAINS: Map<u64, ChainConfig> = Map::new("chains");

// ============================================================================
// Rate Limiting
// ============================================================================

pub const RATE_LIMIT: Item<RateLimitConfig> = Item::new("rate_limit");

/// Key: account, Value: that account's current window
pub const RATE_WINDOWS: Map<&Addr, RateWindow> = Map::new("rate_windows");

// ============================================================================
// Intents and Attestations
// ============================================================================

/// Key: 32-byte intent id, Value: TransferIntent
pub const INTENTS: Map<&[u8], TransferIntent> = Map::new("intents");

/// Key: (intent id, relayer), Value: Attestation
pub const ATTESTATIONS: Map<(&[u8], &Addr), Attestation> = Map::new("attestations");

/// Distinct relayers that attested each intent
pub const ATTESTATION_COUNT: Map<&[u8], u32> = Map::new("attestation_count");

/// Key: (intent id, relayer), Value: confirmation that an outbound intent
/// executed on its destination
pub const CONFIRMATIONS: Map<(&[u8], &Addr), Attestation> = Map::new("confirmations");

/// Distinct relayers that confirmed each outbound intent
pub const CONFIRMATION_COUNT: Map<&[u8], u32> = Map::new("confirmation_count");

/// Next outbound nonce
pub const OUTGOING_NONCE: Item<u64> = Item::new("outgoing_nonce");

/// Key: nonce, Value: intent id created with it
pub const OUTBOX: Map<u64, [u8; 32]> = Map::new("outbox");

/// Intent whose effect sub-message is in flight, consumed by `reply`
pub const PENDING_EXECUTION: Item<[u8; 32]> = Item::new("pending_execution");

// ============================================================================
// Relayers
// ============================================================================

/// Key: relayer address, Value: whether active
pub const RELAYERS: Map<&Addr, bool> = Map::new("relayers");

pub const RELAYER_COUNT: Item<u32> = Item::new("relayer_count");

// ============================================================================
// Asset Bookkeeping
// ============================================================================

/// Key: asset ref in the asset registry, Value: Custody
pub const CUSTODY: Map<&str, Custody> = Map::new("custody");

/// Key: (origin chain id, asset ref in the origin registry), Value: WrappedUnit
pub const WRAPPED_UNITS: Map<(u64, &str), WrappedUnit> = Map::new("wrapped_units");
