//! Error types for the asset bridge contract
//!
//! Conflict cases (duplicate attestation, attestation on an executed or
//! reverted intent) are not errors: they return `Ok` with a `result` attribute.

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unknown relayer: {relayer}")]
    UnknownRelayer { relayer: String },

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("Unauthorized collaborator: {sender} is not the configured {expected}")]
    UnauthorizedCollaborator { sender: String, expected: String },

    // ========================================================================
    // Precondition Errors
    // ========================================================================

    #[error("Not owner: {account} does not own asset {asset_ref}")]
    NotOwner { account: String, asset_ref: String },

    #[error("Not eligible: {account} failed the eligibility check")]
    NotEligible { account: String },

    #[error("Rate limit exceeded: {account} used {max_per_window} transfers, window resets at {window_ends_at}")]
    RateLimitExceeded {
        account: String,
        max_per_window: u32,
        window_ends_at: u64,
    },

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Chain not supported: {chain_id}")]
    ChainNotSupported { chain_id: u64 },

    #[error("Invalid recipient: {reason}")]
    InvalidRecipient { reason: String },

    // ========================================================================
    // Intent Errors
    // ========================================================================

    #[error("Intent not found: {intent_id}")]
    IntentNotFound { intent_id: String },

    #[error("Intent hash mismatch: payload hashes to {computed}, claimed {claimed}")]
    IntentHashMismatch { claimed: String, computed: String },

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Already released: intent {intent_id} was executed")]
    AlreadyReleased { intent_id: String },

    #[error("Intent {intent_id} cannot be retried from status {status}")]
    IntentNotRetryable { intent_id: String, status: String },

    #[error("Intent {intent_id} cannot be reverted from status {status}")]
    IntentNotRevertible { intent_id: String, status: String },

    #[error("Revert cooldown active: {remaining_seconds} seconds remaining")]
    RevertCooldownActive { remaining_seconds: u64 },

    #[error("Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Invalid required approvals {required}: must be between 1 and relayer count {relayer_count}")]
    InvalidRequiredApprovals { required: u32, relayer_count: u32 },

    #[error("Invalid rate limit: {reason}")]
    InvalidRateLimit { reason: String },

    #[error("Relayer already registered")]
    RelayerAlreadyRegistered,

    #[error("Relayer not registered")]
    RelayerNotRegistered,

    #[error("Invalid revert cooldown {seconds}: must be at most {max} seconds")]
    InvalidRevertCooldown { seconds: u64, max: u64 },

    #[error("Cannot remove relayer: {relayer_count} relayers would fall below {required} required approvals")]
    CannotRemoveRelayer { relayer_count: u32, required: u32 },

    // ========================================================================
    // Admin Errors
    // ========================================================================

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },
}
