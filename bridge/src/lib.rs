//! Assetra Bridge Contract - Cross-Ledger Transfer of Asset Certificates
//!
//! Moves unique real-world asset certificates between two CosmWasm chains.
//! The same contract is deployed on both chains and plays both roles.
//!
//! # Outbound Flow (Lock)
//! 1. Holder locks a certificate; the bridge takes custody and records an intent
//! 2. The intent is published in the lock event attributes and the `Outbox` query
//! 3. Relayers read it and attest it on the destination bridge
//!
//! # Incoming Flow (Quorum)
//! 1. Each relayer submits the full intent; the bridge recomputes its id
//! 2. The attestation reaching `required_approvals` executes the intent once:
//!    a wrapped unit `"{origin_chain_id}/{asset_ref}"` is minted to the recipient
//! 3. Any further attestation is absorbed
//! 4. Relayers confirm the execution back on the origin bridge; once the same
//!    threshold has confirmed, the origin intent is `Executed` and can no
//!    longer be reverted
//!
//! # Return Trip (Burn)
//! The wrapped unit is burned and the same pipeline releases the original from
//! custody on its home chain.
//!
//! # Security
//! - Per-account fixed-window rate limit on outbound transfers
//! - Optional eligibility registry check on outbound transfers
//! - Quorum of distinct relayers per intent, replay-safe intent ids
//! - 1:1 backing checks before every mint and release
//! - Admin revert after a bounded cooldown, emergency pause

pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod rate_limit;
pub mod roles;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::{compute_intent_id, keccak256};
