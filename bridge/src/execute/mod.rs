//! Execute handlers for the asset bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `outgoing` - Lock, Burn and ReceiveNft handlers for outbound transfers
//! - `quorum` - Relayer attestations for incoming transfers and execution
//!   confirmations for outbound ones
//! - `settlement` - Execute-on-quorum, its reply, and retry
//! - `config` - Rate limit, relayer, chain and collaborator management
//! - `admin` - Pause, unpause, admin transfer, and intent revert

mod admin;
mod config;
mod outgoing;
mod quorum;
mod settlement;

pub use admin::*;
pub use config::*;
pub use outgoing::*;
pub use quorum::*;
pub use settlement::*;
