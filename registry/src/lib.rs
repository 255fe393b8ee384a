//! Certificate Registry
//!
//! Tracks ownership of unique real-world asset certificates. The same code is
//! deployed for original certificates and for the wrapped units the bridge mints
//! on a destination chain; in the latter case the bridge holds the minter role.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
