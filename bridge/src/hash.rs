//! Intent id computation
//!
//! Relayers recompute the id off-chain from the lock record and the destination
//! bridge recomputes it on every attestation, so the layout is part of the wire
//! protocol and must never change.
//!
//! # Byte Layout (256 bytes total)
//! - Bytes 0-31:    kind (u8, left-padded)
//! - Bytes 32-63:   originChainId (u64, big-endian, left-padded)
//! - Bytes 64-95:   destinationChainId (u64, big-endian, left-padded)
//! - Bytes 96-127:  keccak256(assetRef)
//! - Bytes 128-159: keccak256(sender)
//! - Bytes 160-191: keccak256(recipient)
//! - Bytes 192-223: keccak256(tokenUri), empty string when absent
//! - Bytes 224-255: nonce (u64, big-endian, left-padded)

use cosmwasm_std::Binary;
use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;
use crate::state::IntentKind;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the intent id for an outbound transfer.
///
/// Variable-length fields are hashed into their slot so that no field can
/// bleed into its neighbour.
#[allow(clippy::too_many_arguments)]
pub fn compute_intent_id(
    kind: IntentKind,
    origin_chain_id: u64,
    destination_chain_id: u64,
    asset_ref: &str,
    sender: &str,
    recipient: &str,
    token_uri: Option<&str>,
    nonce: u64,
) -> [u8; 32] {
    let mut data = [0u8; 256];

    data[31] = kind.code();
    data[32 + 24..64].copy_from_slice(&origin_chain_id.to_be_bytes());
    data[64 + 24..96].copy_from_slice(&destination_chain_id.to_be_bytes());
    data[96..128].copy_from_slice(&keccak256(asset_ref.as_bytes()));
    data[128..160].copy_from_slice(&keccak256(sender.as_bytes()));
    data[160..192].copy_from_slice(&keccak256(recipient.as_bytes()));
    data[192..224].copy_from_slice(&keccak256(token_uri.unwrap_or_default().as_bytes()));
    data[224 + 24..256].copy_from_slice(&nonce.to_be_bytes());

    keccak256(&data)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 32-byte intent id from message input
pub fn parse_intent_id(id: &Binary) -> Result<[u8; 32], ContractError> {
    id.as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: id.len() })
}
