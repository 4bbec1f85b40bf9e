//! Deterministic identifiers derived from canonical asset identities.
//!
//! # Salt Layout
//! - Bytes 0-7:  domain id (u64, big-endian)
//! - Bytes 8-..: canonical address (UTF-8)
//!
//! The salt is keccak256 over that buffer. It names the representation
//! deployment, so the same canonical identity always maps to the same label
//! regardless of what else the registry holds.

use common::keccak256;

/// keccak256(domain_id_be || address)
pub fn representation_salt(domain_id: u64, address: &str) -> [u8; 32] {
    let mut data = Vec::with_capacity(8 + address.len());
    data.extend_from_slice(&domain_id.to_be_bytes());
    data.extend_from_slice(address.as_bytes());
    keccak256(&data)
}

/// Instantiation label of the representation for `(domain_id, address)`.
pub fn representation_label(domain_id: u64, address: &str) -> String {
    format!(
        "representation-{}",
        hex::encode(representation_salt(domain_id, address))
    )
}
