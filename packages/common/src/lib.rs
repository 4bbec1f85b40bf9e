//! Common - Shared Types for the Asset Bridge
//!
//! This package holds the types that cross the boundary between a vault and the
//! message layer that carries its transfers: canonical asset descriptors, the
//! transfer message with its correlation hash, and the delivery calls a message
//! layer issues against the destination vault.

pub mod descriptor;
pub mod hash;
pub mod message;

pub use descriptor::{is_zero_identity, CanonicalAssetDescriptor};
pub use hash::{bytes32_to_hex, keccak256};
pub use message::{DeliveryMsg, MessageContext, MessageLayerExecuteMsg, Payload, TransferMessage};
