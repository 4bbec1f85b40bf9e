//! Asset Bridge Vault - Custody and Identity Core of a Two-Sided Asset Bridge
//!
//! The vault holds canonical assets of its own domain in custody, tracks which
//! local cw20 contracts are representations of assets from other domains, and
//! exchanges transfer messages with peer vaults through a message layer.
//!
//! # Outbound Flow
//! 1. User approves the vault and calls `SendAsset`
//! 2. The vault locks (canonical), burns (representation or non-custodial asset)
//! 3. A `TransferMessage` is handed to the message layer
//!
//! # Inbound Flow
//! 1. The message layer calls `ReceiveAsset` with the authenticated origin
//! 2. The vault checks the caller and the origin peer
//! 3. Tokens are unlocked, minted, or a representation is deployed then minted
//!
//! # Security
//! - Only the message layer may deliver, only on behalf of a registered peer
//! - Append-only token identity registry
//! - Reentrancy guard across submessage replies
//! - Emergency pause

pub mod contract;
pub mod error;
mod execute;
pub mod factory;
mod guard;
pub mod hash;
pub mod msg;
mod query;
pub mod registry;
pub mod state;

pub use crate::error::ContractError;
pub use crate::registry::AssetKind;
