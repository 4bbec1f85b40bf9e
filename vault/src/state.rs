//! State definitions for the asset bridge vault
//!
//! Registry mappings are not defined here: they are private to the `registry`
//! module so that nothing outside the factory can write them.

use common::CanonicalAssetDescriptor;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Message layer contract, the only caller allowed to deliver messages
    pub message_layer: Addr,
    /// Domain id of the chain this vault is deployed on
    pub domain_id: u64,
    /// Denom carried by the native value path
    pub native_denom: String,
    /// Code id instantiated for new representations (cw20-base compatible)
    pub representation_code_id: u64,
    /// Whether sends and deliveries are currently halted
    pub paused: bool,
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub assets_sent: u64,
    pub assets_received: u64,
    pub values_sent: u64,
    pub values_received: u64,
    pub representations_deployed: u64,
}

// ============================================================================
// In-flight Operations
// ============================================================================

/// Outbound asset transfer, as validated by `SendAsset`.
#[cw_serde]
pub struct OutboundTransfer {
    pub sender: Addr,
    pub asset: Addr,
    pub descriptor: CanonicalAssetDescriptor,
    pub dest_domain_id: u64,
    /// Counterpart vault on the destination domain
    pub destination: String,
    pub to: String,
    pub gas_limit: u64,
    pub refund_address: String,
    pub memo: Option<String>,
    /// Native funds attached by the sender, forwarded as message layer fee
    pub fee: Vec<Coin>,
}

/// Canonical transfer waiting for the custody pull to settle.
///
/// Saved before the `TransferFrom` submessage and consumed by its reply, where
/// the received quantity is measured as a balance delta.
#[cw_serde]
pub struct PendingCustody {
    pub transfer: OutboundTransfer,
    pub balance_before: Uint128,
}

/// Inbound release waiting for its representation to be instantiated.
#[cw_serde]
pub struct PendingDeployment {
    pub descriptor: CanonicalAssetDescriptor,
    /// Address precomputed from the instantiate2 salt
    pub address: Addr,
    pub origin_domain_id: u64,
    pub origin_caller: String,
    pub to: Addr,
    pub amount: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:asset-bridge-vault";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "1.0.0";

/// Maximum memo size in bytes
pub const MAX_MEMO_LENGTH: usize = 256;

/// Largest decimals a cw20-base representation accepts
pub const MAX_DECIMALS: u8 = 18;

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Counterpart vaults on other domains
/// Key: domain id, Value: vault address on that domain
pub const PEERS: Map<u64, String> = Map::new("peers");

/// Canonical asset that is burned and minted instead of held in custody.
/// Set at most once.
pub const NON_CUSTODIAL_ASSET: Item<Addr> = Item::new("non_custodial_asset");

/// Amount of each canonical asset held in custody for outstanding transfers
/// Key: asset address, Value: amount
pub const CUSTODY: Map<&Addr, Uint128> = Map::new("custody");

/// Outgoing nonce counter, one per sent message
pub const OUTGOING_NONCE: Item<u64> = Item::new("outgoing_nonce");

pub const PENDING_CUSTODY: Item<PendingCustody> = Item::new("pending_custody");

pub const PENDING_DEPLOYMENT: Item<PendingDeployment> = Item::new("pending_deployment");
