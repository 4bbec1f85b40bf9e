//! Message types for the asset bridge vault
//!
//! This module defines all messages for instantiation, execution, and queries.
//! The receive variants of [`ExecuteMsg`] serialize identically to
//! [`common::DeliveryMsg`], which is what a message layer sends.

use common::{CanonicalAssetDescriptor, MessageContext, TransferMessage};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::registry::AssetKind;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Counterpart vault of another domain
#[cw_serde]
pub struct PeerInput {
    pub domain_id: u64,
    pub address: String,
}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Message layer contract allowed to deliver messages
    pub message_layer: String,
    /// Domain id of this chain (must not be 0)
    pub domain_id: u64,
    /// Denom of the native value path
    pub native_denom: String,
    /// Code id used to instantiate representations
    pub representation_code_id: u64,
    /// Initial peer vaults
    pub peers: Vec<PeerInput>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound Transfers
    // ========================================================================
    /// Send native value to `to` on another domain
    ///
    /// Authorization: Anyone. The value is the attached `native_denom` funds.
    SendNative {
        dest_domain_id: u64,
        /// Recipient on the destination domain
        to: String,
        gas_limit: u64,
        /// Defaults to the sender
        refund_address: Option<String>,
        memo: Option<String>,
    },

    /// Send a cw20 asset to `to` on another domain
    ///
    /// Authorization: Anyone. The sender must have granted the vault an
    /// allowance of at least `amount` on `asset`. Attached native funds are
    /// forwarded to the message layer as fee.
    SendAsset {
        dest_domain_id: u64,
        to: String,
        asset: String,
        amount: Uint128,
        gas_limit: u64,
        refund_address: Option<String>,
        memo: Option<String>,
    },

    // ========================================================================
    // Inbound Delivery (message layer only)
    // ========================================================================
    /// Deliver native value sent by a peer vault
    ///
    /// Authorization: Message layer, on behalf of a registered peer
    ReceiveNative {
        context: MessageContext,
        origin_caller: String,
        to: String,
        value: Uint128,
    },

    /// Release an asset sent by a peer vault
    ///
    /// Authorization: Message layer, on behalf of a registered peer
    ReceiveAsset {
        context: MessageContext,
        descriptor: CanonicalAssetDescriptor,
        origin_caller: String,
        to: String,
        amount: Uint128,
    },

    // ========================================================================
    // Administration
    // ========================================================================
    /// Register or replace the counterpart vault of a domain
    ///
    /// Authorization: Admin only
    SetPeer { domain_id: u64, address: String },

    /// Remove the counterpart vault of a domain
    ///
    /// Authorization: Admin only
    RemovePeer { domain_id: u64 },

    /// Replace the message layer
    ///
    /// Authorization: Admin only
    SetMessageLayer { message_layer: String },

    /// Designate the non-custodial canonical asset (once)
    ///
    /// Authorization: Admin only. The vault must be the asset's minter.
    SetNonCustodialAsset { asset: String },

    /// Authorization: Admin only
    Pause {},

    /// Authorization: Admin only
    Unpause {},

    /// Authorization: Admin only
    TransferAdmin { new_admin: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatsResponse)]
    Stats {},

    #[returns(PeerResponse)]
    Peer { domain_id: u64 },

    #[returns(PeersResponse)]
    Peers {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Custody behaviour of a local asset
    #[returns(ClassifyResponse)]
    Classify { asset: String },

    /// Canonical descriptor of a representation
    #[returns(CanonicalOfResponse)]
    CanonicalOf { representation: String },

    /// Local representation of a canonical asset
    #[returns(RepresentationOfResponse)]
    RepresentationOf { domain_id: u64, address: String },

    #[returns(RepresentationsResponse)]
    Representations {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Amount of a canonical asset held in custody
    #[returns(CustodyBalanceResponse)]
    CustodyBalance { asset: String },

    #[returns(NonceResponse)]
    CurrentNonce {},

    /// Recompute the correlation hash of a transfer message
    #[returns(CorrelationHashResponse)]
    CorrelationHash { message: TransferMessage },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub message_layer: Addr,
    pub domain_id: u64,
    pub native_denom: String,
    pub representation_code_id: u64,
    pub paused: bool,
    pub non_custodial_asset: Option<Addr>,
}

#[cw_serde]
pub struct StatsResponse {
    pub assets_sent: u64,
    pub assets_received: u64,
    pub values_sent: u64,
    pub values_received: u64,
    pub representations_deployed: u64,
}

#[cw_serde]
pub struct PeerResponse {
    pub domain_id: u64,
    pub address: Option<String>,
}

#[cw_serde]
pub struct PeersResponse {
    pub peers: Vec<PeerInput>,
}

#[cw_serde]
pub struct ClassifyResponse {
    pub asset: Addr,
    pub kind: AssetKind,
}

#[cw_serde]
pub struct CanonicalOfResponse {
    pub representation: Addr,
    pub descriptor: Option<CanonicalAssetDescriptor>,
}

#[cw_serde]
pub struct RepresentationOfResponse {
    pub domain_id: u64,
    pub address: String,
    pub representation: Option<Addr>,
}

#[cw_serde]
pub struct RepresentationEntry {
    pub representation: Addr,
    pub descriptor: CanonicalAssetDescriptor,
}

#[cw_serde]
pub struct RepresentationsResponse {
    pub representations: Vec<RepresentationEntry>,
}

#[cw_serde]
pub struct CustodyBalanceResponse {
    pub asset: Addr,
    pub amount: Uint128,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct CorrelationHashResponse {
    pub hash: Binary,
}
