//! Error types for the asset bridge vault

use cosmwasm_std::{StdError, Uint128};
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

    #[error("Unauthorized: caller is not the message layer")]
    UnauthorizedMessageLayer,

    #[error("Unauthorized peer: {origin_sender} is not the vault of domain {domain_id}")]
    UnauthorizedPeer {
        domain_id: u64,
        origin_sender: String,
    },

    // ========================================================================
    // Bridge State Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Reentrant call rejected")]
    Reentrancy,

    #[error("Unknown domain: {domain_id}")]
    UnknownDomain { domain_id: u64 },

    #[error("Invalid domain: {reason}")]
    InvalidDomain { reason: String },

    // ========================================================================
    // Input Validation Errors
    // ========================================================================

    #[error("Invalid recipient: {reason}")]
    InvalidRecipient { reason: String },

    #[error("Invalid asset: {reason}")]
    InvalidAsset { reason: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("Memo too long: {len} bytes, maximum is {max}")]
    MemoTooLong { len: usize, max: usize },

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Registry corrupted: {reason}")]
    RegistryCorrupted { reason: String },

    #[error("Registry conflict: {reason}")]
    RegistryConflict { reason: String },

    #[error("Representation deployment already in progress")]
    DeploymentInProgress,

    #[error("Representation address {address} is already occupied")]
    AddressOccupied { address: String },

    #[error("Representation deployed at {actual}, expected {expected}")]
    DeploymentAddressMismatch { expected: String, actual: String },

    #[error("Non-custodial asset already set")]
    NonCustodialAssetAlreadySet,

    // ========================================================================
    // Custody Errors
    // ========================================================================

    #[error("Insufficient custody: holding {held}, requested {requested}")]
    InsufficientCustody { held: Uint128, requested: Uint128 },

    #[error("Asset {asset} is held in custody: {held}")]
    AssetInCustody { asset: String, held: Uint128 },

    // ========================================================================
    // Reply Errors
    // ========================================================================

    #[error("Unknown reply id: {id}")]
    UnknownReply { id: u64 },

    #[error("No pending operation for reply")]
    MissingPendingOperation,
}
