//! Admin operations handlers.
//!
//! This module handles:
//! - Peer vault registration
//! - Message layer replacement
//! - Non-custodial asset designation
//! - Pause/unpause and admin transfer

use common::is_zero_identity;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Storage};

use super::outgoing::query_balance;
use crate::error::ContractError;
use crate::registry;
use crate::state::{Config, CONFIG, CUSTODY, NON_CUSTODIAL_ASSET, PEERS};

fn only_admin(storage: &dyn Storage, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

// ============================================================================
// Peer Management
// ============================================================================

/// Register or replace the counterpart vault of `domain_id`.
pub fn execute_set_peer(
    deps: DepsMut,
    info: MessageInfo,
    domain_id: u64,
    address: String,
) -> Result<Response, ContractError> {
    let config = only_admin(deps.storage, &info)?;

    if domain_id == 0 || domain_id == config.domain_id {
        return Err(ContractError::InvalidDomain {
            reason: format!("cannot register a peer for domain {}", domain_id),
        });
    }
    if is_zero_identity(&address) {
        return Err(ContractError::InvalidRecipient {
            reason: "peer address is the zero identity".to_string(),
        });
    }

    let address = address.trim().to_string();
    PEERS.save(deps.storage, domain_id, &address)?;

    Ok(Response::new()
        .add_attribute("action", "set_peer")
        .add_attribute("domain_id", domain_id.to_string())
        .add_attribute("peer", address))
}

pub fn execute_remove_peer(
    deps: DepsMut,
    info: MessageInfo,
    domain_id: u64,
) -> Result<Response, ContractError> {
    only_admin(deps.storage, &info)?;

    if !PEERS.has(deps.storage, domain_id) {
        return Err(ContractError::UnknownDomain { domain_id });
    }
    PEERS.remove(deps.storage, domain_id);

    Ok(Response::new()
        .add_attribute("action", "remove_peer")
        .add_attribute("domain_id", domain_id.to_string()))
}

// ============================================================================
// Message Layer & Assets
// ============================================================================

pub fn execute_set_message_layer(
    deps: DepsMut,
    info: MessageInfo,
    message_layer: String,
) -> Result<Response, ContractError> {
    let mut config = only_admin(deps.storage, &info)?;

    config.message_layer = deps.api.addr_validate(&message_layer)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_message_layer")
        .add_attribute("message_layer", config.message_layer))
}

/// Designate the canonical asset that uses burn/mint instead of custody.
///
/// Can only be set once, and only while the vault holds none of the asset:
/// tokens already locked could never be released once returning transfers
/// switch to minting.
pub fn execute_set_non_custodial_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
) -> Result<Response, ContractError> {
    only_admin(deps.storage, &info)?;

    if NON_CUSTODIAL_ASSET.may_load(deps.storage)?.is_some() {
        return Err(ContractError::NonCustodialAssetAlreadySet);
    }
    let asset = deps.api.addr_validate(&asset)?;
    if registry::is_representation(deps.storage, &asset)? {
        return Err(ContractError::InvalidAsset {
            reason: format!("{} is a representation", asset),
        });
    }

    let ledger = CUSTODY.may_load(deps.storage, &asset)?.unwrap_or_default();
    let held = ledger.max(query_balance(&deps.querier, &asset, &env.contract.address)?);
    if !held.is_zero() {
        return Err(ContractError::AssetInCustody {
            asset: asset.to_string(),
            held,
        });
    }
    NON_CUSTODIAL_ASSET.save(deps.storage, &asset)?;

    Ok(Response::new()
        .add_attribute("action", "set_non_custodial_asset")
        .add_attribute("asset", asset))
}

// ============================================================================
// Pause/Unpause & Admin Transfer
// ============================================================================

/// Pause the vault (stops sends and deliveries).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = only_admin(deps.storage, &info)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "pause"))
}

pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = only_admin(deps.storage, &info)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

pub fn execute_transfer_admin(
    deps: DepsMut,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    let mut config = only_admin(deps.storage, &info)?;

    config.admin = deps.api.addr_validate(&new_admin)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_admin")
        .add_attribute("new_admin", config.admin))
}
