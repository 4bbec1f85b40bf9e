//! Inbound delivery handlers (ReceiveNative and ReceiveAsset).
//!
//! Both entry points authenticate in this order before touching any state:
//! 1. the caller is the configured message layer;
//! 2. the context's origin sender is the registered peer vault of the
//!    context's origin domain.
//!
//! Release per asset:
//! - canonical asset of this domain - transfer out of custody, or mint for the
//!   non-custodial asset
//! - canonical asset of another domain - mint the local representation,
//!   deploying it first on first encounter (completed in
//!   [`reply_deploy_representation`])
//!
//! A zero amount is accepted: resolution still happens, no token moves.

use common::{CanonicalAssetDescriptor, MessageContext};
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::factory::{self, Resolution};
use crate::guard;
use crate::registry::{self, AssetKind};
use crate::state::{Config, PendingDeployment, CONFIG, CUSTODY, PEERS, PENDING_DEPLOYMENT, STATS};

// ============================================================================
// ReceiveNative
// ============================================================================

/// Pass native value delivered by the message layer through to `to`.
pub fn execute_receive_native(
    deps: DepsMut,
    info: MessageInfo,
    context: MessageContext,
    origin_caller: String,
    to: String,
    value: Uint128,
) -> Result<Response, ContractError> {
    guard::acquire(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    authenticate(deps.as_ref(), &config, &info, &context)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let recipient = validate_recipient(deps.as_ref(), &to)?;

    let attached_ok = if value.is_zero() {
        info.funds.is_empty()
    } else {
        matches!(info.funds.as_slice(),
            [coin] if coin.denom == config.native_denom && coin.amount == value)
    };
    if !attached_ok {
        return Err(ContractError::InvalidFunds {
            reason: format!("attached funds must be exactly {}{}", value, config.native_denom),
        });
    }

    let mut messages: Vec<CosmosMsg> = vec![];
    if !value.is_zero() {
        messages.push(CosmosMsg::Bank(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: info.funds,
        }));
    }

    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.values_received += 1;
        Ok(stats)
    })?;

    guard::release(deps.storage);

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "value_received")
        .add_attribute("to", recipient)
        .add_attribute("origin_caller", origin_caller)
        .add_attribute("origin_domain_id", context.origin_domain_id.to_string())
        .add_attribute("value", value.to_string()))
}

// ============================================================================
// ReceiveAsset
// ============================================================================

/// Release `amount` of the asset described by `descriptor` to `to`.
#[allow(clippy::too_many_arguments)]
pub fn execute_receive_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    context: MessageContext,
    descriptor: CanonicalAssetDescriptor,
    origin_caller: String,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    guard::acquire(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    authenticate(deps.as_ref(), &config, &info, &context)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let recipient = validate_recipient(deps.as_ref(), &to)?;
    if descriptor.address.trim().is_empty() {
        return Err(ContractError::InvalidAsset {
            reason: "descriptor has an empty address".to_string(),
        });
    }

    if descriptor.domain_id == config.domain_id {
        let asset = deps.api.addr_validate(&descriptor.address)?;
        let release = match registry::classify(deps.storage, &asset)? {
            AssetKind::Representation => {
                return Err(ContractError::RegistryCorrupted {
                    reason: format!("{} is a representation, not a canonical asset", asset),
                })
            }
            AssetKind::NonCustodialCanonical => mint_msg(&asset, &recipient, amount)?,
            AssetKind::Canonical => {
                let held = CUSTODY.may_load(deps.storage, &asset)?.unwrap_or_default();
                if held < amount {
                    return Err(ContractError::InsufficientCustody {
                        held,
                        requested: amount,
                    });
                }
                CUSTODY.save(deps.storage, &asset, &(held - amount))?;
                transfer_msg(&asset, &recipient, amount)?
            }
        };

        record_received(deps, false)?;
        return Ok(received_response(
            release,
            &recipient,
            &origin_caller,
            context.origin_domain_id,
            &asset,
            amount,
        ));
    }

    match factory::get_or_create(deps.as_ref(), &env, &config, &descriptor)? {
        Resolution::Existing(representation) => {
            let release = mint_msg(&representation, &recipient, amount)?;
            record_received(deps, false)?;
            Ok(received_response(
                release,
                &recipient,
                &origin_caller,
                context.origin_domain_id,
                &representation,
                amount,
            ))
        }
        Resolution::Deploy { address, sub_msg } => {
            PENDING_DEPLOYMENT.save(
                deps.storage,
                &PendingDeployment {
                    descriptor: descriptor.clone(),
                    address: address.clone(),
                    origin_domain_id: context.origin_domain_id,
                    origin_caller,
                    to: recipient,
                    amount,
                },
            )?;

            // Lock stays held until the deployment reply registers the representation.
            Ok(Response::new()
                .add_submessage(sub_msg)
                .add_attribute("action", "deploy_representation")
                .add_attribute("canonical_domain_id", descriptor.domain_id.to_string())
                .add_attribute("canonical_address", descriptor.address)
                .add_attribute("representation", address))
        }
    }
}

/// Register a freshly deployed representation and release the pending amount.
pub fn reply_deploy_representation(
    deps: DepsMut,
    _env: Env,
    reply: Reply,
) -> Result<Response, ContractError> {
    let pending = PENDING_DEPLOYMENT
        .may_load(deps.storage)?
        .ok_or(ContractError::MissingPendingOperation)?;
    PENDING_DEPLOYMENT.remove(deps.storage);

    let response = reply.result.into_result().map_err(StdError::generic_err)?;
    let (representation, event) = factory::complete_deployment(
        deps.storage,
        &pending.descriptor,
        &pending.address,
        &response,
    )?;

    let release = mint_msg(&representation, &pending.to, pending.amount)?;
    record_received(deps, true)?;

    Ok(received_response(
        release,
        &pending.to,
        &pending.origin_caller,
        pending.origin_domain_id,
        &representation,
        pending.amount,
    )
    .add_event(event))
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn authenticate(
    deps: Deps,
    config: &Config,
    info: &MessageInfo,
    context: &MessageContext,
) -> Result<(), ContractError> {
    if info.sender != config.message_layer {
        return Err(ContractError::UnauthorizedMessageLayer);
    }

    match PEERS.may_load(deps.storage, context.origin_domain_id)? {
        Some(peer) if peer == context.origin_sender => Ok(()),
        _ => Err(ContractError::UnauthorizedPeer {
            domain_id: context.origin_domain_id,
            origin_sender: context.origin_sender.clone(),
        }),
    }
}

fn validate_recipient(deps: Deps, to: &str) -> Result<Addr, ContractError> {
    deps.api
        .addr_validate(to)
        .map_err(|e| ContractError::InvalidRecipient {
            reason: e.to_string(),
        })
}

/// Release message, or nothing for a zero amount (cw20 rejects zero transfers).
fn mint_msg(asset: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<Option<CosmosMsg>> {
    if amount.is_zero() {
        return Ok(None);
    }
    Ok(Some(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    })))
}

fn transfer_msg(asset: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<Option<CosmosMsg>> {
    if amount.is_zero() {
        return Ok(None);
    }
    Ok(Some(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: asset.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    })))
}

/// Update stats and release the reentrancy lock.
fn record_received(deps: DepsMut, deployed: bool) -> StdResult<()> {
    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.assets_received += 1;
        if deployed {
            stats.representations_deployed += 1;
        }
        Ok(stats)
    })?;
    guard::release(deps.storage);
    Ok(())
}

fn received_response(
    release: Option<CosmosMsg>,
    recipient: &Addr,
    origin_caller: &str,
    origin_domain_id: u64,
    asset: &Addr,
    amount: Uint128,
) -> Response {
    Response::new()
        .add_messages(release)
        .add_attribute("action", "asset_received")
        .add_attribute("to", recipient.to_string())
        .add_attribute("origin_caller", origin_caller)
        .add_attribute("origin_domain_id", origin_domain_id.to_string())
        .add_attribute("asset", asset.to_string())
        .add_attribute("amount", amount.to_string())
}
