//! Outbound transfer handlers (SendNative and SendAsset).
//!
//! Custody action per asset kind:
//! - `Representation` - burned from the sender, descriptor from the registry
//! - `NonCustodialCanonical` - burned from the sender, never held by the vault
//! - `Canonical` - pulled into custody; the forwarded quantity is the measured
//!   balance delta, settled in [`reply_custody_pull`]

use common::{
    bytes32_to_hex, is_zero_identity, CanonicalAssetDescriptor, MessageLayerExecuteMsg, Payload,
    TransferMessage,
};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, QuerierWrapper, Reply,
    Response, StdError, StdResult, Storage, SubMsg, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use crate::error::ContractError;
use crate::factory;
use crate::guard;
use crate::registry::{self, AssetKind};
use crate::state::{
    Config, OutboundTransfer, PendingCustody, CONFIG, CUSTODY, MAX_MEMO_LENGTH, OUTGOING_NONCE,
    PEERS, PENDING_CUSTODY, STATS,
};

/// Reply id of the custody `TransferFrom` submessage
pub const REPLY_CUSTODY_PULL: u64 = 1;

// ============================================================================
// SendNative
// ============================================================================

/// Send the attached native value to `to` on `dest_domain_id`.
#[allow(clippy::too_many_arguments)]
pub fn execute_send_native(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    dest_domain_id: u64,
    to: String,
    gas_limit: u64,
    refund_address: Option<String>,
    memo: Option<String>,
) -> Result<Response, ContractError> {
    guard::acquire(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    let destination = validate_route(deps.as_ref(), &config, dest_domain_id, &to, memo.as_deref())?;
    let value = native_value(&info, &config.native_denom)?;
    let refund_address = refund_or_sender(refund_address, &info.sender)?;

    let message = TransferMessage {
        nonce: next_nonce(deps.storage)?,
        origin_domain_id: config.domain_id,
        dest_domain_id,
        destination,
        origin_caller: info.sender.to_string(),
        payload: Payload::Value { to: to.clone() },
        value,
        gas_limit,
        refund_address,
        memo,
    };
    let hash = message.correlation_hash()?;
    let nonce = message.nonce;

    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.values_sent += 1;
        Ok(stats)
    })?;

    let send = WasmMsg::Execute {
        contract_addr: config.message_layer.to_string(),
        msg: to_json_binary(&MessageLayerExecuteMsg::Send { message })?,
        funds: info.funds,
    };

    guard::release(deps.storage);

    Ok(Response::new()
        .add_message(send)
        .set_data(Binary::from(hash.to_vec()))
        .add_attribute("action", "value_sent")
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("sender", info.sender)
        .add_attribute("dest_domain_id", dest_domain_id.to_string())
        .add_attribute("to", to)
        .add_attribute("value", value.to_string())
        .add_attribute("correlation_hash", bytes32_to_hex(&hash)))
}

// ============================================================================
// SendAsset
// ============================================================================

/// Send `amount` of `asset` to `to` on `dest_domain_id`.
#[allow(clippy::too_many_arguments)]
pub fn execute_send_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    dest_domain_id: u64,
    to: String,
    asset: String,
    amount: Uint128,
    gas_limit: u64,
    refund_address: Option<String>,
    memo: Option<String>,
) -> Result<Response, ContractError> {
    guard::acquire(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    let destination = validate_route(deps.as_ref(), &config, dest_domain_id, &to, memo.as_deref())?;
    if is_zero_identity(&asset) {
        return Err(ContractError::InvalidAsset {
            reason: "asset address is empty".to_string(),
        });
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    let asset = deps.api.addr_validate(&asset)?;
    let refund_address = refund_or_sender(refund_address, &info.sender)?;

    let kind = registry::classify(deps.storage, &asset)?;
    let descriptor = match kind {
        AssetKind::Representation => registry::canonical_of(deps.storage, &asset)?.ok_or_else(
            || ContractError::RegistryCorrupted {
                reason: format!("representation {} has no canonical descriptor", asset),
            },
        )?,
        AssetKind::NonCustodialCanonical | AssetKind::Canonical => {
            live_descriptor(&deps.querier, &config, &asset)?
        }
    };

    let transfer = OutboundTransfer {
        sender: info.sender.clone(),
        asset: asset.clone(),
        descriptor,
        dest_domain_id,
        destination,
        to,
        gas_limit,
        refund_address,
        memo,
        fee: info.funds,
    };

    match kind {
        AssetKind::Representation | AssetKind::NonCustodialCanonical => {
            let burn = WasmMsg::Execute {
                contract_addr: asset.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::BurnFrom {
                    owner: info.sender.to_string(),
                    amount,
                })?,
                funds: vec![],
            };
            let response = Response::new()
                .add_message(burn)
                .add_attribute("custody", custody_label(&kind));
            let response = dispatch_asset(deps.storage, &config, transfer, amount, response)?;
            guard::release(deps.storage);
            Ok(response)
        }
        AssetKind::Canonical => {
            let balance_before = query_balance(&deps.querier, &asset, &env.contract.address)?;
            PENDING_CUSTODY.save(
                deps.storage,
                &PendingCustody {
                    transfer,
                    balance_before,
                },
            )?;

            let pull = WasmMsg::Execute {
                contract_addr: asset.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: info.sender.to_string(),
                    recipient: env.contract.address.to_string(),
                    amount,
                })?,
                funds: vec![],
            };

            // Lock stays held until the reply settles the transfer.
            Ok(Response::new()
                .add_submessage(SubMsg::reply_on_success(pull, REPLY_CUSTODY_PULL))
                .add_attribute("action", "custody_pull")
                .add_attribute("asset", asset)
                .add_attribute("nominal_amount", amount.to_string()))
        }
    }
}

/// Settle a canonical send once the `TransferFrom` has executed.
pub fn reply_custody_pull(deps: DepsMut, env: Env, _reply: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_CUSTODY
        .may_load(deps.storage)?
        .ok_or(ContractError::MissingPendingOperation)?;
    PENDING_CUSTODY.remove(deps.storage);
    let config = CONFIG.load(deps.storage)?;

    let asset = pending.transfer.asset.clone();
    let balance_after = query_balance(&deps.querier, &asset, &env.contract.address)?;
    let received = balance_after
        .checked_sub(pending.balance_before)
        .map_err(StdError::from)?;
    if received.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "no tokens were received into custody".to_string(),
        });
    }

    CUSTODY.update(deps.storage, &asset, |held| -> StdResult<_> {
        Ok(held.unwrap_or_default().checked_add(received)?)
    })?;

    let response = Response::new().add_attribute("custody", custody_label(&AssetKind::Canonical));
    let response = dispatch_asset(deps.storage, &config, pending.transfer, received, response)?;
    guard::release(deps.storage);

    Ok(response)
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Append the release message for the peer vault and the `asset_sent`
/// attributes to `response`.
fn dispatch_asset(
    storage: &mut dyn Storage,
    config: &Config,
    transfer: OutboundTransfer,
    quantity: Uint128,
    response: Response,
) -> Result<Response, ContractError> {
    let OutboundTransfer {
        sender,
        asset,
        descriptor,
        dest_domain_id,
        destination,
        to,
        gas_limit,
        refund_address,
        memo,
        fee,
    } = transfer;

    let message = TransferMessage {
        nonce: next_nonce(storage)?,
        origin_domain_id: config.domain_id,
        dest_domain_id,
        destination,
        origin_caller: sender.to_string(),
        payload: Payload::ReleaseAsset {
            descriptor: descriptor.clone(),
            to: to.clone(),
            amount: quantity,
        },
        value: Uint128::zero(),
        gas_limit,
        refund_address,
        memo,
    };
    let hash = message.correlation_hash()?;
    let nonce = message.nonce;

    STATS.update(storage, |mut stats| -> StdResult<_> {
        stats.assets_sent += 1;
        Ok(stats)
    })?;

    let send = WasmMsg::Execute {
        contract_addr: config.message_layer.to_string(),
        msg: to_json_binary(&MessageLayerExecuteMsg::Send { message })?,
        funds: fee,
    };

    Ok(response
        .add_message(send)
        .set_data(Binary::from(hash.to_vec()))
        .add_attribute("action", "asset_sent")
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("sender", sender)
        .add_attribute("dest_domain_id", dest_domain_id.to_string())
        .add_attribute("to", to)
        .add_attribute("asset", asset)
        .add_attribute("canonical_domain_id", descriptor.domain_id.to_string())
        .add_attribute("canonical_address", descriptor.address)
        .add_attribute("amount", quantity.to_string())
        .add_attribute("correlation_hash", bytes32_to_hex(&hash)))
}

/// Checks shared by both send paths. Returns the counterpart vault of the
/// destination domain.
fn validate_route(
    deps: Deps,
    config: &Config,
    dest_domain_id: u64,
    to: &str,
    memo: Option<&str>,
) -> Result<String, ContractError> {
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    if dest_domain_id == config.domain_id {
        return Err(ContractError::InvalidDomain {
            reason: "destination is this domain".to_string(),
        });
    }
    let peer = PEERS
        .may_load(deps.storage, dest_domain_id)?
        .ok_or(ContractError::UnknownDomain {
            domain_id: dest_domain_id,
        })?;

    if is_zero_identity(to) {
        return Err(ContractError::InvalidRecipient {
            reason: "recipient is the zero identity".to_string(),
        });
    }
    if to.trim().eq_ignore_ascii_case(&peer) {
        return Err(ContractError::InvalidRecipient {
            reason: "recipient is the destination vault".to_string(),
        });
    }

    if let Some(memo) = memo {
        if memo.len() > MAX_MEMO_LENGTH {
            return Err(ContractError::MemoTooLong {
                len: memo.len(),
                max: MAX_MEMO_LENGTH,
            });
        }
    }

    Ok(peer)
}

/// The attached value: exactly one non-zero coin of the native denom.
fn native_value(info: &MessageInfo, native_denom: &str) -> Result<Uint128, ContractError> {
    match info.funds.as_slice() {
        [] => Err(ContractError::InvalidAmount {
            reason: "Value must be greater than zero".to_string(),
        }),
        [coin] if coin.denom == native_denom => {
            if coin.amount.is_zero() {
                return Err(ContractError::InvalidAmount {
                    reason: "Value must be greater than zero".to_string(),
                });
            }
            Ok(coin.amount)
        }
        _ => Err(ContractError::InvalidFunds {
            reason: format!("only {} may be attached", native_denom),
        }),
    }
}

fn refund_or_sender(refund_address: Option<String>, sender: &Addr) -> Result<String, ContractError> {
    match refund_address {
        Some(refund) if is_zero_identity(&refund) => Err(ContractError::InvalidRecipient {
            reason: "refund address is the zero identity".to_string(),
        }),
        Some(refund) => Ok(refund),
        None => Ok(sender.to_string()),
    }
}

fn next_nonce(storage: &mut dyn Storage) -> StdResult<u64> {
    let nonce = OUTGOING_NONCE.may_load(storage)?.unwrap_or_default();
    OUTGOING_NONCE.save(storage, &(nonce + 1))?;
    Ok(nonce)
}

fn live_descriptor(
    querier: &QuerierWrapper,
    config: &Config,
    asset: &Addr,
) -> Result<CanonicalAssetDescriptor, ContractError> {
    let info: TokenInfoResponse =
        querier.query_wasm_smart(asset.to_string(), &Cw20QueryMsg::TokenInfo {})?;
    let descriptor = CanonicalAssetDescriptor {
        domain_id: config.domain_id,
        address: asset.to_string(),
        decimals: info.decimals,
        symbol: info.symbol,
        name: info.name,
    };
    // No peer could deploy a representation for it
    factory::check_decimals(&descriptor)?;
    Ok(descriptor)
}

pub(crate) fn query_balance(
    querier: &QuerierWrapper,
    asset: &Addr,
    account: &Addr,
) -> StdResult<Uint128> {
    let res: BalanceResponse = querier.query_wasm_smart(
        asset.to_string(),
        &Cw20QueryMsg::Balance {
            address: account.to_string(),
        },
    )?;
    Ok(res.balance)
}

fn custody_label(kind: &AssetKind) -> &'static str {
    match kind {
        AssetKind::Canonical => "lock",
        AssetKind::NonCustodialCanonical => "burn_non_custodial",
        AssetKind::Representation => "burn",
    }
}
