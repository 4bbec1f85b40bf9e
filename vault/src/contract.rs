//! Asset Bridge Vault - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers and their replies
//! - `query` - Query message handlers
//! - `registry` / `factory` - Token identity registry and representation factory

use common::is_zero_identity;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_pause, execute_receive_asset, execute_receive_native, execute_remove_peer,
    execute_send_asset, execute_send_native, execute_set_message_layer,
    execute_set_non_custodial_asset, execute_set_peer, execute_transfer_admin, execute_unpause,
    reply_custody_pull, reply_deploy_representation, REPLY_CUSTODY_PULL,
};
use crate::factory::REPLY_DEPLOY_REPRESENTATION;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_canonical_of, query_classify, query_config, query_correlation_hash,
    query_current_nonce, query_custody_balance, query_peer, query_peers,
    query_representation_of, query_representations, query_stats,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, OUTGOING_NONCE, PEERS, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let message_layer = deps.api.addr_validate(&msg.message_layer)?;

    if msg.domain_id == 0 {
        return Err(ContractError::InvalidDomain {
            reason: "domain id 0 is reserved".to_string(),
        });
    }
    if msg.native_denom.trim().is_empty() {
        return Err(ContractError::InvalidFunds {
            reason: "native denom must not be empty".to_string(),
        });
    }

    let config = Config {
        admin,
        message_layer,
        domain_id: msg.domain_id,
        native_denom: msg.native_denom,
        representation_code_id: msg.representation_code_id,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    for peer in &msg.peers {
        if peer.domain_id == 0 || peer.domain_id == config.domain_id {
            return Err(ContractError::InvalidDomain {
                reason: format!("cannot register a peer for domain {}", peer.domain_id),
            });
        }
        if is_zero_identity(&peer.address) {
            return Err(ContractError::InvalidRecipient {
                reason: "peer address is the zero identity".to_string(),
            });
        }
        PEERS.save(deps.storage, peer.domain_id, &peer.address.trim().to_string())?;
    }

    STATS.save(deps.storage, &Stats::default())?;
    OUTGOING_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("message_layer", config.message_layer)
        .add_attribute("domain_id", config.domain_id.to_string())
        .add_attribute("peer_count", msg.peers.len().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound transfers
        ExecuteMsg::SendNative {
            dest_domain_id,
            to,
            gas_limit,
            refund_address,
            memo,
        } => execute_send_native(
            deps,
            env,
            info,
            dest_domain_id,
            to,
            gas_limit,
            refund_address,
            memo,
        ),
        ExecuteMsg::SendAsset {
            dest_domain_id,
            to,
            asset,
            amount,
            gas_limit,
            refund_address,
            memo,
        } => execute_send_asset(
            deps,
            env,
            info,
            dest_domain_id,
            to,
            asset,
            amount,
            gas_limit,
            refund_address,
            memo,
        ),

        // Inbound delivery
        ExecuteMsg::ReceiveNative {
            context,
            origin_caller,
            to,
            value,
        } => execute_receive_native(deps, info, context, origin_caller, to, value),
        ExecuteMsg::ReceiveAsset {
            context,
            descriptor,
            origin_caller,
            to,
            amount,
        } => execute_receive_asset(
            deps,
            env,
            info,
            context,
            descriptor,
            origin_caller,
            to,
            amount,
        ),

        // Administration
        ExecuteMsg::SetPeer { domain_id, address } => {
            execute_set_peer(deps, info, domain_id, address)
        }
        ExecuteMsg::RemovePeer { domain_id } => execute_remove_peer(deps, info, domain_id),
        ExecuteMsg::SetMessageLayer { message_layer } => {
            execute_set_message_layer(deps, info, message_layer)
        }
        ExecuteMsg::SetNonCustodialAsset { asset } => {
            execute_set_non_custodial_asset(deps, env, info, asset)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::TransferAdmin { new_admin } => execute_transfer_admin(deps, info, new_admin),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        REPLY_CUSTODY_PULL => reply_custody_pull(deps, env, msg),
        REPLY_DEPLOY_REPRESENTATION => reply_deploy_representation(deps, env, msg),
        id => Err(ContractError::UnknownReply { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::Peer { domain_id } => to_json_binary(&query_peer(deps, domain_id)?),
        QueryMsg::Peers { start_after, limit } => {
            to_json_binary(&query_peers(deps, start_after, limit)?)
        }

        // Token identity registry
        QueryMsg::Classify { asset } => to_json_binary(&query_classify(deps, asset)?),
        QueryMsg::CanonicalOf { representation } => {
            to_json_binary(&query_canonical_of(deps, representation)?)
        }
        QueryMsg::RepresentationOf { domain_id, address } => {
            to_json_binary(&query_representation_of(deps, domain_id, address)?)
        }
        QueryMsg::Representations { start_after, limit } => {
            to_json_binary(&query_representations(deps, start_after, limit)?)
        }

        QueryMsg::CustodyBalance { asset } => {
            to_json_binary(&query_custody_balance(deps, asset)?)
        }
        QueryMsg::CurrentNonce {} => to_json_binary(&query_current_nonce(deps)?),
        QueryMsg::CorrelationHash { message } => {
            to_json_binary(&query_correlation_hash(message)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
