//! Query handlers for the asset bridge vault.

use common::TransferMessage;
use cosmwasm_std::{Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    CanonicalOfResponse, ClassifyResponse, ConfigResponse, CorrelationHashResponse,
    CustodyBalanceResponse, NonceResponse, PeerInput, PeerResponse, PeersResponse,
    RepresentationEntry, RepresentationOfResponse, RepresentationsResponse, StatsResponse,
};
use crate::registry;
use crate::state::{CONFIG, CUSTODY, NON_CUSTODIAL_ASSET, OUTGOING_NONCE, PEERS, STATS};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        message_layer: config.message_layer,
        domain_id: config.domain_id,
        native_denom: config.native_denom,
        representation_code_id: config.representation_code_id,
        paused: config.paused,
        non_custodial_asset: NON_CUSTODIAL_ASSET.may_load(deps.storage)?,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        assets_sent: stats.assets_sent,
        assets_received: stats.assets_received,
        values_sent: stats.values_sent,
        values_received: stats.values_received,
        representations_deployed: stats.representations_deployed,
    })
}

pub fn query_current_nonce(deps: Deps) -> StdResult<NonceResponse> {
    let nonce = OUTGOING_NONCE.may_load(deps.storage)?.unwrap_or_default();
    Ok(NonceResponse { nonce })
}

// ============================================================================
// Peer Queries
// ============================================================================

pub fn query_peer(deps: Deps, domain_id: u64) -> StdResult<PeerResponse> {
    Ok(PeerResponse {
        domain_id,
        address: PEERS.may_load(deps.storage, domain_id)?,
    })
}

/// Query paginated list of peers, ordered by domain id.
pub fn query_peers(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<PeersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let peers = PEERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (domain_id, address) = item?;
            Ok(PeerInput { domain_id, address })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(PeersResponse { peers })
}

// ============================================================================
// Registry Queries
// ============================================================================

pub fn query_classify(deps: Deps, asset: String) -> StdResult<ClassifyResponse> {
    let asset = deps.api.addr_validate(&asset)?;
    let kind = registry::classify(deps.storage, &asset)?;
    Ok(ClassifyResponse { asset, kind })
}

pub fn query_canonical_of(deps: Deps, representation: String) -> StdResult<CanonicalOfResponse> {
    let representation = deps.api.addr_validate(&representation)?;
    let descriptor = registry::canonical_of(deps.storage, &representation)?;
    Ok(CanonicalOfResponse {
        representation,
        descriptor,
    })
}

pub fn query_representation_of(
    deps: Deps,
    domain_id: u64,
    address: String,
) -> StdResult<RepresentationOfResponse> {
    let representation = registry::representation_of(deps.storage, domain_id, &address)?;
    Ok(RepresentationOfResponse {
        domain_id,
        address,
        representation,
    })
}

pub fn query_representations(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<RepresentationsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    let representations = registry::representations(deps.storage, start.as_ref(), limit)?
        .into_iter()
        .map(|(representation, descriptor)| RepresentationEntry {
            representation,
            descriptor,
        })
        .collect();

    Ok(RepresentationsResponse { representations })
}

// ============================================================================
// Custody & Hash Queries
// ============================================================================

pub fn query_custody_balance(deps: Deps, asset: String) -> StdResult<CustodyBalanceResponse> {
    let asset = deps.api.addr_validate(&asset)?;
    let amount = CUSTODY.may_load(deps.storage, &asset)?.unwrap_or_default();
    Ok(CustodyBalanceResponse { asset, amount })
}

pub fn query_correlation_hash(message: TransferMessage) -> StdResult<CorrelationHashResponse> {
    let hash = message.correlation_hash()?;
    Ok(CorrelationHashResponse {
        hash: Binary::from(hash.to_vec()),
    })
}
