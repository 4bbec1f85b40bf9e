//! Token identity registry.
//!
//! Bidirectional mapping between canonical asset identities `(domain_id,
//! address)` and the representation contracts deployed by this vault. The maps
//! are private and insert-only: [`register`] is the single write path and is
//! only called by the factory when a deployment completes. There is no update
//! or delete, so a canonical asset can never be re-pointed.

use common::CanonicalAssetDescriptor;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::error::ContractError;
use crate::state::NON_CUSTODIAL_ASSET;

/// Key: representation address, Value: always true
const IS_REPRESENTATION: Map<&Addr, bool> = Map::new("is_representation");

/// Key: representation address, Value: canonical descriptor
const REPRESENTATION_TO_CANONICAL: Map<&Addr, CanonicalAssetDescriptor> =
    Map::new("representation_to_canonical");

/// Key: (canonical domain id, canonical address), Value: representation address
const CANONICAL_TO_REPRESENTATION: Map<(u64, &str), Addr> =
    Map::new("canonical_to_representation");

/// Custody behaviour of a local asset, resolved once per operation.
#[cw_serde]
pub enum AssetKind {
    /// Home-domain asset held in vault custody while bridged out
    Canonical,
    /// Home-domain asset burned on send and minted on receive
    NonCustodialCanonical,
    /// Asset deployed by this vault for a canonical asset of another domain
    Representation,
}

pub fn classify(storage: &dyn Storage, asset: &Addr) -> StdResult<AssetKind> {
    if is_representation(storage, asset)? {
        return Ok(AssetKind::Representation);
    }
    match NON_CUSTODIAL_ASSET.may_load(storage)? {
        Some(non_custodial) if non_custodial == *asset => Ok(AssetKind::NonCustodialCanonical),
        _ => Ok(AssetKind::Canonical),
    }
}

pub fn is_representation(storage: &dyn Storage, asset: &Addr) -> StdResult<bool> {
    Ok(IS_REPRESENTATION.may_load(storage, asset)?.unwrap_or(false))
}

pub fn canonical_of(
    storage: &dyn Storage,
    representation: &Addr,
) -> StdResult<Option<CanonicalAssetDescriptor>> {
    REPRESENTATION_TO_CANONICAL.may_load(storage, representation)
}

pub fn representation_of(
    storage: &dyn Storage,
    domain_id: u64,
    address: &str,
) -> StdResult<Option<Addr>> {
    CANONICAL_TO_REPRESENTATION.may_load(storage, (domain_id, address))
}

/// Page through registered representations in address order.
pub fn representations(
    storage: &dyn Storage,
    start_after: Option<&Addr>,
    limit: usize,
) -> StdResult<Vec<(Addr, CanonicalAssetDescriptor)>> {
    let start = start_after.map(Bound::exclusive);
    REPRESENTATION_TO_CANONICAL
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}

/// Record a new representation in all three mappings.
///
/// Fails without writing if the address or the canonical identity is already
/// mapped.
pub(crate) fn register(
    storage: &mut dyn Storage,
    descriptor: &CanonicalAssetDescriptor,
    representation: &Addr,
) -> Result<(), ContractError> {
    if IS_REPRESENTATION.has(storage, representation)
        || REPRESENTATION_TO_CANONICAL.has(storage, representation)
    {
        return Err(ContractError::RegistryConflict {
            reason: format!("{} is already a representation", representation),
        });
    }
    if let Some(existing) = representation_of(storage, descriptor.domain_id, &descriptor.address)? {
        return Err(ContractError::RegistryConflict {
            reason: format!(
                "canonical asset {}:{} already maps to {}",
                descriptor.domain_id, descriptor.address, existing
            ),
        });
    }

    IS_REPRESENTATION.save(storage, representation, &true)?;
    REPRESENTATION_TO_CANONICAL.save(storage, representation, descriptor)?;
    CANONICAL_TO_REPRESENTATION.save(storage, descriptor.identity(), representation)?;
    Ok(())
}
