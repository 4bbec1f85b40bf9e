//! Deterministic representation factory.
//!
//! A representation is a cw20-base compatible contract instantiated by the vault,
//! with the vault as sole minter. It is created the first time a canonical asset
//! of another domain is delivered here, and never again for that identity.
//!
//! Its address is fixed before deployment: `instantiate2` with the salt
//! `keccak(domain_id || address)` from [`crate::hash::representation_salt`].
//! Creation spans two steps within one transaction:
//! 1. [`get_or_create`] returns the registered address, or computes the
//!    instantiate2 address, refuses it if occupied and returns the
//!    instantiate2 submessage;
//! 2. [`complete_deployment`] runs in the reply, checks the reported address
//!    against the computed one and registers it. Any failure there aborts the
//!    whole transaction.

use common::CanonicalAssetDescriptor;
use cosmwasm_std::{
    instantiate2_address, to_json_binary, Addr, Binary, Deps, Env, Event, StdError, Storage,
    SubMsg, SubMsgResponse, WasmMsg,
};
use cw20::MinterResponse;

use crate::error::ContractError;
use crate::hash::{representation_label, representation_salt};
use crate::registry;
use crate::state::{Config, MAX_DECIMALS, PENDING_DEPLOYMENT};

/// Reply id of the representation instantiation submessage
pub const REPLY_DEPLOY_REPRESENTATION: u64 = 2;

/// cw20-base name length limit
const MAX_NAME_LENGTH: usize = 50;
/// cw20-base symbol length limits
const MIN_SYMBOL_LENGTH: usize = 3;
const MAX_SYMBOL_LENGTH: usize = 12;

#[derive(Debug)]
pub enum Resolution {
    /// Representation already registered
    Existing(Addr),
    /// Representation must be instantiated at `address`; completion happens in
    /// the reply
    Deploy { address: Addr, sub_msg: SubMsg },
}

/// Reject decimals a representation could never be created with.
pub fn check_decimals(descriptor: &CanonicalAssetDescriptor) -> Result<(), ContractError> {
    if descriptor.decimals > MAX_DECIMALS {
        return Err(ContractError::InvalidAsset {
            reason: format!(
                "{} decimals exceed the maximum of {}",
                descriptor.decimals, MAX_DECIMALS
            ),
        });
    }
    Ok(())
}

/// Address the representation of `descriptor` is instantiated at.
pub fn predicted_address(
    deps: Deps,
    env: &Env,
    code_id: u64,
    descriptor: &CanonicalAssetDescriptor,
) -> Result<Addr, ContractError> {
    let checksum = deps.querier.query_wasm_code_info(code_id)?.checksum;
    let creator = deps.api.addr_canonicalize(env.contract.address.as_str())?;
    let salt = representation_salt(descriptor.domain_id, &descriptor.address);
    let canonical = instantiate2_address(checksum.as_slice(), &creator, &salt)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(deps.api.addr_humanize(&canonical)?)
}

pub fn get_or_create(
    deps: Deps,
    env: &Env,
    config: &Config,
    descriptor: &CanonicalAssetDescriptor,
) -> Result<Resolution, ContractError> {
    if let Some(existing) =
        registry::representation_of(deps.storage, descriptor.domain_id, &descriptor.address)?
    {
        return Ok(Resolution::Existing(existing));
    }

    if PENDING_DEPLOYMENT.may_load(deps.storage)?.is_some() {
        return Err(ContractError::DeploymentInProgress);
    }
    check_decimals(descriptor)?;

    let address = predicted_address(deps, env, config.representation_code_id, descriptor)?;
    if registry::is_representation(deps.storage, &address)?
        || deps.querier.query_wasm_contract_info(&address).is_ok()
    {
        return Err(ContractError::AddressOccupied {
            address: address.to_string(),
        });
    }

    let init_msg = cw20_base::msg::InstantiateMsg {
        name: display_name(descriptor),
        symbol: display_symbol(&descriptor.symbol),
        decimals: descriptor.decimals,
        initial_balances: vec![],
        mint: Some(MinterResponse {
            minter: env.contract.address.to_string(),
            cap: None,
        }),
        marketing: None,
    };

    let instantiate = WasmMsg::Instantiate2 {
        admin: None,
        code_id: config.representation_code_id,
        label: representation_label(descriptor.domain_id, &descriptor.address),
        msg: to_json_binary(&init_msg)?,
        funds: vec![],
        salt: Binary::from(
            representation_salt(descriptor.domain_id, &descriptor.address).to_vec(),
        ),
    };

    Ok(Resolution::Deploy {
        address,
        sub_msg: SubMsg::reply_on_success(instantiate, REPLY_DEPLOY_REPRESENTATION),
    })
}

/// Register the freshly instantiated representation and build its creation event.
pub fn complete_deployment(
    storage: &mut dyn Storage,
    descriptor: &CanonicalAssetDescriptor,
    expected: &Addr,
    response: &SubMsgResponse,
) -> Result<(Addr, Event), ContractError> {
    let address = instantiated_address(response).ok_or_else(|| {
        StdError::generic_err("instantiate reply carries no contract address")
    })?;
    if address != expected.as_str() {
        return Err(ContractError::DeploymentAddressMismatch {
            expected: expected.to_string(),
            actual: address,
        });
    }
    let representation = expected.clone();

    registry::register(storage, descriptor, &representation)?;

    let event = Event::new("representation_deployed")
        .add_attribute("representation", representation.to_string())
        .add_attribute("canonical_domain_id", descriptor.domain_id.to_string())
        .add_attribute("canonical_address", descriptor.address.clone())
        .add_attribute("decimals", descriptor.decimals.to_string())
        .add_attribute("symbol", descriptor.symbol.clone())
        .add_attribute("name", descriptor.name.clone());

    Ok((representation, event))
}

fn instantiated_address(response: &SubMsgResponse) -> Option<String> {
    response
        .events
        .iter()
        .filter(|event| event.ty == "instantiate")
        .flat_map(|event| &event.attributes)
        .find(|attr| attr.key == "_contract_address")
        .map(|attr| attr.value.clone())
}

/// Canonical name with the origin domain appended, e.g. `Token A (1)`.
///
/// Keeps identically named assets from different domains apart.
pub fn display_name(descriptor: &CanonicalAssetDescriptor) -> String {
    let suffix = format!(" ({})", descriptor.domain_id);
    let budget = MAX_NAME_LENGTH.saturating_sub(suffix.len());
    let mut name = String::new();
    for c in descriptor.name.trim().chars() {
        if name.len() + c.len_utf8() > budget {
            break;
        }
        name.push(c);
    }
    if name.is_empty() {
        name.push_str("Bridged");
    }
    name + &suffix
}

/// Canonical symbol restricted to the cw20 alphabet (`[a-zA-Z-]{3,12}`).
pub fn display_symbol(symbol: &str) -> String {
    let filtered: String = symbol
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '-')
        .take(MAX_SYMBOL_LENGTH)
        .collect();
    format!("{:-<width$}", filtered, width = MIN_SYMBOL_LENGTH)
}
