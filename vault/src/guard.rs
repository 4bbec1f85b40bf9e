//! Reentrancy guard for state-mutating entry points.
//!
//! The lock is a storage flag. Handlers that complete synchronously release it
//! before returning; handlers that continue in a reply (custody pull,
//! representation deployment) keep it held until the reply finishes. A failed
//! transaction reverts the flag together with every other write.

use cosmwasm_std::Storage;
use cw_storage_plus::Item;

use crate::error::ContractError;

const ENTERED: Item<bool> = Item::new("reentrancy_lock");

/// Take the lock, failing if an entry point is already active.
pub fn acquire(storage: &mut dyn Storage) -> Result<(), ContractError> {
    if ENTERED.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::Reentrancy);
    }
    ENTERED.save(storage, &true)?;
    Ok(())
}

pub fn release(storage: &mut dyn Storage) {
    ENTERED.remove(storage);
}

#[cfg(test)]
fn is_held(storage: &dyn Storage) -> cosmwasm_std::StdResult<bool> {
    Ok(ENTERED.may_load(storage)?.unwrap_or(false))
}
