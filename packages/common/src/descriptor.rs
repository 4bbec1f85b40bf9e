//! Canonical asset identity.

use cosmwasm_schema::cw_serde;

/// Identity and metadata snapshot of a fungible asset on its home domain.
///
/// Two descriptors name the same asset iff `(domain_id, address)` match. The
/// metadata fields are captured at send time and are not part of the identity.
#[cw_serde]
pub struct CanonicalAssetDescriptor {
    /// Home domain of the asset
    pub domain_id: u64,
    /// Asset address on the home domain (opaque string, domain specific encoding)
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl CanonicalAssetDescriptor {
    /// Registry key of this asset.
    pub fn identity(&self) -> (u64, &str) {
        (self.domain_id, self.address.as_str())
    }

    /// Whether both descriptors refer to the same canonical asset.
    pub fn same_asset(&self, other: &CanonicalAssetDescriptor) -> bool {
        self.identity() == other.identity()
    }
}

/// Returns true for identities that cannot receive anything: empty strings and
/// hex encodings made only of zeros (`0x`, `0x0000...`).
pub fn is_zero_identity(identity: &str) -> bool {
    let trimmed = identity.trim();
    if trimmed.is_empty() {
        return true;
    }
    match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => digits.chars().all(|c| c == '0'),
        None => false,
    }
}
