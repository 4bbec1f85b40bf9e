//! Transfer messages exchanged through the message layer.
//!
//! A vault hands a [`TransferMessage`] to the message layer with
//! [`MessageLayerExecuteMsg::Send`]. On the destination domain the message layer
//! turns it into a [`DeliveryMsg`] addressed to the peer vault, supplying the
//! authenticated [`MessageContext`] explicitly.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_vec, StdResult, Uint128};

use crate::descriptor::CanonicalAssetDescriptor;
use crate::hash::keccak256;

/// Origin of a delivered message, as authenticated by the message layer.
#[cw_serde]
pub struct MessageContext {
    pub origin_domain_id: u64,
    /// Address of the contract that called `Send` on the origin domain
    pub origin_sender: String,
}

/// What the destination vault is instructed to do.
#[cw_serde]
pub enum Payload {
    /// Plain native value for `to`
    Value { to: String },
    /// Release `amount` of the canonical asset `descriptor` to `to`
    ReleaseAsset {
        descriptor: CanonicalAssetDescriptor,
        to: String,
        amount: Uint128,
    },
}

#[cw_serde]
pub struct TransferMessage {
    /// Outgoing nonce of the sending vault
    pub nonce: u64,
    pub origin_domain_id: u64,
    pub dest_domain_id: u64,
    /// Counterpart vault on the destination domain
    pub destination: String,
    /// User that initiated the transfer
    pub origin_caller: String,
    pub payload: Payload,
    /// Native value carried with the message
    pub value: Uint128,
    /// Execution budget requested on the destination domain
    pub gas_limit: u64,
    /// Receives refunds of unused fees or undeliverable value
    pub refund_address: String,
    pub memo: Option<String>,
}

impl TransferMessage {
    /// Content hash used as correlation id: keccak256 over the JSON encoding.
    pub fn correlation_hash(&self) -> StdResult<[u8; 32]> {
        Ok(keccak256(&to_json_vec(self)?))
    }

    /// Builds the call the message layer makes on the destination vault.
    pub fn delivery(&self, context: MessageContext) -> DeliveryMsg {
        match &self.payload {
            Payload::Value { to } => DeliveryMsg::ReceiveNative {
                context,
                origin_caller: self.origin_caller.clone(),
                to: to.clone(),
                value: self.value,
            },
            Payload::ReleaseAsset {
                descriptor,
                to,
                amount,
            } => DeliveryMsg::ReceiveAsset {
                context,
                descriptor: descriptor.clone(),
                origin_caller: self.origin_caller.clone(),
                to: to.clone(),
                amount: *amount,
            },
        }
    }
}

/// Execute interface of the message layer consumed by the vault.
#[cw_serde]
pub enum MessageLayerExecuteMsg {
    Send { message: TransferMessage },
}

/// Receive entry points of the vault, as invoked by the message layer.
///
/// Serializes identically to the matching vault `ExecuteMsg` variants.
#[cw_serde]
pub enum DeliveryMsg {
    ReceiveNative {
        context: MessageContext,
        origin_caller: String,
        to: String,
        value: Uint128,
    },
    ReceiveAsset {
        context: MessageContext,
        descriptor: CanonicalAssetDescriptor,
        origin_caller: String,
        to: String,
        amount: Uint128,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_message(nonce: u64) -> TransferMessage {
        TransferMessage {
            nonce,
            origin_domain_id: 1,
            dest_domain_id: 2,
            destination: "vault_two".to_string(),
            origin_caller: "user".to_string(),
            payload: Payload::ReleaseAsset {
                descriptor: CanonicalAssetDescriptor {
                    domain_id: 1,
                    address: "token_a".to_string(),
                    decimals: 6,
                    symbol: "TKA".to_string(),
                    name: "Token A".to_string(),
                },
                to: "recipient".to_string(),
                amount: Uint128::new(1000),
            },
            value: Uint128::zero(),
            gas_limit: 200_000,
            refund_address: "user".to_string(),
            memo: None,
        }
    }

    #[test]
    fn test_correlation_hash_is_deterministic() {
        let a = asset_message(7).correlation_hash().unwrap();
        let b = asset_message(7).correlation_hash().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_correlation_hash_depends_on_nonce() {
        let a = asset_message(7).correlation_hash().unwrap();
        let b = asset_message(8).correlation_hash().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_delivery_of_asset_payload() {
        let context = MessageContext {
            origin_domain_id: 1,
            origin_sender: "vault_one".to_string(),
        };
        match asset_message(1).delivery(context.clone()) {
            DeliveryMsg::ReceiveAsset {
                context: delivered,
                descriptor,
                origin_caller,
                to,
                amount,
            } => {
                assert_eq!(delivered, context);
                assert_eq!(descriptor.address, "token_a");
                assert_eq!(origin_caller, "user");
                assert_eq!(to, "recipient");
                assert_eq!(amount, Uint128::new(1000));
            }
            other => panic!("unexpected delivery: {:?}", other),
        }
    }

    #[test]
    fn test_delivery_of_value_payload() {
        let mut message = asset_message(1);
        message.payload = Payload::Value {
            to: "recipient".to_string(),
        };
        message.value = Uint128::new(55);
        let context = MessageContext {
            origin_domain_id: 1,
            origin_sender: "vault_one".to_string(),
        };
        assert_eq!(
            message.delivery(context.clone()),
            DeliveryMsg::ReceiveNative {
                context,
                origin_caller: "user".to_string(),
                to: "recipient".to_string(),
                value: Uint128::new(55),
            }
        );
    }
}
