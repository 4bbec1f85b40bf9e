//! Shared multi-test harness: two vaults (domains 1 and 2) wired to one
//! in-process message layer, plus the token contracts the flows need.

#![allow(dead_code)]

use common::{MessageContext, TransferMessage};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, instantiate2_address, to_json_binary, Addr, Api, Binary, Deps, DepsMut, Empty, Env,
    MessageInfo, Response, StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{
    App, AppBuilder, AppResponse, BankKeeper, Contract, ContractWrapper, Executor, MockAddressGenerator, MockApiBech32,
    WasmKeeper,
};
use cw_storage_plus::Item;

use vault::hash::representation_salt;
use vault::msg::{
    CustodyBalanceResponse, ExecuteMsg, InstantiateMsg, PeerInput, QueryMsg,
    RepresentationOfResponse,
};

pub const DENOM: &str = "uluna";
pub const DOMAIN_ONE: u64 = 1;
pub const DOMAIN_TWO: u64 = 2;
pub const GAS_LIMIT: u64 = 200_000;

/// Bech32 addresses give the 32-byte canonical form instantiate2 needs.
pub type BridgeApp = App<BankKeeper, MockApiBech32>;

// ============================================================================
// Mock Message Layer
// ============================================================================

#[cw_serde]
pub struct OutboxEntry {
    /// Contract that called `Send`
    pub sender: String,
    pub message: TransferMessage,
}

#[cw_serde]
pub enum LayerExecuteMsg {
    Send { message: TransferMessage },
    /// Deliver outbox entry `index` to its destination vault
    Deliver { index: u32 },
}

#[cw_serde]
pub enum LayerQueryMsg {
    Outbox {},
}

const OUTBOX: Item<Vec<OutboxEntry>> = Item::new("outbox");

fn layer_instantiate(deps: DepsMut, _env: Env, _info: MessageInfo, _msg: Empty) -> StdResult<Response> {
    OUTBOX.save(deps.storage, &vec![])?;
    Ok(Response::new())
}

fn layer_execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: LayerExecuteMsg,
) -> StdResult<Response> {
    match msg {
        LayerExecuteMsg::Send { message } => {
            let mut outbox = OUTBOX.load(deps.storage)?;
            outbox.push(OutboxEntry {
                sender: info.sender.to_string(),
                message,
            });
            OUTBOX.save(deps.storage, &outbox)?;
            Ok(Response::new().add_attribute("action", "layer_send"))
        }
        LayerExecuteMsg::Deliver { index } => {
            let outbox = OUTBOX.load(deps.storage)?;
            let entry = outbox
                .get(index as usize)
                .ok_or_else(|| StdError::not_found("outbox entry"))?;
            let context = MessageContext {
                origin_domain_id: entry.message.origin_domain_id,
                origin_sender: entry.sender.clone(),
            };
            let funds = if entry.message.value.is_zero() {
                vec![]
            } else {
                coins(entry.message.value.u128(), DENOM)
            };
            Ok(Response::new().add_message(WasmMsg::Execute {
                contract_addr: entry.message.destination.clone(),
                msg: to_json_binary(&entry.message.delivery(context))?,
                funds,
            }))
        }
    }
}

fn layer_query(deps: Deps, _env: Env, msg: LayerQueryMsg) -> StdResult<Binary> {
    match msg {
        LayerQueryMsg::Outbox {} => to_json_binary(&OUTBOX.load(deps.storage)?),
    }
}

// ============================================================================
// Token Contracts
// ============================================================================

/// cw20-base token that burns 1% of every `TransferFrom`.
fn fee_token_execute(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: Cw20ExecuteMsg,
) -> Result<Response, cw20_base::ContractError> {
    match msg {
        Cw20ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => {
            let fee = amount.multiply_ratio(1u128, 100u128);
            cw20_base::allowances::execute_burn_from(
                deps.branch(),
                env.clone(),
                info.clone(),
                owner.clone(),
                fee,
            )?;
            cw20_base::allowances::execute_transfer_from(
                deps,
                env,
                info,
                owner,
                recipient,
                amount - fee,
            )
        }
        other => cw20_base::contract::execute(deps, env, info, other),
    }
}

/// cw20-base token whose `TransferFrom` calls back into the recipient vault.
fn reentrant_token_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: Cw20ExecuteMsg,
) -> Result<Response, cw20_base::ContractError> {
    match msg {
        Cw20ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => {
            let token = env.contract.address.to_string();
            let response = cw20_base::allowances::execute_transfer_from(
                deps,
                env,
                info,
                owner.clone(),
                recipient.clone(),
                amount,
            )?;
            Ok(response.add_message(WasmMsg::Execute {
                contract_addr: recipient,
                msg: to_json_binary(&ExecuteMsg::SendAsset {
                    dest_domain_id: DOMAIN_TWO,
                    to: owner,
                    asset: token,
                    amount,
                    gas_limit: GAS_LIMIT,
                    refund_address: None,
                    memo: None,
                })?,
                funds: vec![],
            }))
        }
        other => cw20_base::contract::execute(deps, env, info, other),
    }
}

/// cw20-base token reporting 24 decimals, more than a representation supports.
fn wide_token_query(deps: Deps, env: Env, msg: cw20_base::msg::QueryMsg) -> StdResult<Binary> {
    match msg {
        cw20_base::msg::QueryMsg::TokenInfo {} => {
            let mut info = cw20_base::contract::query_token_info(deps)?;
            info.decimals = 24;
            to_json_binary(&info)
        }
        other => cw20_base::contract::query(deps, env, other),
    }
}

fn contract_vault() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            vault::contract::execute,
            vault::contract::instantiate,
            vault::contract::query,
        )
        .with_reply(vault::contract::reply),
    )
}

fn contract_layer() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(layer_execute, layer_instantiate, layer_query))
}

fn contract_cw20() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

fn contract_fee_token() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        fee_token_execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

fn contract_wide_token() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        wide_token_query,
    ))
}

fn contract_reentrant_token() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        reentrant_token_execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

// ============================================================================
// Test Environment
// ============================================================================

pub struct TestEnv {
    pub app: BridgeApp,
    pub admin: Addr,
    pub user: Addr,
    pub recipient: Addr,
    pub layer: Addr,
    pub vault_one: Addr,
    pub vault_two: Addr,
    /// Canonical token of domain 1, held by `user`
    pub token_a: Addr,
    /// Code id vaults instantiate representations from
    pub cw20_code_id: u64,
    fee_token_code_id: u64,
    reentrant_token_code_id: u64,
    wide_token_code_id: u64,
}

pub fn setup() -> TestEnv {
    let api = MockApiBech32::new("terra");
    let admin = api.addr_make("admin");
    let user = api.addr_make("user");
    let recipient = api.addr_make("recipient");

    let mut app = AppBuilder::new()
        .with_api(api)
        .with_wasm(WasmKeeper::default().with_address_generator(MockAddressGenerator))
        .build(|router, _, storage| {
            router
                .bank
                .init_balance(storage, &user, coins(10_000_000_000, DENOM))
                .unwrap();
        });

    let vault_code_id = app.store_code(contract_vault());
    let layer_code_id = app.store_code(contract_layer());
    let cw20_code_id = app.store_code(contract_cw20());
    let fee_token_code_id = app.store_code(contract_fee_token());
    let reentrant_token_code_id = app.store_code(contract_reentrant_token());
    let wide_token_code_id = app.store_code(contract_wide_token());

    let layer = app
        .instantiate_contract(layer_code_id, admin.clone(), &Empty {}, &[], "layer", None)
        .unwrap();

    let instantiate_vault = |app: &mut BridgeApp, domain_id: u64| {
        app.instantiate_contract(
            vault_code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                message_layer: layer.to_string(),
                domain_id,
                native_denom: DENOM.to_string(),
                representation_code_id: cw20_code_id,
                peers: vec![],
            },
            &[],
            format!("vault-{}", domain_id),
            Some(admin.to_string()),
        )
        .unwrap()
    };
    let vault_one = instantiate_vault(&mut app, DOMAIN_ONE);
    let vault_two = instantiate_vault(&mut app, DOMAIN_TWO);

    for (vault, domain_id, peer) in [
        (&vault_one, DOMAIN_TWO, &vault_two),
        (&vault_two, DOMAIN_ONE, &vault_one),
    ] {
        app.execute_contract(
            admin.clone(),
            vault.clone(),
            &ExecuteMsg::SetPeer {
                domain_id,
                address: peer.to_string(),
            },
            &[],
        )
        .unwrap();
    }

    let mut env = TestEnv {
        app,
        admin,
        user,
        recipient,
        layer,
        vault_one,
        vault_two,
        token_a: Addr::unchecked(""),
        cw20_code_id,
        fee_token_code_id,
        reentrant_token_code_id,
        wide_token_code_id,
    };
    env.token_a = env.create_token("Token A", "TKA", 1_000_000, None);
    env
}

impl TestEnv {
    fn instantiate_token(
        &mut self,
        code_id: u64,
        name: &str,
        symbol: &str,
        supply: u128,
        minter: Option<&Addr>,
    ) -> Addr {
        self.app
            .instantiate_contract(
                code_id,
                self.admin.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    decimals: 6,
                    initial_balances: vec![Cw20Coin {
                        address: self.user.to_string(),
                        amount: Uint128::new(supply),
                    }],
                    mint: minter.map(|m| MinterResponse {
                        minter: m.to_string(),
                        cap: None,
                    }),
                    marketing: None,
                },
                &[],
                symbol.to_lowercase(),
                None,
            )
            .unwrap()
    }

    /// Plain cw20-base token with the whole supply held by `user`.
    pub fn create_token(
        &mut self,
        name: &str,
        symbol: &str,
        supply: u128,
        minter: Option<&Addr>,
    ) -> Addr {
        self.instantiate_token(self.cw20_code_id, name, symbol, supply, minter)
    }

    pub fn create_fee_token(&mut self, supply: u128) -> Addr {
        self.instantiate_token(self.fee_token_code_id, "Fee Token", "FEE", supply, None)
    }

    pub fn create_reentrant_token(&mut self, supply: u128) -> Addr {
        self.instantiate_token(self.reentrant_token_code_id, "Hook Token", "HOOK", supply, None)
    }

    pub fn create_wide_token(&mut self, supply: u128) -> Addr {
        self.instantiate_token(self.wide_token_code_id, "Wide Token", "WIDE", supply, None)
    }

    /// Fresh address that owns nothing.
    pub fn addr(&self, name: &str) -> Addr {
        self.app.api().addr_make(name)
    }

    /// Address the representation of `canonical` gets on `vault`.
    pub fn predicted_representation(&self, vault: &Addr, domain_id: u64, canonical: &Addr) -> Addr {
        let checksum = self
            .app
            .wrap()
            .query_wasm_code_info(self.cw20_code_id)
            .unwrap()
            .checksum;
        let creator = self.app.api().addr_canonicalize(vault.as_str()).unwrap();
        let salt = representation_salt(domain_id, canonical.as_str());
        let canonical_addr = instantiate2_address(checksum.as_slice(), &creator, &salt).unwrap();
        self.app.api().addr_humanize(&canonical_addr).unwrap()
    }

    pub fn approve(&mut self, owner: &Addr, token: &Addr, spender: &Addr, amount: u128) {
        self.app
            .execute_contract(
                owner.clone(),
                token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: spender.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    /// Approve `vault` and send `amount` of `token` to `to` on `dest_domain_id`.
    pub fn send_asset(
        &mut self,
        sender: &Addr,
        vault: &Addr,
        token: &Addr,
        dest_domain_id: u64,
        to: &Addr,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        self.approve(sender, token, vault, amount);
        self.app.execute_contract(
            sender.clone(),
            vault.clone(),
            &ExecuteMsg::SendAsset {
                dest_domain_id,
                to: to.to_string(),
                asset: token.to_string(),
                amount: Uint128::new(amount),
                gas_limit: GAS_LIMIT,
                refund_address: None,
                memo: None,
            },
            &[],
        )
    }

    pub fn outbox(&self) -> Vec<OutboxEntry> {
        self.app
            .wrap()
            .query_wasm_smart(&self.layer, &LayerQueryMsg::Outbox {})
            .unwrap()
    }

    /// Deliver the most recently sent message.
    pub fn relay_last(&mut self) -> anyhow::Result<AppResponse> {
        let index = self.outbox().len() as u32 - 1;
        self.relay(index)
    }

    pub fn relay(&mut self, index: u32) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.admin.clone(),
            self.layer.clone(),
            &LayerExecuteMsg::Deliver { index },
            &[],
        )
    }

    /// Call a vault's receive entry point as the message layer, bypassing the outbox.
    pub fn deliver_as_layer(&mut self, vault: &Addr, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(self.layer.clone(), vault.clone(), msg, &[])
    }

    pub fn balance(&self, token: &Addr, account: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn custody(&self, vault: &Addr, token: &Addr) -> u128 {
        let res: CustodyBalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                vault,
                &QueryMsg::CustodyBalance {
                    asset: token.to_string(),
                },
            )
            .unwrap();
        res.amount.u128()
    }

    pub fn representation_of(&self, vault: &Addr, domain_id: u64, canonical: &Addr) -> Option<Addr> {
        let res: RepresentationOfResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                vault,
                &QueryMsg::RepresentationOf {
                    domain_id,
                    address: canonical.to_string(),
                },
            )
            .unwrap();
        res.representation
    }

    pub fn native_balance(&self, account: &Addr) -> u128 {
        self.app
            .wrap()
            .query_balance(account, DENOM)
            .unwrap()
            .amount
            .u128()
    }
}

pub fn peer(domain_id: u64, address: &Addr) -> PeerInput {
    PeerInput {
        domain_id,
        address: address.to_string(),
    }
}

/// Root error message of a failed multi-test execution.
pub fn root_error(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}

pub fn count_events(res: &AppResponse, suffix: &str) -> usize {
    res.events.iter().filter(|e| e.ty.ends_with(suffix)).count()
}
