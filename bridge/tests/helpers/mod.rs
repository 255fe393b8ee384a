//! Two-chain test harness.
//!
//! Both ledgers live in one `App`: each side gets its own bridge, asset
//! registry, wrapped registry and eligibility registry. Relayers are played by
//! the test, which reads the outbox of one bridge and attests on the other.

#![allow(dead_code)]

use cosmwasm_std::{to_json_binary, Addr, Binary, Empty};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use bridge::msg::{
    ExecuteMsg, InstantiateMsg, IntentPayload, IntentResponse, OutboxResponse, QueryMsg,
    ReceiveMsg, SupplyResponse,
};
use bridge::state::wrapped_token_id;
use common::{OwnerOfResponse, RegistryExecuteMsg, RegistryQueryMsg};

pub const CHAIN_A: u64 = 1;
pub const CHAIN_B: u64 = 2;
pub const WINDOW_SECONDS: u64 = 3600;
pub const MAX_PER_WINDOW: u32 = 10;
pub const REVERT_COOLDOWN: u64 = 86_400;
pub const DEED_URI: &str = "ipfs://deed-42";

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    )
    .with_reply(bridge::contract::reply);
    Box::new(contract)
}

pub fn contract_registry() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        registry::contract::execute,
        registry::contract::instantiate,
        registry::contract::query,
    );
    Box::new(contract)
}

pub fn contract_kyc() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        kyc::contract::execute,
        kyc::contract::instantiate,
        kyc::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Test Environment
// ============================================================================

pub struct Chain {
    pub id: u64,
    pub bridge: Addr,
    pub assets: Addr,
    pub wrapped: Addr,
    pub kyc: Addr,
}

pub struct TestEnv {
    pub app: App,
    pub admin: Addr,
    pub relayers: Vec<Addr>,
    pub alice: Addr,
    pub bob: Addr,
    pub carol: Addr,
    pub a: Chain,
    pub b: Chain,
}

struct CodeIds {
    bridge: u64,
    registry: u64,
    kyc: u64,
}

/// Two chains, three relayers, quorum of two, 10 transfers per hour.
/// Alice owns certificate "42" on chain A.
pub fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let relayers = vec![
        Addr::unchecked("terra1relayer1"),
        Addr::unchecked("terra1relayer2"),
        Addr::unchecked("terra1relayer3"),
    ];
    let alice = Addr::unchecked("terra1alice");
    let bob = Addr::unchecked("terra1bob");
    let carol = Addr::unchecked("terra1carol");

    let codes = CodeIds {
        bridge: app.store_code(contract_bridge()),
        registry: app.store_code(contract_registry()),
        kyc: app.store_code(contract_kyc()),
    };

    let verified = vec![alice.to_string(), bob.to_string(), carol.to_string()];
    let a = deploy_chain(&mut app, &codes, &admin, &relayers, &verified, CHAIN_A, CHAIN_B);
    let b = deploy_chain(&mut app, &codes, &admin, &relayers, &verified, CHAIN_B, CHAIN_A);

    let mut env = TestEnv {
        app,
        admin,
        relayers,
        alice,
        bob,
        carol,
        a,
        b,
    };
    let alice = env.alice.clone();
    env.mint_asset("42", &alice, Some(DEED_URI));
    env
}

fn deploy_chain(
    app: &mut App,
    codes: &CodeIds,
    admin: &Addr,
    relayers: &[Addr],
    verified: &[String],
    chain_id: u64,
    remote_chain_id: u64,
) -> Chain {
    let assets = app
        .instantiate_contract(
            codes.registry,
            admin.clone(),
            &registry::msg::InstantiateMsg {
                name: format!("Asset Certificates {}", chain_id),
                symbol: "DEED".to_string(),
                admin: admin.to_string(),
                minters: vec![admin.to_string()],
            },
            &[],
            "assets",
            None,
        )
        .unwrap();

    let wrapped = app
        .instantiate_contract(
            codes.registry,
            admin.clone(),
            &registry::msg::InstantiateMsg {
                name: format!("Wrapped Certificates {}", chain_id),
                symbol: "wDEED".to_string(),
                admin: admin.to_string(),
                minters: vec![],
            },
            &[],
            "wrapped",
            None,
        )
        .unwrap();

    let kyc = app
        .instantiate_contract(
            codes.kyc,
            admin.clone(),
            &kyc::msg::InstantiateMsg {
                admin: admin.to_string(),
                verified: verified.to_vec(),
            },
            &[],
            "kyc",
            None,
        )
        .unwrap();

    let bridge = app
        .instantiate_contract(
            codes.bridge,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                this_chain_id: chain_id,
                asset_registry: assets.to_string(),
                wrapped_registry: wrapped.to_string(),
                eligibility_registry: Some(kyc.to_string()),
                relayers: relayers.iter().map(|r| r.to_string()).collect(),
                required_approvals: 2,
                window_seconds: WINDOW_SECONDS,
                max_per_window: MAX_PER_WINDOW,
                revert_cooldown: Some(REVERT_COOLDOWN),
            },
            &[],
            "asset-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    app.execute_contract(
        admin.clone(),
        wrapped.clone(),
        &RegistryExecuteMsg::AddMinter {
            minter: bridge.to_string(),
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        admin.clone(),
        bridge.clone(),
        &ExecuteMsg::RegisterChain {
            chain_id: remote_chain_id,
            name: format!("chain-{}", remote_chain_id),
        },
        &[],
    )
    .unwrap();

    Chain {
        id: chain_id,
        bridge,
        assets,
        wrapped,
        kyc,
    }
}

// ============================================================================
// Actions
// ============================================================================

impl TestEnv {
    /// Mint an original certificate on chain A.
    pub fn mint_asset(&mut self, token_id: &str, owner: &Addr, token_uri: Option<&str>) {
        self.app
            .execute_contract(
                self.admin.clone(),
                self.a.assets.clone(),
                &RegistryExecuteMsg::Mint {
                    token_id: token_id.to_string(),
                    owner: owner.to_string(),
                    token_uri: token_uri.map(|u| u.to_string()),
                },
                &[],
            )
            .unwrap();
    }

    /// Approve the chain A bridge and lock `asset_ref` for `recipient` on chain B.
    pub fn lock(
        &mut self,
        sender: &Addr,
        asset_ref: &str,
        recipient: &Addr,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.a.assets.clone(),
            &RegistryExecuteMsg::Approve {
                spender: self.a.bridge.to_string(),
                token_id: asset_ref.to_string(),
            },
            &[],
        )?;
        self.app.execute_contract(
            sender.clone(),
            self.a.bridge.clone(),
            &ExecuteMsg::Lock {
                asset_ref: asset_ref.to_string(),
                recipient: recipient.to_string(),
                destination_chain_id: CHAIN_B,
            },
            &[],
        )
    }

    /// Lock through `SendNft` on the chain A asset registry.
    pub fn send_lock(
        &mut self,
        sender: &Addr,
        asset_ref: &str,
        recipient: &Addr,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.a.assets.clone(),
            &RegistryExecuteMsg::SendNft {
                contract: self.a.bridge.to_string(),
                token_id: asset_ref.to_string(),
                msg: to_json_binary(&ReceiveMsg::Lock {
                    recipient: recipient.to_string(),
                    destination_chain_id: CHAIN_B,
                })
                .unwrap(),
            },
            &[],
        )
    }

    /// Approve the chain B bridge and burn the wrapped unit back to chain A.
    pub fn burn(
        &mut self,
        sender: &Addr,
        asset_ref: &str,
        recipient: &Addr,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.b.wrapped.clone(),
            &RegistryExecuteMsg::Approve {
                spender: self.b.bridge.to_string(),
                token_id: wrapped_id(asset_ref),
            },
            &[],
        )?;
        self.app.execute_contract(
            sender.clone(),
            self.b.bridge.clone(),
            &ExecuteMsg::Burn {
                asset_ref: asset_ref.to_string(),
                recipient: recipient.to_string(),
                destination_chain_id: CHAIN_A,
            },
            &[],
        )
    }

    pub fn attest(
        &mut self,
        bridge: &Addr,
        relayer: &Addr,
        payload: &IntentPayload,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            relayer.clone(),
            bridge.clone(),
            &ExecuteMsg::Attest {
                intent: payload.clone(),
            },
            &[],
        )
    }

    /// Relayer `index` attests `payload` on the chain B bridge.
    pub fn attest_b(
        &mut self,
        index: usize,
        payload: &IntentPayload,
    ) -> anyhow::Result<AppResponse> {
        let relayer = self.relayers[index].clone();
        let bridge = self.b.bridge.clone();
        self.attest(&bridge, &relayer, payload)
    }

    /// Relayer `index` attests `payload` on the chain A bridge.
    pub fn attest_a(
        &mut self,
        index: usize,
        payload: &IntentPayload,
    ) -> anyhow::Result<AppResponse> {
        let relayer = self.relayers[index].clone();
        let bridge = self.a.bridge.clone();
        self.attest(&bridge, &relayer, payload)
    }

    pub fn admin_exec(
        &mut self,
        contract: &Addr,
        msg: &ExecuteMsg,
    ) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(self.admin.clone(), contract.clone(), msg, &[])
    }

    /// Relayer `index` confirms on the chain A bridge that `intent_id`
    /// executed on chain B.
    pub fn confirm_a(&mut self, index: usize, intent_id: &Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.relayers[index].clone(),
            self.a.bridge.clone(),
            &ExecuteMsg::ConfirmExecution {
                intent_id: intent_id.clone(),
            },
            &[],
        )
    }

    pub fn advance(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += 1;
        });
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Most recent outbox entry of `bridge`.
    pub fn last_outbound(&self, bridge: &Addr) -> IntentPayload {
        let res: OutboxResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                bridge,
                &QueryMsg::Outbox {
                    start_after: None,
                    limit: Some(50),
                },
            )
            .unwrap();
        res.entries.last().unwrap().payload.clone()
    }

    pub fn intent(&self, bridge: &Addr, intent_id: &Binary) -> IntentResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                bridge,
                &QueryMsg::Intent {
                    intent_id: intent_id.clone(),
                },
            )
            .unwrap()
    }

    pub fn supply(&self, bridge: &Addr) -> SupplyResponse {
        self.app
            .wrap()
            .query_wasm_smart(bridge, &QueryMsg::Supply {})
            .unwrap()
    }

    /// Owner of `token_id`, or `None` if it does not exist.
    pub fn owner_of(&self, registry: &Addr, token_id: &str) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart::<OwnerOfResponse>(
                registry,
                &RegistryQueryMsg::OwnerOf {
                    token_id: token_id.to_string(),
                },
            )
            .ok()
            .map(|res| res.owner)
    }

    /// Lock "42" on A and drive it to execution on B with relayers 0 and 1.
    pub fn bridge_deed_to_bob(&mut self) -> IntentPayload {
        let alice = self.alice.clone();
        let bob = self.bob.clone();
        self.lock(&alice, "42", &bob).unwrap();
        let payload = self.last_outbound(&self.a.bridge.clone());
        self.attest_b(0, &payload).unwrap();
        self.attest_b(1, &payload).unwrap();
        payload
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Value of the first attribute named `key` across all events.
pub fn attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

/// Values of every attribute named `key`, in event order.
pub fn attrs(res: &AppResponse, key: &str) -> Vec<String> {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .filter(|a| a.key == key)
        .map(|a| a.value.clone())
        .collect()
}

pub fn root_error(err: anyhow::Error) -> String {
    err.root_cause().to_string()
}

/// Token id on chain B's wrapped registry for original `asset_ref` of chain A.
pub fn wrapped_id(asset_ref: &str) -> String {
    wrapped_token_id(CHAIN_A, asset_ref)
}
