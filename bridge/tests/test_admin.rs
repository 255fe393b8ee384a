//! Administration: instantiate validation, relayer set and threshold,
//! chain registry, collaborator settings and the admin timelock.

mod helpers;

use cosmwasm_std::Addr;
use cw_multi_test::{App, Executor};

use bridge::msg::{
    ChainsResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, IsRelayerResponse,
    PendingAdminResponse, QueryMsg, RelayersResponse,
};
use bridge::state::ChainConfig;

use helpers::{attr, contract_bridge, root_error, setup, wrapped_id, CHAIN_A, CHAIN_B};

fn config(env: &helpers::TestEnv, bridge: &Addr) -> ConfigResponse {
    env.app
        .wrap()
        .query_wasm_smart(bridge, &QueryMsg::Config {})
        .unwrap()
}

fn instantiate_msg(relayers: Vec<&str>, required: u32) -> InstantiateMsg {
    InstantiateMsg {
        admin: "terra1admin".to_string(),
        this_chain_id: CHAIN_A,
        asset_registry: "terra1assets".to_string(),
        wrapped_registry: "terra1wrapped".to_string(),
        eligibility_registry: None,
        relayers: relayers.into_iter().map(|r| r.to_string()).collect(),
        required_approvals: required,
        window_seconds: 3600,
        max_per_window: 10,
        revert_cooldown: None,
    }
}

// ============================================================================
// Instantiate
// ============================================================================

#[test]
fn test_instantiate_defaults() {
    let mut app = App::default();
    let code_id = app.store_code(contract_bridge());
    let admin = Addr::unchecked("terra1admin");

    // Duplicate relayers count once
    let bridge = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &instantiate_msg(vec!["terra1r1", "terra1r2", "terra1r1"], 2),
            &[],
            "bridge",
            None,
        )
        .unwrap();

    let config: ConfigResponse = app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.admin, admin);
    assert!(!config.paused);
    assert_eq!(config.relayer_count, 2);
    assert_eq!(config.required_approvals, 2);
    assert_eq!(config.revert_cooldown, 86_400);
    assert_eq!(config.eligibility_registry, None);

    let relayers: RelayersResponse = app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::Relayers {})
        .unwrap();
    assert_eq!(
        relayers.relayers,
        vec![Addr::unchecked("terra1r1"), Addr::unchecked("terra1r2")]
    );
}

#[test]
fn test_instantiate_rejects_bad_threshold_and_limits() {
    let mut app = App::default();
    let code_id = app.store_code(contract_bridge());
    let admin = Addr::unchecked("terra1admin");

    for (relayers, required) in [(vec!["terra1r1"], 0), (vec!["terra1r1", "terra1r2"], 3)] {
        let err = app
            .instantiate_contract(
                code_id,
                admin.clone(),
                &instantiate_msg(relayers, required),
                &[],
                "bridge",
                None,
            )
            .unwrap_err();
        assert!(root_error(err).contains("Invalid required approvals"));
    }

    let mut msg = instantiate_msg(vec!["terra1r1"], 1);
    msg.max_per_window = 0;
    let err = app
        .instantiate_contract(code_id, admin.clone(), &msg, &[], "bridge", None)
        .unwrap_err();
    assert!(root_error(err).contains("Invalid rate limit"));
}

// ============================================================================
// Relayers and Threshold
// ============================================================================

#[test]
fn test_relayer_management() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();
    let dave = "terra1relayer4".to_string();

    let res = env
        .admin_exec(&bridge, &ExecuteMsg::AddRelayer { relayer: dave.clone() })
        .unwrap();
    assert_eq!(attr(&res, "relayer_count"), Some("4".to_string()));

    let is_relayer: IsRelayerResponse = env
        .app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::IsRelayer { address: dave.clone() })
        .unwrap();
    assert!(is_relayer.is_relayer);

    let err = env
        .admin_exec(&bridge, &ExecuteMsg::AddRelayer { relayer: dave.clone() })
        .unwrap_err();
    assert!(root_error(err).contains("Relayer already registered"));

    env.admin_exec(&bridge, &ExecuteMsg::RemoveRelayer { relayer: dave.clone() })
        .unwrap();
    let err = env
        .admin_exec(&bridge, &ExecuteMsg::RemoveRelayer { relayer: dave })
        .unwrap_err();
    assert!(root_error(err).contains("Relayer not registered"));

    let alice = env.alice.clone();
    let err = env
        .app
        .execute_contract(
            alice,
            bridge,
            &ExecuteMsg::AddRelayer {
                relayer: "terra1alice".to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert!(root_error(err).contains("Unauthorized"));
}

#[test]
fn test_relayer_removal_cannot_break_threshold() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();
    let third = env.relayers[2].to_string();
    let second = env.relayers[1].to_string();

    env.admin_exec(&bridge, &ExecuteMsg::RemoveRelayer { relayer: third })
        .unwrap();

    let err = env
        .admin_exec(&bridge, &ExecuteMsg::RemoveRelayer { relayer: second })
        .unwrap_err();
    assert!(root_error(err).contains("Cannot remove relayer"));
    assert_eq!(config(&env, &bridge).relayer_count, 2);
}

#[test]
fn test_required_approvals_bounds() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();

    for required in [0u32, 4] {
        let err = env
            .admin_exec(&bridge, &ExecuteMsg::SetRequiredApprovals { required })
            .unwrap_err();
        assert!(root_error(err).contains("Invalid required approvals"));
    }

    env.admin_exec(&bridge, &ExecuteMsg::SetRequiredApprovals { required: 3 })
        .unwrap();
    assert_eq!(config(&env, &bridge).required_approvals, 3);
}

// ============================================================================
// Chain Registry
// ============================================================================

#[test]
fn test_chain_registry() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();

    let err = env
        .admin_exec(
            &bridge,
            &ExecuteMsg::RegisterChain {
                chain_id: CHAIN_A,
                name: "self".to_string(),
            },
        )
        .unwrap_err();
    assert!(root_error(err).contains("Chain not supported: 1"));

    env.admin_exec(
        &bridge,
        &ExecuteMsg::RegisterChain {
            chain_id: 7,
            name: "chain-7".to_string(),
        },
    )
    .unwrap();
    env.admin_exec(
        &bridge,
        &ExecuteMsg::UpdateChain {
            chain_id: 7,
            name: Some("seven".to_string()),
            enabled: Some(false),
        },
    )
    .unwrap();

    let chain: ChainConfig = env
        .app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::Chain { chain_id: 7 })
        .unwrap();
    assert_eq!(chain.name, "seven");
    assert!(!chain.enabled);

    let chains: ChainsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::Chains {
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    let ids: Vec<u64> = chains.chains.iter().map(|c| c.chain_id).collect();
    assert_eq!(ids, vec![CHAIN_B, 7]);

    let err = env
        .admin_exec(
            &bridge,
            &ExecuteMsg::UpdateChain {
                chain_id: 99,
                name: None,
                enabled: Some(true),
            },
        )
        .unwrap_err();
    assert!(root_error(err).contains("Chain not supported: 99"));
}

#[test]
fn test_disabled_origin_still_settles_in_flight_intent() {
    let mut env = setup();
    let alice = env.alice.clone();
    let bob = env.bob.clone();
    let bridge_b = env.b.bridge.clone();

    env.lock(&alice, "42", &bob).unwrap();
    let payload = env.last_outbound(&env.a.bridge.clone());

    env.admin_exec(
        &bridge_b,
        &ExecuteMsg::UpdateChain {
            chain_id: CHAIN_A,
            name: None,
            enabled: Some(false),
        },
    )
    .unwrap();

    env.attest_b(0, &payload).unwrap();
    let res = env.attest_b(1, &payload).unwrap();
    assert_eq!(attr(&res, "result"), Some("quorum_reached".to_string()));
    assert_eq!(env.owner_of(&env.b.wrapped, &wrapped_id("42")), Some(bob.to_string()));
}

// ============================================================================
// Collaborators and Timing
// ============================================================================

#[test]
fn test_clearing_eligibility_registry_skips_check() {
    let mut env = setup();
    let alice = env.alice.clone();
    let bob = env.bob.clone();
    let bridge = env.a.bridge.clone();
    let kyc = env.a.kyc.clone();

    env.app
        .execute_contract(
            env.admin.clone(),
            kyc,
            &kyc::msg::ExecuteMsg::Unverify {
                address: alice.to_string(),
            },
            &[],
        )
        .unwrap();
    assert!(env.lock(&alice, "42", &bob).is_err());

    let res = env
        .admin_exec(&bridge, &ExecuteMsg::SetEligibilityRegistry { registry: None })
        .unwrap();
    assert_eq!(attr(&res, "eligibility_registry"), Some("none".to_string()));

    env.lock(&alice, "42", &bob).unwrap();
}

#[test]
fn test_set_revert_cooldown() {
    let mut env = setup();
    let alice = env.alice.clone();
    let bob = env.bob.clone();
    let bridge = env.a.bridge.clone();

    env.admin_exec(&bridge, &ExecuteMsg::SetRevertCooldown { seconds: 60 })
        .unwrap();
    assert_eq!(config(&env, &bridge).revert_cooldown, 60);

    env.lock(&alice, "42", &bob).unwrap();
    let payload = env.last_outbound(&bridge);
    env.advance(60);
    env.admin_exec(
        &bridge,
        &ExecuteMsg::RevertIntent {
            intent_id: payload.intent_id,
        },
    )
    .unwrap();
    assert_eq!(env.owner_of(&env.a.assets, "42"), Some(alice.to_string()));
}

#[test]
fn test_revert_cooldown_is_bounded() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();

    let err = env
        .admin_exec(&bridge, &ExecuteMsg::SetRevertCooldown { seconds: u64::MAX })
        .unwrap_err();
    assert!(root_error(err).contains("Invalid revert cooldown"));
    assert_eq!(config(&env, &bridge).revert_cooldown, 86_400);

    // 30 days is the longest accepted cooldown
    env.admin_exec(&bridge, &ExecuteMsg::SetRevertCooldown { seconds: 2_592_000 })
        .unwrap();
    assert_eq!(config(&env, &bridge).revert_cooldown, 2_592_000);

    let mut app = App::default();
    let code_id = app.store_code(contract_bridge());
    let mut msg = instantiate_msg(vec!["terra1r1"], 1);
    msg.revert_cooldown = Some(2_592_001);
    let err = app
        .instantiate_contract(code_id, Addr::unchecked("terra1admin"), &msg, &[], "bridge", None)
        .unwrap_err();
    assert!(root_error(err).contains("must be at most 2592000 seconds"));
}

// ============================================================================
// Pause and Admin Transfer
// ============================================================================

#[test]
fn test_pause_requires_admin() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();
    let relayer = env.relayers[0].clone();

    let err = env
        .app
        .execute_contract(relayer, bridge.clone(), &ExecuteMsg::Pause {}, &[])
        .unwrap_err();
    assert!(root_error(err).contains("Unauthorized"));

    env.admin_exec(&bridge, &ExecuteMsg::Pause {}).unwrap();
    assert!(config(&env, &bridge).paused);
    env.admin_exec(&bridge, &ExecuteMsg::Unpause {}).unwrap();
    assert!(!config(&env, &bridge).paused);
}

#[test]
fn test_admin_transfer_timelock() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();
    let new_admin = Addr::unchecked("terra1newadmin");

    env.admin_exec(
        &bridge,
        &ExecuteMsg::ProposeAdmin {
            new_admin: new_admin.to_string(),
        },
    )
    .unwrap();

    let pending: Option<PendingAdminResponse> = env
        .app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::PendingAdmin {})
        .unwrap();
    assert_eq!(pending.unwrap().new_address, new_admin);

    let err = env
        .app
        .execute_contract(new_admin.clone(), bridge.clone(), &ExecuteMsg::AcceptAdmin {}, &[])
        .unwrap_err();
    assert!(root_error(err).contains("Timelock not expired"));

    let err = env
        .app
        .execute_contract(
            env.alice.clone(),
            bridge.clone(),
            &ExecuteMsg::AcceptAdmin {},
            &[],
        )
        .unwrap_err();
    assert!(root_error(err).contains("only pending admin"));

    env.advance(604_800);
    env.app
        .execute_contract(new_admin.clone(), bridge.clone(), &ExecuteMsg::AcceptAdmin {}, &[])
        .unwrap();
    assert_eq!(config(&env, &bridge).admin, new_admin);

    // The old admin lost its rights
    let err = env.admin_exec(&bridge, &ExecuteMsg::Pause {}).unwrap_err();
    assert!(root_error(err).contains("Unauthorized"));
}

#[test]
fn test_cancel_admin_proposal() {
    let mut env = setup();
    let bridge = env.a.bridge.clone();

    let err = env
        .admin_exec(&bridge, &ExecuteMsg::CancelAdminProposal {})
        .unwrap_err();
    assert!(root_error(err).contains("No pending admin change"));

    env.admin_exec(
        &bridge,
        &ExecuteMsg::ProposeAdmin {
            new_admin: "terra1newadmin".to_string(),
        },
    )
    .unwrap();
    env.admin_exec(&bridge, &ExecuteMsg::CancelAdminProposal {})
        .unwrap();

    let pending: Option<PendingAdminResponse> = env
        .app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::PendingAdmin {})
        .unwrap();
    assert!(pending.is_none());
}
