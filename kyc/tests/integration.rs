use cosmwasm_std::{Addr, Empty};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use kyc::msg::{
    AdminResponse, EligibilityResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
    VerifiedAccountsResponse,
};

fn contract_kyc() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        kyc::contract::execute,
        kyc::contract::instantiate,
        kyc::contract::query,
    );
    Box::new(contract)
}

fn setup() -> (App, Addr, Addr) {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let code_id = app.store_code(contract_kyc());

    let kyc = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                verified: vec!["terra1alice".to_string()],
            },
            &[],
            "kyc",
            None,
        )
        .unwrap();

    (app, kyc, admin)
}

fn is_eligible(app: &App, kyc: &Addr, address: &str) -> bool {
    let res: EligibilityResponse = app
        .wrap()
        .query_wasm_smart(
            kyc,
            &QueryMsg::IsEligible {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.eligible
}

#[test]
fn test_verify_and_unverify() {
    let (mut app, kyc, admin) = setup();

    assert!(is_eligible(&app, &kyc, "terra1alice"));
    assert!(!is_eligible(&app, &kyc, "terra1bob"));

    app.execute_contract(
        admin.clone(),
        kyc.clone(),
        &ExecuteMsg::Verify {
            address: "terra1bob".to_string(),
        },
        &[],
    )
    .unwrap();
    assert!(is_eligible(&app, &kyc, "terra1bob"));

    app.execute_contract(
        admin.clone(),
        kyc.clone(),
        &ExecuteMsg::Unverify {
            address: "terra1alice".to_string(),
        },
        &[],
    )
    .unwrap();
    assert!(!is_eligible(&app, &kyc, "terra1alice"));

    let err = app
        .execute_contract(
            admin,
            kyc.clone(),
            &ExecuteMsg::Unverify {
                address: "terra1alice".to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Account not verified: terra1alice"));

    let accounts: VerifiedAccountsResponse = app
        .wrap()
        .query_wasm_smart(
            &kyc,
            &QueryMsg::VerifiedAccounts {
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(accounts.accounts.len(), 1);
    assert_eq!(accounts.accounts[0].address, Addr::unchecked("terra1bob"));
}

#[test]
fn test_only_admin_manages_accounts() {
    let (mut app, kyc, admin) = setup();
    let alice = Addr::unchecked("terra1alice");

    let err = app
        .execute_contract(
            alice.clone(),
            kyc.clone(),
            &ExecuteMsg::Verify {
                address: "terra1mallory".to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));

    app.execute_contract(
        admin.clone(),
        kyc.clone(),
        &ExecuteMsg::UpdateAdmin {
            admin: alice.to_string(),
        },
        &[],
    )
    .unwrap();

    let res: AdminResponse = app
        .wrap()
        .query_wasm_smart(&kyc, &QueryMsg::Admin {})
        .unwrap();
    assert_eq!(res.admin, alice.to_string());

    let err = app
        .execute_contract(
            admin,
            kyc.clone(),
            &ExecuteMsg::Verify {
                address: "terra1bob".to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));
}
