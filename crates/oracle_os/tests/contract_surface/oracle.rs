#![forbid(unsafe_code)]

use oracle_kernel_contracts::{DomainEvent, Felt, Identity, LegacyOwnerEvent, Measurement};
use oracle_os::{
    CallArgs, ContractConfig, ContractFacade, InvocationOutcome, OracleDeployConfig, ViewResult,
};

const OWNER_ADDRESS: &str = "0x18986dd1cbceaa12be8d66da46a99146c6db79ff964a716ec556a8a9659be35";
const NEW_OWNER_ADDRESS: &str =
    "0x7367e8bbc2b0065ac566e1785b7480ce74d27cb360dabaf5c558deab7a2bb05";

fn owner() -> Felt {
    OWNER_ADDRESS.parse().unwrap()
}

fn new_owner() -> Felt {
    NEW_OWNER_ADDRESS.parse().unwrap()
}

fn deploy(config: ContractConfig) -> ContractFacade {
    ContractFacade::deploy(config, owner()).unwrap()
}

fn view_owner(f: &mut ContractFacade) -> Felt {
    match f
        .execute_named(Felt::ZERO, "view_owner", &CallArgs::new())
        .unwrap()
    {
        InvocationOutcome::View(ViewResult::Owner { owner }) => owner.as_felt(),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn at_surface_01_view_owner_returns_deployer() {
    let mut f = deploy(ContractConfig::two_phase_v2());
    assert_eq!(view_owner(&mut f), owner());
}

#[test]
fn at_surface_02_deploy_from_config_file_text() {
    let text = format!("address = \"{OWNER_ADDRESS}\"\n");
    let cfg = OracleDeployConfig::from_toml(&text).unwrap();
    let mut f = ContractFacade::from_deploy_config(&cfg).unwrap();
    assert_eq!(view_owner(&mut f), owner());
}

#[test]
fn at_surface_03_update_owner_legacy_flow() {
    let mut f = deploy(ContractConfig::single_step_v1(LegacyOwnerEvent::OwnerUpdate));

    // Unsigned invoke: the null caller with a zero new owner.
    let err = f
        .execute_named(
            Felt::ZERO,
            "update_owner",
            &CallArgs::new().with("new_owner", 0u64),
        )
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("new owner cannot be the zero address"));

    let err = f
        .execute_named(
            new_owner(),
            "update_owner",
            &CallArgs::new().with("new_owner", new_owner()),
        )
        .unwrap_err();
    assert!(err.to_string().contains("only current owner can update"));
    assert_eq!(view_owner(&mut f), owner());

    f.execute_named(
        owner(),
        "update_owner",
        &CallArgs::new().with("new_owner", new_owner()),
    )
    .unwrap();
    assert_eq!(view_owner(&mut f), new_owner());
}

#[test]
fn at_surface_04_transfer_and_accept_flow() {
    let mut f = deploy(ContractConfig::two_phase_v2());
    let new_id = Identity::new(new_owner()).unwrap();
    let old_id = Identity::new(owner()).unwrap();

    let err = f
        .execute_named(
            owner(),
            "transfer_ownership",
            &CallArgs::new().with("new_owner", 0u64),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "new owner cannot be the zero address");

    let err = f
        .execute_named(
            new_owner(),
            "transfer_ownership",
            &CallArgs::new().with("new_owner", new_owner()),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "only current owner can update");

    let out = f
        .execute_named(
            owner(),
            "transfer_ownership",
            &CallArgs::new().with("new_owner", new_owner()),
        )
        .unwrap();
    let InvocationOutcome::Committed(receipt) = out else {
        panic!("transfer_ownership must commit");
    };
    assert_eq!(
        receipt.events,
        vec![DomainEvent::OwnershipTransferRequested { to: new_id }]
    );
    assert_eq!(view_owner(&mut f), owner());

    let err = f
        .execute_named(owner(), "accept_ownership", &CallArgs::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "only pending owner can accept ownership");

    let out = f
        .execute_named(new_owner(), "accept_ownership", &CallArgs::new())
        .unwrap();
    let InvocationOutcome::Committed(receipt) = out else {
        panic!("accept_ownership must commit");
    };
    assert_eq!(
        receipt.events,
        vec![DomainEvent::OwnershipTransferred {
            frm: old_id,
            to: new_id
        }]
    );
    assert_eq!(view_owner(&mut f), new_owner());
    assert_eq!(f.pending_owner(), None);
}

#[test]
fn at_surface_05_measurements_v1_schema() {
    let mut f = deploy(ContractConfig::single_step_v1(LegacyOwnerEvent::OwnerUpdate));
    let out = f
        .execute_named(Felt::ZERO, "get_measurement", &CallArgs::new().with("key", 1u64))
        .unwrap();
    assert_eq!(
        out,
        InvocationOutcome::View(ViewResult::Measurement(Measurement::v1(0, 0)))
    );

    f.execute_named(
        owner(),
        "set_measurement",
        &CallArgs::new()
            .with("key", 1u64)
            .with("value", 19_000u64)
            .with("timestamp", 1_650_000_000u64)
            .with("decimals", 2u8),
    )
    .unwrap();
    let out = f
        .execute_named(Felt::ZERO, "get_measurement", &CallArgs::new().with("key", 1u64))
        .unwrap();
    assert_eq!(
        out,
        InvocationOutcome::View(ViewResult::Measurement(Measurement::v1(
            19_000,
            1_650_000_000
        )))
    );
}

#[test]
fn at_surface_06_non_owner_measurement_write_rejected() {
    let mut f = deploy(ContractConfig::two_phase_v2());
    let err = f
        .execute_named(
            new_owner(),
            "set_measurement",
            &CallArgs::new()
                .with("key", 1u64)
                .with("value", 1u64)
                .with("timestamp", 1u64),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "only current owner can update");
    assert!(f.committed_events().is_empty());
    assert!(f.state().measurements().is_empty());
}
