#![forbid(unsafe_code)]

use oracle_kernel_contracts::{
    Felt, LegacyOwnerEvent, Measurement, MeasurementKey, MeasurementSchema, OwnershipProtocol,
};
use oracle_os::{ContractCall, ContractConfig, ContractFacade};
use proptest::prelude::*;

// Callers are drawn from a tiny address space (0 is the null caller) so
// that authorized and unauthorized invocations both show up often.
fn arb_address() -> impl Strategy<Value = Felt> {
    (0u64..4).prop_map(Felt::from)
}

fn arb_config() -> impl Strategy<Value = ContractConfig> {
    (
        prop_oneof![Just(OwnershipProtocol::TwoPhase), Just(OwnershipProtocol::SingleStep)],
        prop_oneof![
            Just(LegacyOwnerEvent::OwnerUpdate),
            Just(LegacyOwnerEvent::OwnershipTransferred)
        ],
        prop_oneof![Just(MeasurementSchema::V1), Just(MeasurementSchema::V2)],
    )
        .prop_map(
            |(ownership_protocol, legacy_owner_event, measurement_schema)| ContractConfig {
                ownership_protocol,
                legacy_owner_event,
                measurement_schema,
            },
        )
}

fn arb_call() -> impl Strategy<Value = ContractCall> {
    prop_oneof![
        arb_address().prop_map(|new_owner| ContractCall::TransferOwnership { new_owner }),
        Just(ContractCall::AcceptOwnership),
        arb_address().prop_map(|new_owner| ContractCall::UpdateOwner { new_owner }),
        (0u128..4, any::<u128>(), any::<u64>(), proptest::option::of(any::<u8>())).prop_map(
            |(k, value, timestamp, decimals)| ContractCall::SetMeasurement {
                key: MeasurementKey::from(k),
                measurement: Measurement {
                    value,
                    timestamp,
                    decimals,
                },
            }
        ),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: under every deployment shape, a rejected invocation changes
    /// nothing and the committed ledger holds exactly the events of accepted
    /// invocations.
    #[test]
    fn prop_rejections_are_invisible(
        config in arb_config(),
        steps in proptest::collection::vec((arb_address(), arb_call()), 1..40),
    ) {
        let mut f = ContractFacade::deploy(config, Felt::from(1u64)).unwrap();
        let mut accepted_events = 0usize;

        for (caller, call) in steps {
            let before_state = f.state().clone();
            let before_events = f.committed_events().len();
            match f.invoke(caller, call) {
                Ok(receipt) => {
                    prop_assert_eq!(receipt.events.len(), 1);
                    prop_assert_eq!(receipt.state_digest, f.state().digest());
                    accepted_events += receipt.events.len();
                    if let ContractCall::SetMeasurement { key, .. } = call {
                        prop_assert_eq!(
                            f.get_measurement(key).schema(),
                            config.measurement_schema
                        );
                    }
                }
                Err(_) => {
                    prop_assert_eq!(f.state(), &before_state);
                    prop_assert_eq!(f.committed_events().len(), before_events);
                }
            }
        }
        prop_assert_eq!(f.committed_events().len(), accepted_events);
    }

    /// Property: the owner slot is never vacated.
    #[test]
    fn prop_owner_always_present(
        config in arb_config(),
        steps in proptest::collection::vec((arb_address(), arb_call()), 1..40),
    ) {
        let mut f = ContractFacade::deploy(config, Felt::from(1u64)).unwrap();
        for (caller, call) in steps {
            let _ = f.invoke(caller, call);
            prop_assert!(!f.view_owner().as_felt().is_zero());
        }
    }
}
