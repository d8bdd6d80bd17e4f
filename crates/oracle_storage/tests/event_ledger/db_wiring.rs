#![forbid(unsafe_code)]

use oracle_kernel_contracts::{DomainEvent, Felt, Identity, Measurement, MeasurementKey};
use oracle_storage::repo::{EventLedgerRepo, MeasurementRepo, OwnershipRepo};
use oracle_storage::{OracleStore, StorageError};

fn id(v: u64) -> Identity {
    Identity::new(Felt::from(v)).unwrap()
}

#[test]
fn at_ledger_db_01_commit_replaces_state_and_appends_rows() {
    let mut s = OracleStore::new_in_memory(id(1));
    let mut next = s.state().clone();
    next.set_pending_owner_row(Some(id(2)));

    let rec = s
        .commit_invocation_rows(next, vec![DomainEvent::OwnershipTransferRequested { to: id(2) }])
        .unwrap();
    assert_eq!(rec.invocation_seq, 1);
    assert_eq!(rec.state_digest, s.state().digest());
    assert_eq!(s.state().pending_owner(), Some(id(2)));
    assert_eq!(s.event_ledger_rows().len(), 1);
    assert_eq!(s.event_ledger_rows()[0].invocation_seq, 1);
    assert_eq!(s.event_ledger_rows()[0].event_index, 0);
}

#[test]
fn at_ledger_db_02_sequence_numbers_increase_per_commit() {
    let mut s = OracleStore::new_in_memory(id(1));
    let k = MeasurementKey::from(1);
    for i in 0..3u64 {
        let mut next = s.state().clone();
        let m = Measurement::v2(i as u128, i, 0);
        next.upsert_measurement_row(k, m);
        s.commit(next, vec![DomainEvent::MeasurementUpdate { key: k, measurement: m }])
            .unwrap();
    }
    assert_eq!(s.last_invocation_seq(), 3);
    assert_eq!(s.event_rows_for_invocation(2).len(), 1);
    assert_eq!(
        s.event_rows_for_invocation(2)[0].event,
        DomainEvent::MeasurementUpdate {
            key: k,
            measurement: Measurement::v2(1, 1, 0)
        }
    );
}

#[test]
fn at_ledger_db_03_commit_without_events_still_advances_sequence() {
    let mut s = OracleStore::new_in_memory(id(1));
    let next = s.state().clone();
    let rec = s.commit(next, Vec::new()).unwrap();
    assert_eq!(rec.invocation_seq, 1);
    assert!(s.event_ledger_rows().is_empty());
}

#[test]
fn at_ledger_db_04_append_only_enforced() {
    let mut s = OracleStore::new_in_memory(id(1));
    let next = s.state().clone();
    s.commit(next, vec![DomainEvent::OwnerUpdate { owner: id(1) }])
        .unwrap();
    assert_eq!(
        s.attempt_overwrite_event_ledger_row(0, DomainEvent::OwnerUpdate { owner: id(3) }),
        Err(StorageError::AppendOnlyViolation {
            table: "oracle_event_ledger"
        })
    );
    assert_eq!(
        s.event_ledger_rows()[0].event,
        DomainEvent::OwnerUpdate { owner: id(1) }
    );
}

#[test]
fn at_ledger_db_05_storage_errors_render_readable_text() {
    assert_eq!(
        StorageError::AppendOnlyViolation {
            table: "oracle_event_ledger"
        }
        .to_string(),
        "append-only table oracle_event_ledger cannot be overwritten"
    );
    let err = StorageError::from(oracle_kernel_contracts::ContractViolation::OutOfRange {
        field: "oracle_store.invocation_seq",
        bound: "u64::MAX",
    });
    assert_eq!(
        err.to_string(),
        "oracle_store.invocation_seq is out of range: must be < u64::MAX"
    );
}
