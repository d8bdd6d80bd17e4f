#![forbid(unsafe_code)]

use oracle_kernel_contracts::{Felt, Identity, Measurement, MeasurementKey};
use oracle_storage::repo::MeasurementRepo;
use oracle_storage::ContractState;

fn state() -> ContractState {
    ContractState::new(Identity::new(Felt::from(1u64)).unwrap())
}

#[test]
fn at_meas_db_01_unset_key_has_no_row() {
    let s = state();
    assert_eq!(s.measurement_row(&MeasurementKey::from(5)), None);
    assert!(s.measurements().is_empty());
}

#[test]
fn at_meas_db_02_upsert_inserts_then_overwrites() {
    let mut s = state();
    let k = MeasurementKey::from(5);
    s.upsert_measurement_row(k, Measurement::v2(10, 100, 2));
    assert_eq!(s.measurement_row(&k), Some(Measurement::v2(10, 100, 2)));

    s.upsert_measurement_row(k, Measurement::v2(11, 101, 2));
    assert_eq!(s.measurement_row(&k), Some(Measurement::v2(11, 101, 2)));
    assert_eq!(s.measurements().len(), 1);
}

#[test]
fn at_meas_db_03_same_write_twice_matches_single_write() {
    let mut once = state();
    let mut twice = state();
    let k = MeasurementKey::from(7);
    let m = Measurement::v1(3, 4);
    once.upsert_measurement_row(k, m);
    twice.upsert_measurement_row(k, m);
    twice.upsert_measurement_row(k, m);
    assert_eq!(once, twice);
    assert_eq!(once.digest(), twice.digest());
}
