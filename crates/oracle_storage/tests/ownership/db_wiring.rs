#![forbid(unsafe_code)]

use oracle_kernel_contracts::{Felt, Identity};
use oracle_storage::repo::OwnershipRepo;
use oracle_storage::ContractState;

fn id(v: u64) -> Identity {
    Identity::new(Felt::from(v)).unwrap()
}

#[test]
fn at_own_db_01_new_state_has_owner_and_no_pending() {
    let s = ContractState::new(id(1));
    assert_eq!(s.owner_row(), id(1));
    assert_eq!(s.pending_owner_row(), None);
}

#[test]
fn at_own_db_02_pending_slot_set_and_cleared() {
    let mut s = ContractState::new(id(1));
    s.set_pending_owner_row(Some(id(2)));
    assert_eq!(s.pending_owner_row(), Some(id(2)));
    assert_eq!(s.owner_row(), id(1));

    s.set_owner_row(id(2));
    s.set_pending_owner_row(None);
    assert_eq!(s.owner_row(), id(2));
    assert_eq!(s.pending_owner(), None);
}

#[test]
fn at_own_db_03_clone_is_isolated_from_original() {
    let committed = ContractState::new(id(1));
    let mut working = committed.clone();
    working.set_owner_row(id(9));
    assert_eq!(committed.owner(), id(1));
    assert_ne!(committed.digest(), working.digest());
}
