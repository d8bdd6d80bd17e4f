#![forbid(unsafe_code)]

use oracle_kernel_contracts::{DomainEvent, Identity, Measurement, MeasurementKey};

use crate::state::ContractState;
use crate::store::{CommitRecord, EventLedgerRow, OracleStore, StorageError};

/// Typed repository interface for the owner and pending-owner slots.
pub trait OwnershipRepo {
    fn owner_row(&self) -> Identity;
    fn pending_owner_row(&self) -> Option<Identity>;
    fn set_owner_row(&mut self, owner: Identity);
    fn set_pending_owner_row(&mut self, pending: Option<Identity>);
}

/// Typed repository interface for the measurement table.
pub trait MeasurementRepo {
    fn measurement_row(&self, key: &MeasurementKey) -> Option<Measurement>;
    fn upsert_measurement_row(&mut self, key: MeasurementKey, measurement: Measurement);
}

/// Typed repository interface for committed invocations and their events.
pub trait EventLedgerRepo {
    fn commit_invocation_rows(
        &mut self,
        next: ContractState,
        events: Vec<DomainEvent>,
    ) -> Result<CommitRecord, StorageError>;
    fn event_ledger_rows(&self) -> &[EventLedgerRow];
    fn attempt_overwrite_event_ledger_row(
        &mut self,
        index: usize,
        event: DomainEvent,
    ) -> Result<(), StorageError>;
}

impl OwnershipRepo for ContractState {
    fn owner_row(&self) -> Identity {
        self.owner()
    }

    fn pending_owner_row(&self) -> Option<Identity> {
        self.pending_owner()
    }

    fn set_owner_row(&mut self, owner: Identity) {
        self.set_owner(owner);
    }

    fn set_pending_owner_row(&mut self, pending: Option<Identity>) {
        self.set_pending_owner(pending);
    }
}

impl MeasurementRepo for ContractState {
    fn measurement_row(&self, key: &MeasurementKey) -> Option<Measurement> {
        self.measurement(key).copied()
    }

    fn upsert_measurement_row(&mut self, key: MeasurementKey, measurement: Measurement) {
        self.put_measurement(key, measurement);
    }
}

impl EventLedgerRepo for OracleStore {
    fn commit_invocation_rows(
        &mut self,
        next: ContractState,
        events: Vec<DomainEvent>,
    ) -> Result<CommitRecord, StorageError> {
        self.commit(next, events)
    }

    fn event_ledger_rows(&self) -> &[EventLedgerRow] {
        OracleStore::event_ledger_rows(self)
    }

    fn attempt_overwrite_event_ledger_row(
        &mut self,
        index: usize,
        event: DomainEvent,
    ) -> Result<(), StorageError> {
        self.attempt_overwrite_event_row(index, event)
    }
}
