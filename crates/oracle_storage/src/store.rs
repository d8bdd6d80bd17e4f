#![forbid(unsafe_code)]

use oracle_kernel_contracts::{ContractViolation, DomainEvent, Identity};
use serde::Serialize;
use thiserror::Error;

use crate::state::{ContractState, StateDigest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("append-only table {table} cannot be overwritten")]
    AppendOnlyViolation { table: &'static str },
    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLedgerRow {
    pub invocation_seq: u64,
    pub event_index: u32,
    pub event: DomainEvent,
}

/// Result of committing one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRecord {
    pub invocation_seq: u64,
    pub state_digest: StateDigest,
}

/// Committed contract state plus the append-only history of every event
/// that was ever committed alongside it.
#[derive(Debug, Clone)]
pub struct OracleStore {
    state: ContractState,
    event_ledger: Vec<EventLedgerRow>,
    last_invocation_seq: u64,
}

impl OracleStore {
    pub fn new_in_memory(initial_owner: Identity) -> Self {
        Self {
            state: ContractState::new(initial_owner),
            event_ledger: Vec::new(),
            last_invocation_seq: 0,
        }
    }

    pub fn state(&self) -> &ContractState {
        &self.state
    }

    pub fn last_invocation_seq(&self) -> u64 {
        self.last_invocation_seq
    }

    /// Replace the committed state with `next` and append `events` under a
    /// fresh invocation sequence number. Both happen or neither does.
    pub fn commit(
        &mut self,
        next: ContractState,
        events: Vec<DomainEvent>,
    ) -> Result<CommitRecord, StorageError> {
        let invocation_seq = self.last_invocation_seq.checked_add(1).ok_or(
            ContractViolation::OutOfRange {
                field: "oracle_store.invocation_seq",
                bound: "u64::MAX",
            },
        )?;
        if events.len() > u32::MAX as usize {
            return Err(StorageError::ContractViolation(
                ContractViolation::OutOfRange {
                    field: "oracle_store.event_index",
                    bound: "u32::MAX",
                },
            ));
        }
        let state_digest = next.digest();
        self.event_ledger
            .extend(events.into_iter().enumerate().map(|(i, event)| EventLedgerRow {
                invocation_seq,
                event_index: i as u32,
                event,
            }));
        self.state = next;
        self.last_invocation_seq = invocation_seq;
        Ok(CommitRecord {
            invocation_seq,
            state_digest,
        })
    }

    pub fn event_ledger_rows(&self) -> &[EventLedgerRow] {
        &self.event_ledger
    }

    pub fn event_rows_for_invocation(&self, invocation_seq: u64) -> Vec<&EventLedgerRow> {
        self.event_ledger
            .iter()
            .filter(|r| r.invocation_seq == invocation_seq)
            .collect()
    }

    pub fn attempt_overwrite_event_row(
        &mut self,
        _index: usize,
        _event: DomainEvent,
    ) -> Result<(), StorageError> {
        Err(StorageError::AppendOnlyViolation {
            table: "oracle_event_ledger",
        })
    }
}
