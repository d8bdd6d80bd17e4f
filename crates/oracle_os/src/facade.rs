#![forbid(unsafe_code)]

use oracle_engines::event_log::EventLog;
use oracle_engines::measurement::MeasurementRegistry;
use oracle_engines::ownership::OwnershipManager;
use oracle_kernel_contracts::{
    DomainEvent, Felt, Identity, Measurement, MeasurementKey, OracleError,
};
use oracle_storage::repo::EventLedgerRepo;
use oracle_storage::{ContractState, EventLedgerRow, OracleStore, StateDigest, StorageError};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{ContractConfig, OracleDeployConfig};
use crate::dispatch::{CallArgs, ContractCall, ContractView, Operation};

/// What a caller gets back from a committed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationReceipt {
    pub invocation_seq: u64,
    pub operation: &'static str,
    pub caller: Felt,
    pub events: Vec<DomainEvent>,
    pub state_digest: StateDigest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ViewResult {
    Owner { owner: Identity },
    Measurement(Measurement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationOutcome {
    View(ViewResult),
    Committed(InvocationReceipt),
}

/// Single entry point for one deployed contract instance.
///
/// Each `invoke` runs against a private copy of the committed state with a
/// fresh event log. The copy and its events replace the committed state in
/// one step when the operation succeeds; on any error both are dropped and
/// the committed state is untouched. `&mut self` keeps invocations strictly
/// sequential.
#[derive(Debug, Clone)]
pub struct ContractFacade {
    config: ContractConfig,
    ownership: OwnershipManager,
    registry: MeasurementRegistry,
    store: OracleStore,
}

impl ContractFacade {
    pub fn deploy(config: ContractConfig, initial_owner: Felt) -> Result<Self, OracleError> {
        let owner = Identity::from_felt(initial_owner).ok_or(OracleError::InitialOwnerZero)?;
        info!(
            owner = %owner,
            protocol = ?config.ownership_protocol,
            protocol_version = config.ownership_protocol.version().0,
            measurement_schema_version = config.measurement_schema.version().0,
            "contract deployed"
        );
        Ok(Self {
            config,
            ownership: OwnershipManager::new(config.ownership()),
            registry: MeasurementRegistry::new(config.measurement_schema),
            store: OracleStore::new_in_memory(owner),
        })
    }

    pub fn from_deploy_config(deploy: &OracleDeployConfig) -> Result<Self, OracleError> {
        Self::deploy(deploy.contract, deploy.initial_owner)
    }

    pub fn config(&self) -> ContractConfig {
        self.config
    }

    pub fn view_owner(&self) -> Identity {
        self.ownership.view_owner(self.store.state())
    }

    pub fn pending_owner(&self) -> Option<Identity> {
        self.store.state().pending_owner()
    }

    pub fn get_measurement(&self, key: MeasurementKey) -> Measurement {
        self.registry.get_measurement(self.store.state(), key)
    }

    pub fn view(&self, view: ContractView) -> ViewResult {
        match view {
            ContractView::ViewOwner => ViewResult::Owner {
                owner: self.view_owner(),
            },
            ContractView::GetMeasurement { key } => {
                ViewResult::Measurement(self.get_measurement(key))
            }
        }
    }

    pub fn state(&self) -> &ContractState {
        self.store.state()
    }

    pub fn committed_events(&self) -> &[EventLedgerRow] {
        self.store.event_ledger_rows()
    }

    pub fn invoke(
        &mut self,
        caller: Felt,
        call: ContractCall,
    ) -> Result<InvocationReceipt, OracleError> {
        let operation = call.name();
        let mut working = self.store.state().clone();
        let mut log = EventLog::new();

        if let Err(err) = self.apply(&mut working, Identity::from_felt(caller), call, &mut log) {
            warn!(operation, caller = %caller, error = %err, "invocation rejected");
            return Err(err);
        }

        let events = log.drain();
        let record = self
            .store
            .commit_invocation_rows(working, events.clone())
            .map_err(storage_failure)?;
        info!(
            operation,
            caller = %caller,
            invocation_seq = record.invocation_seq,
            events = events.len(),
            "invocation committed"
        );
        Ok(InvocationReceipt {
            invocation_seq: record.invocation_seq,
            operation,
            caller,
            events,
            state_digest: record.state_digest,
        })
    }

    /// Dispatch a call by operation name, the way external callers address
    /// the contract. Views never touch the store.
    pub fn execute_named(
        &mut self,
        caller: Felt,
        name: &str,
        args: &CallArgs,
    ) -> Result<InvocationOutcome, OracleError> {
        let op = match Operation::from_named(name, args) {
            Ok(op) => op,
            Err(err) => {
                warn!(operation = name, caller = %caller, error = %err, "dispatch rejected");
                return Err(err);
            }
        };
        match op {
            Operation::View(v) => Ok(InvocationOutcome::View(self.view(v))),
            Operation::Invoke(c) => Ok(InvocationOutcome::Committed(self.invoke(caller, c)?)),
        }
    }

    fn apply(
        &self,
        state: &mut ContractState,
        caller: Option<Identity>,
        call: ContractCall,
        log: &mut EventLog,
    ) -> Result<(), OracleError> {
        let events = match call {
            ContractCall::TransferOwnership { new_owner } => self.ownership.transfer_ownership(
                state,
                caller,
                Identity::from_felt(new_owner),
            )?,
            ContractCall::AcceptOwnership => self.ownership.accept_ownership(state, caller)?,
            ContractCall::UpdateOwner { new_owner } => {
                self.ownership
                    .update_owner(state, caller, Identity::from_felt(new_owner))?
            }
            ContractCall::SetMeasurement { key, measurement } => {
                self.registry
                    .set_measurement(state, caller, key, measurement)?
            }
        };
        log.extend(events);
        Ok(())
    }
}

fn storage_failure(e: StorageError) -> OracleError {
    OracleError::StorageFailure {
        reason: e.to_string(),
    }
}
