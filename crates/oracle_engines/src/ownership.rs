#![forbid(unsafe_code)]

use oracle_kernel_contracts::{
    DomainEvent, Identity, LegacyOwnerEvent, OracleError, OwnershipProtocol,
};
use oracle_storage::repo::OwnershipRepo;
use tracing::debug;

use crate::access_guard::{require_owner, require_pending_owner};

pub const OP_VIEW_OWNER: &str = "view_owner";
pub const OP_TRANSFER_OWNERSHIP: &str = "transfer_ownership";
pub const OP_ACCEPT_OWNERSHIP: &str = "accept_ownership";
pub const OP_UPDATE_OWNER: &str = "update_owner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipConfig {
    pub protocol: OwnershipProtocol,
    pub legacy_event: LegacyOwnerEvent,
}

impl OwnershipConfig {
    pub fn two_phase() -> Self {
        Self {
            protocol: OwnershipProtocol::TwoPhase,
            legacy_event: LegacyOwnerEvent::default(),
        }
    }

    pub fn single_step(legacy_event: LegacyOwnerEvent) -> Self {
        Self {
            protocol: OwnershipProtocol::SingleStep,
            legacy_event,
        }
    }
}

/// Owner slot state machine.
///
/// Two-phase: `Stable(owner)` -> `PendingTransfer(owner, pending)` ->
/// `Stable(pending)`. Single-step: `Stable(owner)` -> `Stable(new_owner)`.
/// Every method checks all preconditions before writing to `repo`.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipManager {
    config: OwnershipConfig,
}

impl OwnershipManager {
    pub fn new(config: OwnershipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> OwnershipConfig {
        self.config
    }

    pub fn view_owner<R: OwnershipRepo>(&self, repo: &R) -> Identity {
        repo.owner_row()
    }

    pub fn transfer_ownership<R: OwnershipRepo>(
        &self,
        repo: &mut R,
        caller: Option<Identity>,
        new_owner: Option<Identity>,
    ) -> Result<Vec<DomainEvent>, OracleError> {
        self.require_protocol(OwnershipProtocol::TwoPhase, OP_TRANSFER_OWNERSHIP)?;
        let new_owner = new_owner.ok_or(OracleError::NewOwnerZero)?;
        require_owner(caller, repo.owner_row())?;

        repo.set_pending_owner_row(Some(new_owner));
        debug!(to = %new_owner, "ownership transfer requested");
        Ok(vec![DomainEvent::OwnershipTransferRequested { to: new_owner }])
    }

    pub fn accept_ownership<R: OwnershipRepo>(
        &self,
        repo: &mut R,
        caller: Option<Identity>,
    ) -> Result<Vec<DomainEvent>, OracleError> {
        self.require_protocol(OwnershipProtocol::TwoPhase, OP_ACCEPT_OWNERSHIP)?;
        let pending = repo.pending_owner_row();
        require_pending_owner(caller, pending)?;
        let new_owner = pending.ok_or(OracleError::NotPendingOwner)?;
        let old_owner = repo.owner_row();

        repo.set_owner_row(new_owner);
        repo.set_pending_owner_row(None);
        debug!(frm = %old_owner, to = %new_owner, "ownership accepted");
        Ok(vec![DomainEvent::OwnershipTransferred {
            frm: old_owner,
            to: new_owner,
        }])
    }

    pub fn update_owner<R: OwnershipRepo>(
        &self,
        repo: &mut R,
        caller: Option<Identity>,
        new_owner: Option<Identity>,
    ) -> Result<Vec<DomainEvent>, OracleError> {
        self.require_protocol(OwnershipProtocol::SingleStep, OP_UPDATE_OWNER)?;
        let new_owner = new_owner.ok_or(OracleError::NewOwnerZero)?;
        require_owner(caller, repo.owner_row())?;

        repo.set_owner_row(new_owner);
        let event = match self.config.legacy_event {
            LegacyOwnerEvent::OwnerUpdate => DomainEvent::OwnerUpdate { owner: new_owner },
            LegacyOwnerEvent::OwnershipTransferred => {
                DomainEvent::LegacyOwnershipTransferred { owner: new_owner }
            }
        };
        debug!(owner = %new_owner, "owner updated");
        Ok(vec![event])
    }

    fn require_protocol(
        &self,
        expected: OwnershipProtocol,
        operation: &'static str,
    ) -> Result<(), OracleError> {
        if self.config.protocol != expected {
            return Err(OracleError::UnsupportedOperation {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}
