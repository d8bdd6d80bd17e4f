#![forbid(unsafe_code)]

//! Caller authorization checks. Pure predicates: they read the roles they
//! are handed and never touch state.

use oracle_kernel_contracts::{Identity, OracleError};
use tracing::debug;

pub fn require_owner(caller: Option<Identity>, current_owner: Identity) -> Result<(), OracleError> {
    if caller == Some(current_owner) {
        return Ok(());
    }
    debug!(caller = ?caller.map(|c| c.to_string()), owner = %current_owner, "owner check rejected");
    Err(OracleError::NotCurrentOwner)
}

/// A missing pending owner rejects every caller, including the null one.
pub fn require_pending_owner(
    caller: Option<Identity>,
    pending_owner: Option<Identity>,
) -> Result<(), OracleError> {
    match (caller, pending_owner) {
        (Some(c), Some(p)) if c == p => Ok(()),
        _ => {
            debug!(
                caller = ?caller.map(|c| c.to_string()),
                pending = ?pending_owner.map(|p| p.to_string()),
                "pending owner check rejected"
            );
            Err(OracleError::NotPendingOwner)
        }
    }
}
