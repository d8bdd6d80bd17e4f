#![forbid(unsafe_code)]

use thiserror::Error;

use crate::ContractViolation;

// Callers match on these strings. Do not reword.
pub const ERR_NEW_OWNER_ZERO: &str = "new owner cannot be the zero address";
pub const ERR_ONLY_CURRENT_OWNER: &str = "only current owner can update";
pub const ERR_ONLY_PENDING_OWNER: &str = "only pending owner can accept ownership";
pub const ERR_INITIAL_OWNER_ZERO: &str = "owner cannot be the zero address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    InvalidArgument,
    UnsupportedOperation,
    Internal,
}

/// Every way an invocation can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("{}", ERR_NEW_OWNER_ZERO)]
    NewOwnerZero,
    #[error("{}", ERR_ONLY_CURRENT_OWNER)]
    NotCurrentOwner,
    #[error("{}", ERR_ONLY_PENDING_OWNER)]
    NotPendingOwner,
    #[error("{}", ERR_INITIAL_OWNER_ZERO)]
    InitialOwnerZero,
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },
    #[error("missing argument: {name}")]
    MissingArgument { name: &'static str },
    #[error("unexpected argument: {name}")]
    UnexpectedArgument { name: String },
    #[error("invalid argument {name}: {violation}")]
    InvalidArgument {
        name: &'static str,
        violation: ContractViolation,
    },
    #[error("storage commit failed: {reason}")]
    StorageFailure { reason: String },
}

impl OracleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OracleError::NotCurrentOwner | OracleError::NotPendingOwner => ErrorKind::Unauthorized,
            OracleError::NewOwnerZero
            | OracleError::InitialOwnerZero
            | OracleError::MissingArgument { .. }
            | OracleError::UnexpectedArgument { .. }
            | OracleError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            OracleError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            OracleError::StorageFailure { .. } => ErrorKind::Internal,
        }
    }
}
