#![forbid(unsafe_code)]

pub mod repo;
pub mod state;
pub mod store;

pub use state::{ContractState, StateDigest};
pub use store::{CommitRecord, EventLedgerRow, OracleStore, StorageError};
