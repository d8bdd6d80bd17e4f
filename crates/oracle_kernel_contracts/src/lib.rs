#![forbid(unsafe_code)]

pub mod common;
pub mod error;
pub mod event;
pub mod felt;
pub mod measurement;
pub mod ownership;

pub use common::{ContractViolation, SchemaVersion, Validate};
pub use error::{ErrorKind, OracleError};
pub use event::DomainEvent;
pub use felt::{Felt, Identity};
pub use measurement::{Measurement, MeasurementKey, MeasurementSchema};
pub use ownership::{LegacyOwnerEvent, OwnershipProtocol};
