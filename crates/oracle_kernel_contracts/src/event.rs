#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{Felt, Identity, Measurement, MeasurementKey};

pub const EVENT_OWNERSHIP_TRANSFER_REQUESTED: &str = "OwnershipTransferRequested";
pub const EVENT_OWNERSHIP_TRANSFERRED: &str = "OwnershipTransferred";
pub const EVENT_OWNER_UPDATE: &str = "OwnerUpdate";
pub const EVENT_LEGACY_OWNERSHIP_TRANSFERRED: &str = "ownership_transferred";
pub const EVENT_MEASUREMENT_UPDATE: &str = "MeasurementUpdate";

/// Record of one committed state change, as indexers see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum DomainEvent {
    OwnershipTransferRequested {
        to: Identity,
    },
    OwnershipTransferred {
        frm: Identity,
        to: Identity,
    },
    OwnerUpdate {
        owner: Identity,
    },
    #[serde(rename = "ownership_transferred")]
    LegacyOwnershipTransferred {
        owner: Identity,
    },
    MeasurementUpdate {
        key: MeasurementKey,
        measurement: Measurement,
    },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::OwnershipTransferRequested { .. } => EVENT_OWNERSHIP_TRANSFER_REQUESTED,
            DomainEvent::OwnershipTransferred { .. } => EVENT_OWNERSHIP_TRANSFERRED,
            DomainEvent::OwnerUpdate { .. } => EVENT_OWNER_UPDATE,
            DomainEvent::LegacyOwnershipTransferred { .. } => EVENT_LEGACY_OWNERSHIP_TRANSFERRED,
            DomainEvent::MeasurementUpdate { .. } => EVENT_MEASUREMENT_UPDATE,
        }
    }

    /// Event payload flattened to felts in declaration order.
    pub fn data(&self) -> Vec<Felt> {
        match self {
            DomainEvent::OwnershipTransferRequested { to } => vec![to.as_felt()],
            DomainEvent::OwnershipTransferred { frm, to } => vec![frm.as_felt(), to.as_felt()],
            DomainEvent::OwnerUpdate { owner } | DomainEvent::LegacyOwnershipTransferred { owner } => {
                vec![owner.as_felt()]
            }
            DomainEvent::MeasurementUpdate { key, measurement } => {
                let mut out = vec![key.0];
                out.extend(measurement.to_felts());
                out
            }
        }
    }
}
