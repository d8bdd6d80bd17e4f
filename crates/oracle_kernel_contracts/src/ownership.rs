#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::SchemaVersion;

pub const OWNERSHIP_SINGLE_STEP_VERSION: SchemaVersion = SchemaVersion(1);
pub const OWNERSHIP_TWO_PHASE_VERSION: SchemaVersion = SchemaVersion(2);

/// Which ownership transfer surface a deployment exposes. Exactly one is
/// active per contract instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipProtocol {
    /// `update_owner` hands control over in one call.
    SingleStep,
    /// `transfer_ownership` nominates, `accept_ownership` completes.
    #[default]
    TwoPhase,
}

impl OwnershipProtocol {
    pub fn version(self) -> SchemaVersion {
        match self {
            OwnershipProtocol::SingleStep => OWNERSHIP_SINGLE_STEP_VERSION,
            OwnershipProtocol::TwoPhase => OWNERSHIP_TWO_PHASE_VERSION,
        }
    }
}

/// Event shape emitted by `update_owner`; it changed between releases of the
/// single-step surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyOwnerEvent {
    #[default]
    OwnerUpdate,
    OwnershipTransferred,
}
