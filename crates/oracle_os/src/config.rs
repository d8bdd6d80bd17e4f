#![forbid(unsafe_code)]

//! Deployment configuration.
//!
//! A deployment is described by a small TOML file:
//!
//! ```toml
//! initial_owner = "0x18986dd1cbceaa12be8d66da46a99146c6db79ff964a716ec556a8a9659be35"
//!
//! [contract]
//! ownership_protocol = "two_phase"   # or "single_step"
//! legacy_owner_event = "owner_update" # or "ownership_transferred"
//! measurement_schema = "v2"          # or "v1"
//! ```
//!
//! `address` and `owner` are accepted as aliases for `initial_owner`, since
//! the constructor argument was renamed between releases.

use std::path::Path;

use oracle_engines::ownership::OwnershipConfig;
use oracle_kernel_contracts::{Felt, LegacyOwnerEvent, MeasurementSchema, OwnershipProtocol};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default)]
    pub ownership_protocol: OwnershipProtocol,
    #[serde(default)]
    pub legacy_owner_event: LegacyOwnerEvent,
    #[serde(default)]
    pub measurement_schema: MeasurementSchema,
}

impl ContractConfig {
    /// Current surface: two-phase transfer, measurements with decimals.
    pub fn two_phase_v2() -> Self {
        Self {
            ownership_protocol: OwnershipProtocol::TwoPhase,
            legacy_owner_event: LegacyOwnerEvent::default(),
            measurement_schema: MeasurementSchema::V2,
        }
    }

    /// First released surface: `update_owner`, measurements without decimals.
    pub fn single_step_v1(legacy_owner_event: LegacyOwnerEvent) -> Self {
        Self {
            ownership_protocol: OwnershipProtocol::SingleStep,
            legacy_owner_event,
            measurement_schema: MeasurementSchema::V1,
        }
    }

    pub fn ownership(&self) -> OwnershipConfig {
        OwnershipConfig {
            protocol: self.ownership_protocol,
            legacy_event: self.legacy_owner_event,
        }
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self::two_phase_v2()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleDeployConfig {
    #[serde(alias = "address", alias = "owner")]
    pub initial_owner: Felt,
    #[serde(default)]
    pub contract: ContractConfig,
}

impl OracleDeployConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.initial_owner.is_zero() {
            return Err(ConfigError::Validation(
                "initial_owner must not be the zero address".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Validation(String),
}
