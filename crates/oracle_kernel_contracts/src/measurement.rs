#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ContractViolation, Felt, SchemaVersion};

pub const MEASUREMENT_SCHEMA_V1: SchemaVersion = SchemaVersion(1);
pub const MEASUREMENT_SCHEMA_V2: SchemaVersion = SchemaVersion(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementKey(pub Felt);

impl From<u128> for MeasurementKey {
    fn from(v: u128) -> Self {
        Self(Felt::from(v))
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Record layout a deployment reads and writes.
///
/// V1 is `{value, timestamp}`; V2 adds `decimals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementSchema {
    V1,
    #[default]
    V2,
}

impl MeasurementSchema {
    pub fn version(self) -> SchemaVersion {
        match self {
            MeasurementSchema::V1 => MEASUREMENT_SCHEMA_V1,
            MeasurementSchema::V2 => MEASUREMENT_SCHEMA_V2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub value: u128,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl Measurement {
    pub fn v1(value: u128, timestamp: u64) -> Self {
        Self {
            value,
            timestamp,
            decimals: None,
        }
    }

    pub fn v2(value: u128, timestamp: u64, decimals: u8) -> Self {
        Self {
            value,
            timestamp,
            decimals: Some(decimals),
        }
    }

    /// The record an unset key resolves to.
    pub fn zero(schema: MeasurementSchema) -> Self {
        Self::v1(0, 0).conform_to(schema)
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.unwrap_or(0)
    }

    pub fn schema(&self) -> MeasurementSchema {
        if self.decimals.is_some() {
            MeasurementSchema::V2
        } else {
            MeasurementSchema::V1
        }
    }

    /// Reshape to `schema`: V1 drops `decimals`, V2 defaults it to zero.
    pub fn conform_to(self, schema: MeasurementSchema) -> Self {
        match schema {
            MeasurementSchema::V1 => Self::v1(self.value, self.timestamp),
            MeasurementSchema::V2 => Self::v2(self.value, self.timestamp, self.decimals()),
        }
    }

    pub fn to_felts(&self) -> Vec<Felt> {
        let mut out = vec![Felt::from(self.value), Felt::from(self.timestamp)];
        if let Some(d) = self.decimals {
            out.push(Felt::from(d));
        }
        out
    }

    /// Accepts either layout: two felts decode as V1, three as V2.
    pub fn from_felts(felts: &[Felt]) -> Result<Self, ContractViolation> {
        let value = match felts.first() {
            Some(f) => f.to_u128().ok_or(ContractViolation::OutOfRange {
                field: "measurement.value",
                bound: "2^128",
            })?,
            None => {
                return Err(ContractViolation::InvalidValue {
                    field: "measurement",
                    reason: "expected 2 or 3 fields",
                })
            }
        };
        let timestamp = match felts.get(1) {
            Some(f) => f.to_u64().ok_or(ContractViolation::OutOfRange {
                field: "measurement.timestamp",
                bound: "2^64",
            })?,
            None => {
                return Err(ContractViolation::InvalidValue {
                    field: "measurement",
                    reason: "expected 2 or 3 fields",
                })
            }
        };
        match felts.len() {
            2 => Ok(Self::v1(value, timestamp)),
            3 => {
                let decimals = felts[2].to_u8().ok_or(ContractViolation::OutOfRange {
                    field: "measurement.decimals",
                    bound: "2^8",
                })?;
                Ok(Self::v2(value, timestamp, decimals))
            }
            _ => Err(ContractViolation::InvalidValue {
                field: "measurement",
                reason: "expected 2 or 3 fields",
            }),
        }
    }
}
