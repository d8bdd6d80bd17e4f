#![forbid(unsafe_code)]

use oracle_kernel_contracts::{
    DomainEvent, Identity, Measurement, MeasurementKey, MeasurementSchema, OracleError,
};
use oracle_storage::repo::{MeasurementRepo, OwnershipRepo};
use tracing::debug;

use crate::access_guard::require_owner;

pub const OP_GET_MEASUREMENT: &str = "get_measurement";
pub const OP_SET_MEASUREMENT: &str = "set_measurement";

/// Owner-written key/value registry. Values are trusted as written; only the
/// record layout is normalized to the deployment's schema.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementRegistry {
    schema: MeasurementSchema,
}

impl MeasurementRegistry {
    pub fn new(schema: MeasurementSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> MeasurementSchema {
        self.schema
    }

    /// Never fails: unset keys read as the zero record.
    pub fn get_measurement<R: MeasurementRepo>(&self, repo: &R, key: MeasurementKey) -> Measurement {
        repo.measurement_row(&key)
            .map(|m| m.conform_to(self.schema))
            .unwrap_or_else(|| Measurement::zero(self.schema))
    }

    pub fn set_measurement<R: MeasurementRepo + OwnershipRepo>(
        &self,
        repo: &mut R,
        caller: Option<Identity>,
        key: MeasurementKey,
        measurement: Measurement,
    ) -> Result<Vec<DomainEvent>, OracleError> {
        require_owner(caller, repo.owner_row())?;

        let measurement = measurement.conform_to(self.schema);
        repo.upsert_measurement_row(key, measurement);
        debug!(%key, value = measurement.value, timestamp = measurement.timestamp, "measurement written");
        Ok(vec![DomainEvent::MeasurementUpdate { key, measurement }])
    }
}
