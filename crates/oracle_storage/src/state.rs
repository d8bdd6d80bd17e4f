#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use oracle_kernel_contracts::{Identity, Measurement, MeasurementKey};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

const STATE_DIGEST_DOMAIN: &[u8] = b"oracle.contract_state.v1";

/// The whole mutable contract state. One invocation works on a clone of it
/// and the clone replaces the committed copy only on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractState {
    owner: Identity,
    pending_owner: Option<Identity>,
    measurements: BTreeMap<MeasurementKey, Measurement>,
}

impl ContractState {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            pending_owner: None,
            measurements: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn pending_owner(&self) -> Option<Identity> {
        self.pending_owner
    }

    pub fn measurement(&self, key: &MeasurementKey) -> Option<&Measurement> {
        self.measurements.get(key)
    }

    pub fn measurements(&self) -> &BTreeMap<MeasurementKey, Measurement> {
        &self.measurements
    }

    pub(crate) fn set_owner(&mut self, owner: Identity) {
        self.owner = owner;
    }

    pub(crate) fn set_pending_owner(&mut self, pending: Option<Identity>) {
        self.pending_owner = pending;
    }

    pub(crate) fn put_measurement(&mut self, key: MeasurementKey, measurement: Measurement) {
        self.measurements.insert(key, measurement);
    }

    /// SHA-256 over a canonical encoding: owner, pending flag and value, then
    /// every record in key order.
    pub fn digest(&self) -> StateDigest {
        let mut h = Sha256::new();
        h.update(STATE_DIGEST_DOMAIN);
        h.update(self.owner.as_felt().to_be_bytes());
        match self.pending_owner {
            Some(p) => {
                h.update([1u8]);
                h.update(p.as_felt().to_be_bytes());
            }
            None => h.update([0u8]),
        }
        h.update((self.measurements.len() as u64).to_be_bytes());
        for (key, m) in &self.measurements {
            h.update(key.0.to_be_bytes());
            h.update(m.value.to_be_bytes());
            h.update(m.timestamp.to_be_bytes());
            match m.decimals {
                Some(d) => h.update([1u8, d]),
                None => h.update([0u8]),
            }
        }
        StateDigest(h.finalize().into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateDigest(pub [u8; 32]);

impl fmt::Display for StateDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for StateDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
