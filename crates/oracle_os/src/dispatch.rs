#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use oracle_engines::measurement::{OP_GET_MEASUREMENT, OP_SET_MEASUREMENT};
use oracle_engines::ownership::{
    OP_ACCEPT_OWNERSHIP, OP_TRANSFER_OWNERSHIP, OP_UPDATE_OWNER, OP_VIEW_OWNER,
};
use oracle_kernel_contracts::{ContractViolation, Felt, Measurement, MeasurementKey, OracleError};
use serde::{Deserialize, Serialize};

pub const ARG_NEW_OWNER: &str = "new_owner";
pub const ARG_KEY: &str = "key";
pub const ARG_VALUE: &str = "value";
pub const ARG_TIMESTAMP: &str = "timestamp";
pub const ARG_DECIMALS: &str = "decimals";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    View,
    Invoke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub kind: OperationKind,
    pub required_args: &'static [&'static str],
    pub optional_args: &'static [&'static str],
}

pub const OPERATION_TABLE: &[OperationSpec] = &[
    OperationSpec {
        name: OP_VIEW_OWNER,
        kind: OperationKind::View,
        required_args: &[],
        optional_args: &[],
    },
    OperationSpec {
        name: OP_TRANSFER_OWNERSHIP,
        kind: OperationKind::Invoke,
        required_args: &[ARG_NEW_OWNER],
        optional_args: &[],
    },
    OperationSpec {
        name: OP_ACCEPT_OWNERSHIP,
        kind: OperationKind::Invoke,
        required_args: &[],
        optional_args: &[],
    },
    OperationSpec {
        name: OP_UPDATE_OWNER,
        kind: OperationKind::Invoke,
        required_args: &[ARG_NEW_OWNER],
        optional_args: &[],
    },
    OperationSpec {
        name: OP_GET_MEASUREMENT,
        kind: OperationKind::View,
        required_args: &[ARG_KEY],
        optional_args: &[],
    },
    OperationSpec {
        name: OP_SET_MEASUREMENT,
        kind: OperationKind::Invoke,
        required_args: &[ARG_KEY, ARG_VALUE, ARG_TIMESTAMP],
        optional_args: &[ARG_DECIMALS],
    },
];

pub fn operation_spec(name: &str) -> Option<&'static OperationSpec> {
    OPERATION_TABLE.iter().find(|s| s.name == name)
}

/// Named call arguments as external callers send them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallArgs(BTreeMap<String, Felt>);

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Felt>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Felt>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<Felt> {
        self.0.get(name).copied()
    }

    fn require(&self, name: &'static str) -> Result<Felt, OracleError> {
        self.get(name).ok_or(OracleError::MissingArgument { name })
    }

    fn check_against(&self, spec: &OperationSpec) -> Result<(), OracleError> {
        for name in spec.required_args {
            self.require(*name)?;
        }
        let known = |k: &str| {
            spec.required_args
                .iter()
                .chain(spec.optional_args)
                .any(|a| *a == k)
        };
        if let Some(extra) = self.0.keys().find(|k| !known(k.as_str())) {
            return Err(OracleError::UnexpectedArgument {
                name: extra.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractView {
    ViewOwner,
    GetMeasurement { key: MeasurementKey },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCall {
    TransferOwnership {
        new_owner: Felt,
    },
    AcceptOwnership,
    UpdateOwner {
        new_owner: Felt,
    },
    SetMeasurement {
        key: MeasurementKey,
        measurement: Measurement,
    },
}

impl ContractView {
    pub fn name(&self) -> &'static str {
        match self {
            ContractView::ViewOwner => OP_VIEW_OWNER,
            ContractView::GetMeasurement { .. } => OP_GET_MEASUREMENT,
        }
    }
}

impl ContractCall {
    pub fn name(&self) -> &'static str {
        match self {
            ContractCall::TransferOwnership { .. } => OP_TRANSFER_OWNERSHIP,
            ContractCall::AcceptOwnership => OP_ACCEPT_OWNERSHIP,
            ContractCall::UpdateOwner { .. } => OP_UPDATE_OWNER,
            ContractCall::SetMeasurement { .. } => OP_SET_MEASUREMENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View(ContractView),
    Invoke(ContractCall),
}

impl Operation {
    /// Resolve a named call through the operation table. Argument shape is
    /// checked here; authorization and zero-address checks are left to the
    /// components so their messages stay the ones callers expect.
    pub fn from_named(name: &str, args: &CallArgs) -> Result<Self, OracleError> {
        let spec = operation_spec(name).ok_or_else(|| OracleError::UnsupportedOperation {
            operation: name.to_string(),
        })?;
        args.check_against(spec)?;
        let unsupported = || OracleError::UnsupportedOperation {
            operation: name.to_string(),
        };

        let op = match spec.kind {
            OperationKind::View => Operation::View(match spec.name {
                OP_GET_MEASUREMENT => ContractView::GetMeasurement {
                    key: MeasurementKey(args.require(ARG_KEY)?),
                },
                OP_VIEW_OWNER => ContractView::ViewOwner,
                _ => return Err(unsupported()),
            }),
            OperationKind::Invoke => Operation::Invoke(match spec.name {
                OP_TRANSFER_OWNERSHIP => ContractCall::TransferOwnership {
                    new_owner: args.require(ARG_NEW_OWNER)?,
                },
                OP_UPDATE_OWNER => ContractCall::UpdateOwner {
                    new_owner: args.require(ARG_NEW_OWNER)?,
                },
                OP_SET_MEASUREMENT => ContractCall::SetMeasurement {
                    key: MeasurementKey(args.require(ARG_KEY)?),
                    measurement: measurement_from_args(args)?,
                },
                OP_ACCEPT_OWNERSHIP => ContractCall::AcceptOwnership,
                _ => return Err(unsupported()),
            }),
        };
        Ok(op)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::View(v) => v.name(),
            Operation::Invoke(c) => c.name(),
        }
    }
}

fn measurement_from_args(args: &CallArgs) -> Result<Measurement, OracleError> {
    let mut felts = vec![args.require(ARG_VALUE)?, args.require(ARG_TIMESTAMP)?];
    felts.extend(args.get(ARG_DECIMALS));
    Measurement::from_felts(&felts).map_err(|violation| OracleError::InvalidArgument {
        name: measurement_arg_for(&violation),
        violation,
    })
}

fn measurement_arg_for(violation: &ContractViolation) -> &'static str {
    let field = match violation {
        ContractViolation::InvalidValue { field, .. } | ContractViolation::OutOfRange { field, .. } => {
            *field
        }
    };
    match field {
        "measurement.timestamp" => ARG_TIMESTAMP,
        "measurement.decimals" => ARG_DECIMALS,
        _ => ARG_VALUE,
    }
}
