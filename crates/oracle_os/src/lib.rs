#![forbid(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod facade;

pub use config::{ConfigError, ContractConfig, OracleDeployConfig};
pub use dispatch::{CallArgs, ContractCall, ContractView, Operation};
pub use facade::{ContractFacade, InvocationOutcome, InvocationReceipt, ViewResult};
