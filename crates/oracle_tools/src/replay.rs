#![forbid(unsafe_code)]

//! Replays a JSON script of named invocations against a freshly deployed
//! contract and reports each step's outcome.
//!
//! Script shape:
//!
//! ```json
//! {"steps": [
//!   {"caller": "0x1", "operation": "transfer_ownership", "args": {"new_owner": "0x2"}},
//!   {"caller": "0x2", "operation": "accept_ownership"},
//!   {"operation": "view_owner"}
//! ]}
//! ```

use oracle_kernel_contracts::Felt;
use oracle_os::{
    CallArgs, ContractFacade, InvocationOutcome, InvocationReceipt, OracleDeployConfig, ViewResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayStep {
    #[serde(default)]
    pub caller: Felt,
    pub operation: String,
    #[serde(default)]
    pub args: CallArgs,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayScript {
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResult {
    View { result: ViewResult },
    Committed { receipt: InvocationReceipt },
    Rejected { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStepReport {
    pub step: usize,
    pub operation: String,
    #[serde(flatten)]
    pub result: StepResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStepReport>,
    pub final_owner: Felt,
    pub final_state_digest: String,
    pub committed_events: usize,
}

pub fn parse_script(json: &str) -> Result<ReplayScript, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid replay script: {e}"))
}

/// Rejected steps are reported and the replay carries on, the same way a
/// ledger keeps accepting transactions after one reverts.
pub fn run_script(facade: &mut ContractFacade, script: &ReplayScript) -> ReplayReport {
    let mut steps = Vec::with_capacity(script.steps.len());
    for (i, step) in script.steps.iter().enumerate() {
        let result = match facade.execute_named(step.caller, &step.operation, &step.args) {
            Ok(InvocationOutcome::View(result)) => StepResult::View { result },
            Ok(InvocationOutcome::Committed(receipt)) => StepResult::Committed { receipt },
            Err(e) => StepResult::Rejected {
                error: e.to_string(),
            },
        };
        debug!(step = i, operation = %step.operation, "replay step done");
        steps.push(ReplayStepReport {
            step: i,
            operation: step.operation.clone(),
            result,
        });
    }
    ReplayReport {
        steps,
        final_owner: facade.view_owner().as_felt(),
        final_state_digest: facade.state().digest().to_string(),
        committed_events: facade.committed_events().len(),
    }
}

pub fn replay(config: &OracleDeployConfig, script_json: &str) -> Result<ReplayReport, String> {
    let script = parse_script(script_json)?;
    let mut facade =
        ContractFacade::from_deploy_config(config).map_err(|e| format!("deploy failed: {e}"))?;
    Ok(run_script(&mut facade, &script))
}
