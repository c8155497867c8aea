//! Deploy Result
//!
//! Result types for deploy operations.

use serde::Serialize;

use crate::domain::entities::UnitId;
use crate::domain::ports::UnitReport;
use crate::domain::services::{RunOutcome, UnitStatus};
use crate::error::{SiteshipError, SiteshipResult};

/// What happened to one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitResult {
    pub unit: String,
    pub kind: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<UnitReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalidated: Vec<String>,
}

impl UnitResult {
    pub(crate) fn from_status(unit: &UnitId, kind: String, status: &UnitStatus) -> Self {
        let reason = match status {
            UnitStatus::Failed(r) | UnitStatus::Blocked(r) => Some(r.clone()),
            _ => None,
        };
        Self {
            unit: unit.to_string(),
            kind,
            status: status.label().to_string(),
            reason,
            report: None,
            invalidated: Vec::new(),
        }
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// Result of a deploy operation
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    /// Assets found under the content root
    pub asset_count: usize,
    pub dry_run: bool,
    /// One entry per unit, in plan order
    pub units: Vec<UnitResult>,
    #[serde(skip)]
    pub outcome: RunOutcome,
}

impl DeployReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    fn with_status(&self, label: &str) -> Vec<&str> {
        self.units
            .iter()
            .filter(|u| u.status == label)
            .map(|u| u.unit.as_str())
            .collect()
    }

    pub fn succeeded(&self) -> Vec<&str> {
        self.with_status("succeeded")
    }

    pub fn failed(&self) -> Vec<&str> {
        self.with_status("failed")
    }

    pub fn blocked(&self) -> Vec<&str> {
        self.with_status("blocked")
    }

    pub fn unit(&self, id: &str) -> Option<&UnitResult> {
        self.units.iter().find(|u| u.unit == id)
    }

    /// Map the run outcome onto the error taxonomy.
    pub fn into_result(self) -> SiteshipResult<Self> {
        match &self.outcome {
            RunOutcome::Succeeded => Ok(self),
            RunOutcome::CleanupFailed { unit, reason } => Err(SiteshipError::CleanupFailure {
                unit: unit.to_string(),
                message: reason.clone(),
            }),
            RunOutcome::PartialFailure { failed, succeeded } => {
                Err(SiteshipError::PartialDeploymentFailure {
                    failed: failed.iter().map(UnitId::to_string).collect(),
                    succeeded: succeeded.iter().map(UnitId::to_string).collect(),
                })
            }
            RunOutcome::Incomplete { pending } => Err(SiteshipError::PartialDeploymentFailure {
                failed: pending.iter().map(UnitId::to_string).collect(),
                succeeded: self.succeeded().into_iter().map(str::to_string).collect(),
            }),
        }
    }
}
