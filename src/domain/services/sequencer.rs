//! Run sequencing service
//!
//! Tracks the status of every unit in a plan during one run and decides
//! which units may start. A unit becomes ready only once its dependency has
//! succeeded; when a unit fails, everything downstream of it is blocked.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::entities::{DeploymentPlan, DeploymentUnit, UnitId};

/// Status of one unit within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    Pending,
    Running,
    Succeeded,
    Failed(String),
    /// Not attempted because a dependency did not succeed
    Blocked(String),
}

impl UnitStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UnitStatus::Succeeded | UnitStatus::Failed(_) | UnitStatus::Blocked(_)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitStatus::Pending => "pending",
            UnitStatus::Running => "running",
            UnitStatus::Succeeded => "succeeded",
            UnitStatus::Failed(_) => "failed",
            UnitStatus::Blocked(_) => "blocked",
        }
    }
}

/// Illegal status transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(UnitId),

    #[error("unit '{0}' is not ready to start")]
    NotReady(UnitId),

    #[error("unit '{0}' is not running")]
    NotRunning(UnitId),
}

/// Final classification of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every unit succeeded
    Succeeded,
    /// A root unit (the cleanup) failed; nothing downstream ran
    CleanupFailed { unit: UnitId, reason: String },
    /// Root succeeded, at least one dependent unit failed
    PartialFailure {
        failed: Vec<UnitId>,
        succeeded: Vec<UnitId>,
    },
    /// Some units never reached a terminal state
    Incomplete { pending: Vec<UnitId> },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }
}

/// Per-run status tracker over a plan.
#[derive(Debug)]
pub struct Sequencer<'p> {
    plan: &'p DeploymentPlan,
    statuses: BTreeMap<UnitId, UnitStatus>,
}

impl<'p> Sequencer<'p> {
    pub fn new(plan: &'p DeploymentPlan) -> Self {
        let statuses = plan
            .units()
            .iter()
            .map(|u| (u.id().clone(), UnitStatus::Pending))
            .collect();
        Self { plan, statuses }
    }

    pub fn plan(&self) -> &'p DeploymentPlan {
        self.plan
    }

    pub fn status(&self, id: &UnitId) -> Option<&UnitStatus> {
        self.statuses.get(id)
    }

    fn is_ready(&self, unit: &DeploymentUnit) -> bool {
        if self.statuses.get(unit.id()) != Some(&UnitStatus::Pending) {
            return false;
        }
        match unit.depends_on() {
            None => true,
            Some(dep) => self.statuses.get(dep) == Some(&UnitStatus::Succeeded),
        }
    }

    /// Pending units whose dependency has succeeded, in plan order.
    ///
    /// Units in one ready batch have no ordering constraint between them.
    pub fn ready(&self) -> Vec<&'p DeploymentUnit> {
        let plan = self.plan;
        plan.units()
            .iter()
            .filter(|u| self.is_ready(u))
            .collect()
    }

    pub fn start(&mut self, id: &UnitId) -> Result<(), SequenceError> {
        let unit = self
            .plan
            .get(id)
            .ok_or_else(|| SequenceError::UnknownUnit(id.clone()))?;
        if !self.is_ready(unit) {
            return Err(SequenceError::NotReady(id.clone()));
        }
        self.statuses.insert(id.clone(), UnitStatus::Running);
        Ok(())
    }

    pub fn succeed(&mut self, id: &UnitId) -> Result<(), SequenceError> {
        self.finish(id, UnitStatus::Succeeded)
    }

    /// Mark a unit failed and block everything downstream of it.
    pub fn fail(&mut self, id: &UnitId, reason: impl Into<String>) -> Result<(), SequenceError> {
        self.finish(id, UnitStatus::Failed(reason.into()))?;
        self.block_dependents(id);
        Ok(())
    }

    fn finish(&mut self, id: &UnitId, status: UnitStatus) -> Result<(), SequenceError> {
        match self.statuses.get_mut(id) {
            None => Err(SequenceError::UnknownUnit(id.clone())),
            Some(current) if *current != UnitStatus::Running => {
                Err(SequenceError::NotRunning(id.clone()))
            }
            Some(current) => {
                *current = status;
                Ok(())
            }
        }
    }

    fn block_dependents(&mut self, failed: &UnitId) {
        let plan = self.plan;
        let mut frontier = vec![failed.clone()];
        while let Some(id) = frontier.pop() {
            for dependent in plan.dependents(&id) {
                if let Some(status) = self.statuses.get_mut(dependent.id()) {
                    if *status == UnitStatus::Pending {
                        *status = UnitStatus::Blocked(format!("dependency '{}' failed", id));
                        frontier.push(dependent.id().clone());
                    }
                }
            }
        }
    }

    /// True when no unit is pending or running.
    pub fn is_finished(&self) -> bool {
        self.statuses.values().all(UnitStatus::is_terminal)
    }

    /// Units and statuses in plan order.
    pub fn statuses(&self) -> Vec<(&'p DeploymentUnit, &UnitStatus)> {
        let plan = self.plan;
        plan.units()
            .iter()
            .filter_map(|u| self.statuses.get(u.id()).map(|s| (u, s)))
            .collect()
    }

    pub fn outcome(&self) -> RunOutcome {
        let in_plan_order = self.statuses();

        for (unit, status) in &in_plan_order {
            if let UnitStatus::Failed(reason) = status {
                if unit.depends_on().is_none() {
                    return RunOutcome::CleanupFailed {
                        unit: unit.id().clone(),
                        reason: reason.clone(),
                    };
                }
            }
        }

        let failed: Vec<UnitId> = in_plan_order
            .iter()
            .filter(|(_, s)| matches!(s, UnitStatus::Failed(_)))
            .map(|(u, _)| u.id().clone())
            .collect();
        if !failed.is_empty() {
            let succeeded = in_plan_order
                .iter()
                .filter(|(_, s)| matches!(s, UnitStatus::Succeeded))
                .map(|(u, _)| u.id().clone())
                .collect();
            return RunOutcome::PartialFailure { failed, succeeded };
        }

        let pending: Vec<UnitId> = in_plan_order
            .iter()
            .filter(|(_, s)| !s.is_terminal())
            .map(|(u, _)| u.id().clone())
            .collect();
        if !pending.is_empty() {
            return RunOutcome::Incomplete { pending };
        }

        RunOutcome::Succeeded
    }
}
