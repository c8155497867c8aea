//! Deployment plan entity
//!
//! An explicit DAG of deployment units. Nodes are kept in emission order and
//! every dependency must point to a unit emitted earlier, so emission order is
//! always a valid topological order.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use super::{DeploymentUnit, UnitId};

/// Structural problems with a set of units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("duplicate unit id '{0}'")]
    DuplicateUnit(UnitId),

    #[error("unit '{unit}' depends on unknown unit '{dependency}'")]
    UnknownDependency { unit: UnitId, dependency: UnitId },

    #[error("unit '{unit}' depends on '{dependency}', which is emitted after it")]
    ForwardDependency { unit: UnitId, dependency: UnitId },
}

/// Ordered, dependency-annotated list of units for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentPlan {
    units: Vec<DeploymentUnit>,
}

impl DeploymentPlan {
    pub fn new(units: Vec<DeploymentUnit>) -> Result<Self, PlanError> {
        let mut seen: HashSet<&UnitId> = HashSet::new();
        let all: HashSet<&UnitId> = units.iter().map(DeploymentUnit::id).collect();

        for unit in &units {
            if let Some(dep) = unit.depends_on() {
                if !seen.contains(dep) {
                    return Err(if all.contains(dep) {
                        PlanError::ForwardDependency {
                            unit: unit.id().clone(),
                            dependency: dep.clone(),
                        }
                    } else {
                        PlanError::UnknownDependency {
                            unit: unit.id().clone(),
                            dependency: dep.clone(),
                        }
                    });
                }
            }
            if !seen.insert(unit.id()) {
                return Err(PlanError::DuplicateUnit(unit.id().clone()));
            }
        }

        Ok(Self { units })
    }

    pub fn units(&self) -> &[DeploymentUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, id: &UnitId) -> Option<&DeploymentUnit> {
        self.units.iter().find(|u| u.id() == id)
    }

    /// Units with no dependency.
    pub fn roots(&self) -> impl Iterator<Item = &DeploymentUnit> {
        self.units.iter().filter(|u| u.depends_on().is_none())
    }

    /// Units that depend directly on `id`.
    pub fn dependents<'a>(&'a self, id: &'a UnitId) -> impl Iterator<Item = &'a DeploymentUnit> {
        self.units
            .iter()
            .filter(move |u| u.depends_on() == Some(id))
    }

    /// Dependency edges as `(dependency, dependent)` pairs.
    pub fn edges(&self) -> Vec<(&UnitId, &UnitId)> {
        self.units
            .iter()
            .filter_map(|u| u.depends_on().map(|dep| (dep, u.id())))
            .collect()
    }

    pub fn cleanup(&self) -> Option<&DeploymentUnit> {
        self.units.iter().find(|u| u.is_cleanup())
    }

    pub fn tier_units(&self) -> impl Iterator<Item = &DeploymentUnit> {
        self.units.iter().filter(|u| !u.is_cleanup())
    }
}
