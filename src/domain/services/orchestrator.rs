//! Deployment orchestration service
//!
//! Turns a partition into a two-level plan: one cleanup unit with prune over
//! the full asset set, then one unit per tier that depends on the cleanup.
//! No I/O happens here.

use crate::domain::entities::{DeploymentPlan, DeploymentUnit};
use crate::domain::value_objects::KeyPrefix;
use crate::error::{SiteshipError, SiteshipResult};

use super::Partition;

/// Default deployment id; units are named `SiteCleanup`, `SiteLongCache`, ...
pub const DEFAULT_DEPLOYMENT_ID: &str = "Site";

/// Default invalidation glob issued after each unit.
pub const DEFAULT_INVALIDATION_PATH: &str = "/*";

/// Builds deployment plans.
#[derive(Debug, Clone)]
pub struct DeploymentOrchestrator {
    deployment_id: String,
    key_prefix: KeyPrefix,
    invalidation_paths: Vec<String>,
}

impl Default for DeploymentOrchestrator {
    fn default() -> Self {
        Self {
            deployment_id: DEFAULT_DEPLOYMENT_ID.to_string(),
            key_prefix: KeyPrefix::root(),
            invalidation_paths: vec![DEFAULT_INVALIDATION_PATH.to_string()],
        }
    }
}

impl DeploymentOrchestrator {
    pub fn new(deployment_id: &str) -> SiteshipResult<Self> {
        if deployment_id.is_empty() || deployment_id.chars().any(char::is_whitespace) {
            return Err(SiteshipError::InvalidDeploymentId {
                id: deployment_id.to_string(),
            });
        }
        Ok(Self {
            deployment_id: deployment_id.to_string(),
            ..Self::default()
        })
    }

    pub fn with_key_prefix(mut self, key_prefix: KeyPrefix) -> Self {
        self.key_prefix = key_prefix;
        self
    }

    pub fn with_invalidation_paths(mut self, paths: Vec<String>) -> Self {
        self.invalidation_paths = paths;
        self
    }

    pub fn deployment_id(&self) -> &str {
        &self.deployment_id
    }

    /// Build the plan for one run.
    pub fn plan(&self, partition: &Partition) -> SiteshipResult<DeploymentPlan> {
        let cleanup = DeploymentUnit::cleanup(
            &self.deployment_id,
            partition.full_selector(),
            self.key_prefix.clone(),
            self.invalidation_paths.clone(),
        );

        let tier_units: Vec<DeploymentUnit> = partition
            .tiers()
            .map(|(tier, selector)| {
                DeploymentUnit::tier(&self.deployment_id, tier, selector.clone(), &cleanup)
            })
            .collect();

        let mut units = Vec::with_capacity(tier_units.len() + 1);
        units.push(cleanup);
        units.extend(tier_units);

        Ok(DeploymentPlan::new(units)?)
    }
}
