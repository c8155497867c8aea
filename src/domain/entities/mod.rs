//! Domain Entities
//!
//! - `SiteAsset` - A static file from the content root
//! - `DeploymentUnit` - One upload/prune operation with its selector and policy
//! - `DeploymentPlan` - The dependency-ordered set of units for one run

mod deployment_unit;
mod plan;
mod site_asset;

pub use deployment_unit::{AssetSelector, DeploymentUnit, SelectorRule, UnitId, UnitKind};
pub use plan::{DeploymentPlan, PlanError};
pub use site_asset::SiteAsset;
