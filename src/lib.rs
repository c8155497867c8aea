//! Siteship - static site publisher
//!
//! Splits a build output directory into cache tiers, plans an ordered set of
//! deployment units (a pruning full upload first, then one upload per tier
//! with its Cache-Control header), runs them against an object store, and
//! resolves clean URLs at the edge.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod ui;

// Re-exports for convenience
pub use application::{DeployOptions, DeployReport, DeployUseCase};
pub use config::Config;
pub use domain::entities::{DeploymentPlan, DeploymentUnit, SiteAsset};
pub use domain::services::{rewrite_uri, EdgeRequestRewriter};
pub use domain::value_objects::{CacheTier, LongCacheExtensions};
pub use error::{SiteshipError, SiteshipResult};
