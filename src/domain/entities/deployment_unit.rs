//! Deployment unit entity
//!
//! One upload (and optionally prune) operation scoped to a selector and a
//! cache policy. Units are built once per run and never mutated.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use super::SiteAsset;
use crate::domain::value_objects::{CacheControl, CacheTier, KeyPrefix, LongCacheExtensions};

/// Rule an [`AssetSelector`] was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorRule {
    /// Every asset in the content root
    All,
    /// Assets whose extension is in the list
    Extensions(LongCacheExtensions),
    /// Assets whose extension is not in the list
    ExcludingExtensions(LongCacheExtensions),
}

impl SelectorRule {
    /// Glob-like description used in plan output.
    pub fn describe(&self) -> String {
        match self {
            SelectorRule::All => "**".to_string(),
            SelectorRule::Extensions(exts) if exts.is_empty() => "(none)".to_string(),
            SelectorRule::Extensions(exts) => format!("**/{}", exts.glob()),
            SelectorRule::ExcludingExtensions(exts) if exts.is_empty() => "**".to_string(),
            SelectorRule::ExcludingExtensions(exts) => format!("!**/{}", exts.glob()),
        }
    }
}

impl Serialize for SelectorRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.describe())
    }
}

/// Concrete set of assets a unit operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSelector {
    rule: SelectorRule,
    assets: BTreeSet<SiteAsset>,
}

impl AssetSelector {
    pub fn new(rule: SelectorRule, assets: BTreeSet<SiteAsset>) -> Self {
        Self { rule, assets }
    }

    pub fn rule(&self) -> &SelectorRule {
        &self.rule
    }

    pub fn assets(&self) -> &BTreeSet<SiteAsset> {
        &self.assets
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(SiteAsset::path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.assets.contains(&SiteAsset::new(path))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Identifier of a unit within a plan, e.g. `SiteCleanup`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a unit is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Full upload with prune; removes objects left over from earlier releases
    Cleanup,
    /// Upload of one tier's assets with that tier's Cache-Control header
    Tier(CacheTier),
}

impl UnitKind {
    pub fn unit_suffix(self) -> &'static str {
        match self {
            UnitKind::Cleanup => "Cleanup",
            UnitKind::Tier(tier) => tier.unit_suffix(),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Cleanup => f.write_str("cleanup"),
            UnitKind::Tier(tier) => write!(f, "{}", tier),
        }
    }
}

impl Serialize for UnitKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single deployment unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentUnit {
    id: UnitId,
    kind: UnitKind,
    selector: AssetSelector,
    cache_control: Option<CacheControl>,
    prune: bool,
    depends_on: Option<UnitId>,
    key_prefix: KeyPrefix,
    invalidation_paths: Vec<String>,
}

impl DeploymentUnit {
    /// Cleanup unit: the entire asset set, prune enabled, no dependency.
    ///
    /// Carries no Cache-Control header; the tier units that follow set it.
    pub fn cleanup(
        deployment_id: &str,
        selector: AssetSelector,
        key_prefix: KeyPrefix,
        invalidation_paths: Vec<String>,
    ) -> Self {
        Self {
            id: UnitId::new(format!("{}{}", deployment_id, UnitKind::Cleanup.unit_suffix())),
            kind: UnitKind::Cleanup,
            selector,
            cache_control: None,
            prune: true,
            depends_on: None,
            key_prefix,
            invalidation_paths,
        }
    }

    /// Tier unit: one tier's selector, prune disabled, depends on `cleanup`.
    ///
    /// Prune stays off because a tier only sees a subset of the assets and
    /// would otherwise delete the other tier's objects.
    pub fn tier(
        deployment_id: &str,
        tier: CacheTier,
        selector: AssetSelector,
        cleanup: &DeploymentUnit,
    ) -> Self {
        let kind = UnitKind::Tier(tier);
        Self {
            id: UnitId::new(format!("{}{}", deployment_id, kind.unit_suffix())),
            kind,
            selector,
            cache_control: Some(tier.cache_control()),
            prune: false,
            depends_on: Some(cleanup.id.clone()),
            key_prefix: cleanup.key_prefix.clone(),
            invalidation_paths: cleanup.invalidation_paths.clone(),
        }
    }

    pub fn id(&self) -> &UnitId {
        &self.id
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn selector(&self) -> &AssetSelector {
        &self.selector
    }

    pub fn cache_control(&self) -> Option<&CacheControl> {
        self.cache_control.as_ref()
    }

    pub fn prune_enabled(&self) -> bool {
        self.prune
    }

    pub fn depends_on(&self) -> Option<&UnitId> {
        self.depends_on.as_ref()
    }

    pub fn key_prefix(&self) -> &KeyPrefix {
        &self.key_prefix
    }

    pub fn invalidation_paths(&self) -> &[String] {
        &self.invalidation_paths
    }

    pub fn is_cleanup(&self) -> bool {
        self.kind == UnitKind::Cleanup
    }
}
