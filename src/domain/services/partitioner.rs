//! Asset partitioning service
//!
//! Splits the asset set into one selector per cache tier. Classification is a
//! total function from asset to tier, so the resulting selectors are disjoint
//! and their union is the input set.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::{AssetSelector, SelectorRule, SiteAsset};
use crate::domain::value_objects::{CacheTier, LongCacheExtensions};

/// Result of partitioning: the full asset set plus one selector per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    all: BTreeSet<SiteAsset>,
    tiers: BTreeMap<CacheTier, AssetSelector>,
}

impl Partition {
    /// Selector for a tier. Every tier has one, possibly empty.
    pub fn selector(&self, tier: CacheTier) -> &AssetSelector {
        &self.tiers[&tier]
    }

    /// Tiers and their selectors in plan order.
    pub fn tiers(&self) -> impl Iterator<Item = (CacheTier, &AssetSelector)> {
        self.tiers.iter().map(|(tier, sel)| (*tier, sel))
    }

    pub fn all_assets(&self) -> &BTreeSet<SiteAsset> {
        &self.all
    }

    /// Selector over the whole, unpartitioned asset set.
    pub fn full_selector(&self) -> AssetSelector {
        AssetSelector::new(SelectorRule::All, self.all.clone())
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }
}

/// Classifies assets into cache tiers by extension.
#[derive(Debug, Clone, Default)]
pub struct AssetPartitioner {
    long_cache: LongCacheExtensions,
}

impl AssetPartitioner {
    pub fn new(long_cache: LongCacheExtensions) -> Self {
        Self { long_cache }
    }

    pub fn long_cache_extensions(&self) -> &LongCacheExtensions {
        &self.long_cache
    }

    pub fn is_long_cache(&self, asset: &SiteAsset) -> bool {
        self.tier_of(asset) == CacheTier::LongCache
    }

    pub fn tier_of(&self, asset: &SiteAsset) -> CacheTier {
        CacheTier::classify(asset.extension(), &self.long_cache)
    }

    fn rule_for(&self, tier: CacheTier) -> SelectorRule {
        match tier {
            CacheTier::LongCache => SelectorRule::Extensions(self.long_cache.clone()),
            CacheTier::NoCache => SelectorRule::ExcludingExtensions(self.long_cache.clone()),
        }
    }

    /// Partition the asset set. Duplicate paths collapse.
    pub fn partition<'a, I>(&self, assets: I) -> Partition
    where
        I: IntoIterator<Item = &'a SiteAsset>,
    {
        let mut buckets: BTreeMap<CacheTier, BTreeSet<SiteAsset>> = CacheTier::ALL
            .iter()
            .map(|tier| (*tier, BTreeSet::new()))
            .collect();
        let mut all = BTreeSet::new();

        for asset in assets {
            buckets
                .entry(self.tier_of(asset))
                .or_default()
                .insert(asset.clone());
            all.insert(asset.clone());
        }

        let tiers = buckets
            .into_iter()
            .map(|(tier, set)| (tier, AssetSelector::new(self.rule_for(tier), set)))
            .collect();

        Partition { all, tiers }
    }
}
