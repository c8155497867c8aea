//! Property tests for cache-tier partitioning.

use proptest::prelude::*;

use siteship::domain::entities::SiteAsset;
use siteship::domain::services::AssetPartitioner;
use siteship::{CacheTier, LongCacheExtensions};

fn asset_path() -> impl Strategy<Value = String> {
    proptest::string::string_regex("([a-z0-9_-]{1,6}/){0,3}\\.?[a-zA-Z0-9_-]{0,8}(\\.[a-zA-Z0-9]{0,4}){0,2}")
        .unwrap()
        .prop_filter("non-empty file name", |p| !p.ends_with('/') && !p.is_empty())
}

fn allow_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z0-9]{1,4}", 0..=4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Tier selectors are disjoint and together cover the asset set.
    #[test]
    fn property_partition_is_complete_and_disjoint(
        paths in proptest::collection::vec(asset_path(), 0..=24),
        extensions in allow_list(),
    ) {
        let assets: Vec<SiteAsset> = paths.iter().map(SiteAsset::new).collect();
        let partitioner = AssetPartitioner::new(LongCacheExtensions::new(&extensions).unwrap());
        let partition = partitioner.partition(&assets);

        let long = partition.selector(CacheTier::LongCache);
        let no = partition.selector(CacheTier::NoCache);

        for asset in &assets {
            prop_assert!(
                long.contains(asset.path()) != no.contains(asset.path()),
                "{} must be in exactly one tier",
                asset.path()
            );
        }
        prop_assert_eq!(long.len() + no.len(), partition.total());
        prop_assert_eq!(partition.full_selector().len(), partition.total());
    }

    /// PROPERTY: An asset is long-cache exactly when its extension is allow-listed.
    #[test]
    fn property_long_cache_iff_allow_listed(
        path in asset_path(),
        extensions in allow_list(),
    ) {
        let asset = SiteAsset::new(path);
        let allow = LongCacheExtensions::new(&extensions).unwrap();
        let partitioner = AssetPartitioner::new(allow);

        let listed = extensions.iter().any(|e| e == asset.extension());
        prop_assert_eq!(partitioner.is_long_cache(&asset), listed);
    }

    /// PROPERTY: An empty allow-list sends everything to the no-cache tier.
    #[test]
    fn property_empty_allow_list_is_all_no_cache(
        paths in proptest::collection::vec(asset_path(), 0..=16),
    ) {
        let assets: Vec<SiteAsset> = paths.iter().map(SiteAsset::new).collect();
        let partition = AssetPartitioner::new(LongCacheExtensions::empty()).partition(&assets);

        prop_assert!(partition.selector(CacheTier::LongCache).is_empty());
        prop_assert_eq!(partition.selector(CacheTier::NoCache).len(), partition.total());
    }
}
