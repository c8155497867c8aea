//! Property tests for plan shape and sequencing.

use proptest::prelude::*;

use siteship::domain::entities::SiteAsset;
use siteship::domain::services::{AssetPartitioner, DeploymentOrchestrator, Sequencer};
use siteship::domain::value_objects::KeyPrefix;
use siteship::LongCacheExtensions;

fn asset_paths() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,6}(/[a-z]{1,6}){0,2}\\.(js|css|html|png|txt)", 0..=16)
}

fn plan_for(paths: &[String], prefix: &str) -> siteship::DeploymentPlan {
    let assets: Vec<SiteAsset> = paths.iter().map(SiteAsset::new).collect();
    let partition = AssetPartitioner::new(LongCacheExtensions::new(["js", "css"]).unwrap())
        .partition(&assets);
    DeploymentOrchestrator::default()
        .with_key_prefix(KeyPrefix::parse(prefix).unwrap())
        .plan(&partition)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Cleanup comes first, covers every asset, and every tier unit depends on it.
    #[test]
    fn property_cleanup_precedes_tiers(paths in asset_paths(), prefix in "[a-z]{0,5}") {
        let plan = plan_for(&paths, &prefix);
        let cleanup = plan.cleanup().unwrap();

        prop_assert!(plan.units()[0].is_cleanup());
        prop_assert!(cleanup.prune_enabled());
        prop_assert!(cleanup.depends_on().is_none());
        for path in &paths {
            prop_assert!(cleanup.selector().contains(path));
        }
        for unit in plan.tier_units() {
            prop_assert_eq!(unit.depends_on(), Some(cleanup.id()));
            prop_assert!(!unit.prune_enabled());
            prop_assert!(unit.cache_control().is_some());
            prop_assert_eq!(unit.key_prefix(), cleanup.key_prefix());
        }
    }

    /// PROPERTY: The sequencer never releases a tier unit before cleanup succeeds.
    #[test]
    fn property_sequencer_releases_tiers_after_cleanup(paths in asset_paths()) {
        let plan = plan_for(&paths, "site");
        let mut sequencer = Sequencer::new(&plan);

        let first: Vec<_> = sequencer.ready().iter().map(|u| u.id().clone()).collect();
        prop_assert_eq!(first.len(), 1);
        prop_assert_eq!(&first[0], plan.cleanup().unwrap().id());

        sequencer.start(&first[0]).unwrap();
        prop_assert!(sequencer.ready().is_empty());
        sequencer.succeed(&first[0]).unwrap();

        let tiers = sequencer.ready();
        prop_assert_eq!(tiers.len(), plan.len() - 1);
        prop_assert!(tiers.iter().all(|u| !u.is_cleanup()));
    }

    /// PROPERTY: A failed cleanup leaves nothing runnable and the run finishes.
    #[test]
    fn property_failed_cleanup_blocks_everything(paths in asset_paths()) {
        let plan = plan_for(&paths, "");
        let mut sequencer = Sequencer::new(&plan);
        let cleanup = plan.cleanup().unwrap().id().clone();

        sequencer.start(&cleanup).unwrap();
        sequencer.fail(&cleanup, "boom").unwrap();

        prop_assert!(sequencer.ready().is_empty());
        prop_assert!(sequencer.is_finished());
        prop_assert!(!sequencer.outcome().is_success());
    }
}
