//! The cleanup pass fails part-way; tier units must not run.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use siteship::application::{DeployOptions, DeployUseCase};
use siteship::config::Config;
use siteship::domain::entities::DeploymentUnit;
use siteship::domain::ports::{TransferCollaborator, TransferError, UnitReport};
use siteship::infrastructure::{FsAssetSource, LocalObjectStore};
use siteship::SiteshipError;
use tempfile::TempDir;

use crate::common::BLOG_SITE;

/// Local store whose cleanup pass is refused
struct RefusingCleanup {
    inner: LocalObjectStore,
    tier_ran: AtomicBool,
}

impl TransferCollaborator for RefusingCleanup {
    fn destination(&self) -> String {
        self.inner.destination()
    }

    fn execute(
        &self,
        unit: &DeploymentUnit,
        content_root: &Path,
    ) -> Result<UnitReport, TransferError> {
        if unit.is_cleanup() {
            return Err(TransferError::Unavailable("bucket throttled".to_string()));
        }
        self.tier_ran.store(true, Ordering::SeqCst);
        self.inner.execute(unit, content_root)
    }

    fn invalidate(&self, paths: &[String]) -> Result<(), TransferError> {
        self.inner.invalidate(paths)
    }
}

#[test]
fn cleanup_failure_stops_the_release() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("public");
    for (path, content) in BLOG_SITE {
        let full = site.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    let config = Config::default();
    let transfer = RefusingCleanup {
        inner: LocalObjectStore::new(dir.path().join("bucket")),
        tier_ran: AtomicBool::new(false),
    };
    let use_case = DeployUseCase::new(
        FsAssetSource::new(),
        transfer,
        config.partitioner().unwrap(),
        config.orchestrator().unwrap(),
    );

    let report = use_case.execute(&DeployOptions::new(&site)).unwrap();

    assert!(!use_case.transfer().tier_ran.load(Ordering::SeqCst));
    assert_eq!(report.blocked(), vec!["SiteLongCache", "SiteNoCache"]);
    assert!(!dir.path().join("bucket/app.js").exists());

    let err = report.into_result().unwrap_err();
    assert_eq!(err.code(), "cleanup_failure");
    assert!(matches!(err, SiteshipError::CleanupFailure { .. }));
    assert!(err.to_string().contains("bucket throttled"));
}
