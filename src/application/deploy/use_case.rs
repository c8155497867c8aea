//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. List assets under the content root
//! 2. Partition them into cache tiers
//! 3. Build the unit plan (cleanup first, tier units after)
//! 4. Dispatch ready units to the transfer collaborator, batch by batch
//! 5. Report per-unit outcomes
//!
//! All decisions live in domain services; this type only wires them to ports.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::domain::entities::{DeploymentPlan, DeploymentUnit, UnitId, UnitKind};
use crate::domain::ports::{
    AssetSource, DeployEvent, DeployEventSink, NoopEventSink, TransferCollaborator,
    TransferError, UnitReport,
};
use crate::domain::services::{AssetPartitioner, DeploymentOrchestrator, Sequencer};
use crate::domain::value_objects::CacheTier;
use crate::error::{SiteshipError, SiteshipResult};

use super::options::DeployOptions;
use super::result::{DeployReport, UnitResult};

/// Deploy use case - orchestrates the deployment flow
///
/// Parameterized by its ports so tests can swap in fakes.
pub struct DeployUseCase<AS, T>
where
    AS: AssetSource,
    T: TransferCollaborator,
{
    asset_source: AS,
    transfer: T,
    partitioner: AssetPartitioner,
    orchestrator: DeploymentOrchestrator,
}

impl<AS, T> DeployUseCase<AS, T>
where
    AS: AssetSource,
    T: TransferCollaborator,
{
    pub fn new(
        asset_source: AS,
        transfer: T,
        partitioner: AssetPartitioner,
        orchestrator: DeploymentOrchestrator,
    ) -> Self {
        Self {
            asset_source,
            transfer,
            partitioner,
            orchestrator,
        }
    }

    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    /// Build the plan for the assets currently under `content_root`.
    pub fn plan(&self, content_root: &Path) -> SiteshipResult<DeploymentPlan> {
        let assets = self.asset_source.list(content_root)?;
        let partition = self.partitioner.partition(&assets);
        self.orchestrator.plan(&partition)
    }

    /// Execute the deploy use case
    pub fn execute(&self, options: &DeployOptions) -> SiteshipResult<DeployReport> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    ///
    /// Configuration errors are returned before any unit is dispatched.
    /// Unit failures are captured in the report, never returned as `Err`.
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> SiteshipResult<DeployReport> {
        if let Some(destination) = self.transfer.local_root() {
            ensure_disjoint(&options.content_root, destination)?;
        }
        let plan = self.plan(&options.content_root)?;
        let asset_count = plan.cleanup().map(|u| u.selector().len()).unwrap_or(0);

        event_sink.on_event(DeployEvent::Started {
            content_root: options.content_root.clone(),
            destination: self.transfer.destination(),
            asset_count,
        });
        event_sink.on_event(DeployEvent::Planned {
            unit_count: plan.len(),
            long_cache_count: tier_size(&plan, CacheTier::LongCache),
            no_cache_count: tier_size(&plan, CacheTier::NoCache),
        });

        let mut sequencer = Sequencer::new(&plan);
        let mut finished: BTreeMap<UnitId, (UnitReport, Vec<String>)> = BTreeMap::new();

        loop {
            let batch = sequencer.ready();
            if batch.is_empty() {
                break;
            }

            for unit in &batch {
                sequencer.start(unit.id())?;
                event_sink.on_event(DeployEvent::UnitStarted {
                    unit: unit.id().to_string(),
                    asset_count: unit.selector().len(),
                    prune: unit.prune_enabled(),
                });
            }

            let transfer = &self.transfer;
            let sink: &dyn DeployEventSink = event_sink.as_ref();
            let content_root = options.content_root.as_path();
            let run = |unit: &DeploymentUnit| {
                run_unit(transfer, unit, content_root, options.dry_run, sink)
            };

            let results: Vec<_> = if options.parallel && batch.len() > 1 {
                batch.par_iter().map(|unit| (*unit, run(*unit))).collect()
            } else {
                batch.iter().map(|unit| (*unit, run(*unit))).collect()
            };

            for (unit, result) in results {
                match result {
                    Ok((report, invalidated)) => {
                        sequencer.succeed(unit.id())?;
                        event_sink.on_event(DeployEvent::UnitSucceeded {
                            unit: unit.id().to_string(),
                            uploaded: report.uploaded.len(),
                            unchanged: report.unchanged.len(),
                            deleted: report.deleted.len(),
                        });
                        finished.insert(unit.id().clone(), (report, invalidated));
                    }
                    Err(err) => {
                        sequencer.fail(unit.id(), err.to_string())?;
                        event_sink.on_event(DeployEvent::UnitFailed {
                            unit: unit.id().to_string(),
                            error: err.to_string(),
                        });
                    }
                }
            }
        }

        let mut units = Vec::with_capacity(plan.len());
        for (unit, status) in sequencer.statuses() {
            let mut result = UnitResult::from_status(unit.id(), unit.kind().to_string(), status);
            if let Some(reason) = result.reason.as_ref().filter(|_| result.status == "blocked") {
                event_sink.on_event(DeployEvent::UnitBlocked {
                    unit: unit.id().to_string(),
                    reason: reason.clone(),
                });
            }
            if let Some((report, invalidated)) = finished.remove(unit.id()) {
                result.report = Some(report);
                result.invalidated = invalidated;
            }
            units.push(result);
        }

        let report = DeployReport {
            asset_count,
            dry_run: options.dry_run,
            units,
            outcome: sequencer.outcome(),
        };

        event_sink.on_event(DeployEvent::Completed {
            succeeded: report.succeeded().len(),
            failed: report.failed().len(),
            blocked: report.blocked().len(),
            dry_run: options.dry_run,
        });

        Ok(report)
    }
}

/// Reject a local destination that contains, or sits inside, the content root.
fn ensure_disjoint(content_root: &Path, destination: &Path) -> SiteshipResult<()> {
    let source = resolve(content_root)?;
    let target = resolve(destination)?;
    if source.starts_with(&target) || target.starts_with(&source) {
        return Err(SiteshipError::DestinationOverlap {
            content_root: content_root.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonical form of `path`; the missing tail is appended to the nearest existing ancestor.
fn resolve(path: &Path) -> SiteshipResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut missing = Vec::new();
    let mut current = absolute.as_path();
    loop {
        if let Ok(canonical) = current.canonicalize() {
            return Ok(missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part)));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                current = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

fn tier_size(plan: &DeploymentPlan, tier: CacheTier) -> usize {
    plan.tier_units()
        .filter(|u| u.kind() == UnitKind::Tier(tier))
        .map(|u| u.selector().len())
        .sum()
}

/// Transfer one unit, then invalidate its paths.
///
/// An invalidation failure fails the unit.
fn run_unit<T: TransferCollaborator>(
    transfer: &T,
    unit: &DeploymentUnit,
    content_root: &Path,
    dry_run: bool,
    sink: &dyn DeployEventSink,
) -> Result<(UnitReport, Vec<String>), TransferError> {
    if dry_run {
        return Ok((UnitReport::default(), Vec::new()));
    }

    let report = transfer.execute(unit, content_root)?;

    if sink.wants_detailed_events() {
        for key in &report.uploaded {
            sink.on_event(DeployEvent::ObjectUploaded {
                unit: unit.id().to_string(),
                key: key.clone(),
            });
        }
        for key in &report.deleted {
            sink.on_event(DeployEvent::ObjectDeleted {
                unit: unit.id().to_string(),
                key: key.clone(),
            });
        }
    }

    let paths = unit.invalidation_paths().to_vec();
    if !paths.is_empty() {
        transfer.invalidate(&paths)?;
        sink.on_event(DeployEvent::InvalidationIssued {
            unit: unit.id().to_string(),
            paths: paths.clone(),
        });
    }

    Ok((report, paths))
}
