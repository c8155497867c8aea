//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::DeployUseCase;
use crate::config::Config;
use crate::domain::ports::DeployEventSink;
use crate::error::SiteshipResult;
use crate::infrastructure::{ConsoleEventSink, FsAssetSource, JsonEventSink, LocalObjectStore};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<FsAssetSource, LocalObjectStore>;

/// Create a deploy use case publishing into the local store at `destination`
///
/// Fails with a configuration error when the allow-list, key prefix or
/// deployment id in `config` is malformed.
pub fn create_deploy_use_case(
    config: &Config,
    destination: &Path,
) -> SiteshipResult<ConcreteDeployUseCase> {
    let asset_source = FsAssetSource::new().with_excludes(config.site.exclude.clone());
    let store = LocalObjectStore::new(destination);

    Ok(DeployUseCase::new(
        asset_source,
        store,
        config.partitioner()?,
        config.orchestrator()?,
    ))
}

/// Pick the event sink for the requested output mode
pub fn create_event_sink(json: bool, verbosity: u8) -> Arc<dyn DeployEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stderr(verbosity))
    }
}
