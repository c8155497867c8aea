//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::PathBuf;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Build output directory whose files are published
    pub content_root: PathBuf,
    /// Plan and sequence without calling the transfer collaborator
    pub dry_run: bool,
    /// Run units of one ready batch concurrently
    pub parallel: bool,
}

impl DeployOptions {
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            dry_run: false,
            parallel: true,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
