//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

/// Event emitted during deploy operations
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        content_root: PathBuf,
        destination: String,
        asset_count: usize,
    },

    /// Plan was built
    Planned {
        unit_count: usize,
        long_cache_count: usize,
        no_cache_count: usize,
    },

    /// A unit was dispatched to the transfer collaborator
    UnitStarted {
        unit: String,
        asset_count: usize,
        prune: bool,
    },

    /// Object was written
    ObjectUploaded { unit: String, key: String },

    /// Object was removed by prune
    ObjectDeleted { unit: String, key: String },

    /// Invalidation was issued after a unit completed
    InvalidationIssued { unit: String, paths: Vec<String> },

    /// Unit reached success
    UnitSucceeded {
        unit: String,
        uploaded: usize,
        unchanged: usize,
        deleted: usize,
    },

    /// Unit failed
    UnitFailed { unit: String, error: String },

    /// Unit was not attempted
    UnitBlocked { unit: String, reason: String },

    /// Deploy completed
    Completed {
        succeeded: usize,
        failed: usize,
        blocked: usize,
        dry_run: bool,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants detailed events (e.g., per-object)
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
