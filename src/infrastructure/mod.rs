//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `repositories/` - Asset source over the build output directory
//! - `store/` - Local object store with content index and invalidation log
//! - `events/` - Deploy event sinks (NDJSON, console)

pub mod events;
pub mod repositories;
pub mod store;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use repositories::FsAssetSource;
pub use store::LocalObjectStore;
