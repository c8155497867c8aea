//! Transfer Collaborator Port
//!
//! Executes deployment units against a destination object store and issues
//! cache invalidations. Retries, if any, live behind this trait; the
//! sequencing logic sees one result per unit.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::DeploymentUnit;

/// Error reported by a transfer collaborator for one unit.
#[derive(Debug, Clone, Error)]
pub enum TransferError {
    /// Reading a source asset or writing an object failed
    #[error("I/O error on '{key}': {message}")]
    Io { key: String, message: String },

    /// The destination refused the operation
    #[error("rejected: {0}")]
    Rejected(String),

    /// The destination is unreachable or locked
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Destination metadata is unreadable
    #[error("corrupted object index: {0}")]
    CorruptedIndex(String),
}

/// What a unit changed at the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    /// Object keys written
    pub uploaded: Vec<String>,
    /// Object keys already up to date
    pub unchanged: Vec<String>,
    /// Object keys removed by prune
    pub deleted: Vec<String>,
}

impl UnitReport {
    pub fn has_changes(&self) -> bool {
        !self.uploaded.is_empty() || !self.deleted.is_empty()
    }
}

/// Trait for transfer collaborators
///
/// Implementations must be safe to call concurrently for units with
/// disjoint selectors.
pub trait TransferCollaborator: Send + Sync {
    /// Display name of the destination
    fn destination(&self) -> String;

    /// Local directory backing the destination, when there is one.
    fn local_root(&self) -> Option<&Path> {
        None
    }

    /// Upload the unit's selected assets from `content_root`, applying its
    /// Cache-Control header, and prune if the unit asks for it.
    fn execute(&self, unit: &DeploymentUnit, content_root: &Path)
        -> Result<UnitReport, TransferError>;

    /// Invalidate cached copies of `paths` at the edge.
    fn invalidate(&self, paths: &[String]) -> Result<(), TransferError>;
}
