//! Error types for siteship
//!
//! Library code returns `SiteshipError`; the binary wraps it with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for siteship operations
pub type SiteshipResult<T> = Result<T, SiteshipError>;

/// Main error type for siteship operations
#[derive(Error, Debug)]
pub enum SiteshipError {
    /// Content root does not exist or is not a directory
    #[error("content root not found: {path}")]
    ContentRootNotFound { path: PathBuf },

    /// Asset list could not be enumerated
    #[error("asset list unavailable for {path}: {message}")]
    AssetListUnavailable { path: PathBuf, message: String },

    /// Long-cache allow-list entry is malformed
    #[error("invalid long-cache extension '{extension}': {reason}")]
    InvalidExtension { extension: String, reason: String },

    /// Destination key prefix is malformed
    #[error("invalid key prefix '{prefix}': {reason}")]
    InvalidKeyPrefix { prefix: String, reason: String },

    /// Deployment id is empty or contains whitespace
    #[error("invalid deployment id '{id}'")]
    InvalidDeploymentId { id: String },

    /// Index document name would break rewrite idempotence
    #[error("invalid index document '{name}': {reason}")]
    InvalidIndexDocument { name: String, reason: String },

    /// Destination directory and content root contain one another
    #[error("destination {destination} overlaps content root {content_root}")]
    DestinationOverlap {
        content_root: PathBuf,
        destination: PathBuf,
    },

    /// Units do not form a valid dependency graph
    #[error("invalid deployment plan: {0}")]
    Plan(#[from] crate::domain::entities::PlanError),

    /// A unit was driven through an illegal status transition
    #[error("sequencing error: {0}")]
    Sequence(#[from] crate::domain::services::SequenceError),

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Cleanup unit failed; no tier unit was dispatched
    #[error("cleanup unit '{unit}' failed: {message}")]
    CleanupFailure { unit: String, message: String },

    /// At least one tier unit failed after a successful cleanup
    #[error("partial deployment failure: failed [{}], succeeded [{}]", .failed.join(", "), .succeeded.join(", "))]
    PartialDeploymentFailure {
        failed: Vec<String>,
        succeeded: Vec<String>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteshipError {
    /// Whether this error belongs to the configuration class (fatal before planning).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ContentRootNotFound { .. }
                | Self::AssetListUnavailable { .. }
                | Self::InvalidExtension { .. }
                | Self::InvalidKeyPrefix { .. }
                | Self::InvalidDeploymentId { .. }
                | Self::InvalidIndexDocument { .. }
                | Self::DestinationOverlap { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Stable machine-readable code used in JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContentRootNotFound { .. } | Self::AssetListUnavailable { .. } => {
                "asset_list_unavailable"
            }
            Self::InvalidExtension { .. }
            | Self::InvalidKeyPrefix { .. }
            | Self::InvalidDeploymentId { .. }
            | Self::InvalidIndexDocument { .. }
            | Self::DestinationOverlap { .. }
            | Self::InvalidConfig { .. } => "configuration_error",
            Self::Plan(_) | Self::Sequence(_) => "plan_error",
            Self::CleanupFailure { .. } => "cleanup_failure",
            Self::PartialDeploymentFailure { .. } => "partial_deployment_failure",
            Self::Io(_) => "io_error",
        }
    }
}
