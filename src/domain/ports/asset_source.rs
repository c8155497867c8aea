//! Asset Source Port
//!
//! Enumerates the assets of one deployment run from a content root.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::SiteAsset;
use crate::error::SiteshipError;

/// Errors while enumerating assets.
#[derive(Debug, Error)]
pub enum AssetSourceError {
    #[error("content root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("failed to enumerate {path}: {message}")]
    Enumeration { path: PathBuf, message: String },
}

impl From<AssetSourceError> for SiteshipError {
    fn from(err: AssetSourceError) -> Self {
        match err {
            AssetSourceError::RootNotFound(path) => SiteshipError::ContentRootNotFound { path },
            AssetSourceError::Enumeration { path, message } => {
                SiteshipError::AssetListUnavailable { path, message }
            }
        }
    }
}

/// Source of site assets.
///
/// Implementations:
/// - `FsAssetSource` - walks a build output directory
/// - in-memory lists in tests
pub trait AssetSource {
    /// List every asset under `root`, paths relative to it, sorted.
    fn list(&self, root: &Path) -> Result<Vec<SiteAsset>, AssetSourceError>;
}

impl AssetSource for Vec<SiteAsset> {
    fn list(&self, _root: &Path) -> Result<Vec<SiteAsset>, AssetSourceError> {
        let mut assets = self.clone();
        assets.sort();
        Ok(assets)
    }
}
