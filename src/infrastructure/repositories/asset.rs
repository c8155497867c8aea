//! File System Asset Source
//!
//! Walks a build output directory and lists every regular file as a site
//! asset. Hidden files are included and `.gitignore` files are not honored:
//! the content root is published as-is, minus explicit exclude patterns.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;

use crate::domain::entities::SiteAsset;
use crate::domain::ports::{AssetSource, AssetSourceError};

/// Asset source backed by the local file system.
#[derive(Debug, Clone, Default)]
pub struct FsAssetSource {
    exclude: Vec<String>,
}

impl FsAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip files matching these gitignore-style patterns (relative to the root).
    pub fn with_excludes(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    fn build_matcher(&self, root: &Path) -> Result<Gitignore, AssetSourceError> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in &self.exclude {
            builder
                .add_line(None, pattern)
                .map_err(|e| AssetSourceError::Enumeration {
                    path: root.to_path_buf(),
                    message: format!("invalid exclude pattern '{}': {}", pattern, e),
                })?;
        }
        builder.build().map_err(|e| AssetSourceError::Enumeration {
            path: root.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Relative path with `/` separators.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

impl AssetSource for FsAssetSource {
    fn list(&self, root: &Path) -> Result<Vec<SiteAsset>, AssetSourceError> {
        if !root.is_dir() {
            return Err(AssetSourceError::RootNotFound(root.to_path_buf()));
        }

        let matcher = self.build_matcher(root)?;
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(true)
            .build();

        let mut assets = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| AssetSourceError::Enumeration {
                path: root.to_path_buf(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if matcher
                .matched_path_or_any_parents(entry.path(), false)
                .is_ignore()
            {
                continue;
            }
            if let Some(key) = relative_key(root, entry.path()) {
                assets.push(SiteAsset::new(key));
            }
        }

        assets.sort();
        Ok(assets)
    }
}
