//! Site asset entity - a single static file slated for upload

use std::fmt;

use serde::Serialize;

/// A static file from the site's build output.
///
/// `path` is relative to the content root and always uses `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SiteAsset {
    path: String,
}

impl SiteAsset {
    /// Create a new asset. `path` must already use `/` separators; a `\`
    /// is an ordinary file name character.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path segment (file name).
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Substring after the last `.` of the final segment; empty if none.
    ///
    /// A leading dot counts (`.htaccess` has extension `htaccess`), a trailing
    /// dot yields an empty extension.
    pub fn extension(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) => &name[idx + 1..],
            None => "",
        }
    }
}

impl fmt::Display for SiteAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&str> for SiteAsset {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
