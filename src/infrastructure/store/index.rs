//! Object index persisted next to the published objects.
//!
//! Records content hash and Cache-Control header per object key, plus a log
//! of issued invalidations. Stored as `.siteship/objects.toml` in TOML.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::TransferError;

/// Current on-disk format version
pub const INDEX_VERSION: u32 = 1;

/// Invalidation log entries kept in the index
const MAX_INVALIDATIONS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidationRecord {
    pub paths: Vec<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectIndex {
    pub version: u32,
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectEntry>,
    #[serde(default)]
    pub invalidations: Vec<InvalidationRecord>,
}

impl Default for ObjectIndex {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            objects: BTreeMap::new(),
            invalidations: Vec::new(),
        }
    }
}

impl ObjectIndex {
    /// Load the index, or an empty one if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, TransferError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| TransferError::Io {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
        let index: ObjectIndex = toml::from_str(&content)
            .map_err(|e| TransferError::CorruptedIndex(format!("{}: {}", path.display(), e)))?;

        if index.version != INDEX_VERSION {
            return Err(TransferError::CorruptedIndex(format!(
                "{}: unsupported version {} (expected {})",
                path.display(),
                index.version,
                INDEX_VERSION
            )));
        }

        Ok(index)
    }

    pub fn save(&self, path: &Path) -> Result<(), TransferError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TransferError::CorruptedIndex(e.to_string()))?;
        write_atomic(path, content.as_bytes())
    }

    pub fn record_invalidation(&mut self, paths: &[String], at: DateTime<Utc>) {
        self.invalidations.push(InvalidationRecord {
            paths: paths.to_vec(),
            at,
        });
        if self.invalidations.len() > MAX_INVALIDATIONS {
            let overflow = self.invalidations.len() - MAX_INVALIDATIONS;
            self.invalidations.drain(..overflow);
        }
    }
}

/// Write bytes via a temp file in the same directory, then rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), TransferError> {
    let io_err = |e: std::io::Error| TransferError::Io {
        key: path.display().to_string(),
        message: e.to_string(),
    };

    let parent = path.parent().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);
    fs::create_dir_all(&parent).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
