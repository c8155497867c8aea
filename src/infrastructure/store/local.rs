//! Local Object Store
//!
//! Implements the TransferCollaborator port on a plain directory: object keys
//! map to file paths under the store root, and per-object metadata lives in
//! the object index. Useful for staging a release, for previews served by a
//! static file server, and for tests.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use ignore::WalkBuilder;
use tempfile::NamedTempFile;

use crate::domain::entities::DeploymentUnit;
use crate::domain::ports::{TransferCollaborator, TransferError, UnitReport};
use crate::domain::value_objects::{ContentHash, KeyPrefix};

use super::index::{ObjectEntry, ObjectIndex};

/// Directory holding store metadata, relative to the store root
pub const META_DIR: &str = ".siteship";

/// Directory-backed object store.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(META_DIR).join("objects.toml")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(META_DIR).join("lock")
    }

    pub fn object_path(&self, key: &str) -> PathBuf {
        key.split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// Load the current index (for inspection and tests).
    pub fn load_index(&self) -> Result<ObjectIndex, TransferError> {
        ObjectIndex::load(&self.index_path())
    }

    /// Run `f` with the store lock held and the index loaded; saves the index afterwards.
    fn with_locked_index<T>(
        &self,
        f: impl FnOnce(&mut ObjectIndex) -> Result<T, TransferError>,
    ) -> Result<T, TransferError> {
        let lock_path = self.lock_path();
        let unavailable = |e: std::io::Error| TransferError::Unavailable(e.to_string());
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let lock_file = fs::File::create(&lock_path).map_err(unavailable)?;
        FileExt::lock_exclusive(&lock_file).map_err(unavailable)?;

        let result = ObjectIndex::load(&self.index_path()).and_then(|mut index| {
            let value = f(&mut index)?;
            index.save(&self.index_path())?;
            Ok(value)
        });

        let unlocked = FileExt::unlock(&lock_file).map_err(unavailable);
        let value = result?;
        unlocked?;
        Ok(value)
    }

    /// Object keys currently on disk under `prefix`.
    fn list_keys(&self, prefix: &KeyPrefix) -> Result<BTreeSet<String>, TransferError> {
        let base = if prefix.is_root() {
            self.root.clone()
        } else {
            self.object_path(prefix.as_str())
        };
        let mut keys = BTreeSet::new();
        if !base.is_dir() {
            return Ok(keys);
        }

        let meta_dir = self.root.join(META_DIR);
        let walker = WalkBuilder::new(&base)
            .standard_filters(false)
            .filter_entry(move |entry| entry.path() != meta_dir)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| TransferError::Io {
                key: prefix.to_string(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                let key: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                keys.insert(key.join("/"));
            }
        }
        Ok(keys)
    }

    /// Upload the unit's assets in two phases.
    ///
    /// Every source is read and staged under the metadata directory first; no
    /// published object or index entry changes unless all of them staged.
    fn upload(
        &self,
        index: &mut ObjectIndex,
        unit: &DeploymentUnit,
        content_root: &Path,
        report: &mut UnitReport,
    ) -> Result<(), TransferError> {
        let cache_control = unit.cache_control().map(|cc| cc.as_str().to_string());
        let mut staged = Vec::new();

        for asset in unit.selector().assets() {
            let key = unit.key_prefix().object_key(asset.path());
            let source = content_root.join(asset.path());
            let bytes = fs::read(&source).map_err(|e| TransferError::Io {
                key: source.display().to_string(),
                message: e.to_string(),
            })?;
            let hash = ContentHash::from_bytes(&bytes);
            let target = self.object_path(&key);

            let existing = index.objects.get(&key);
            let same_content = existing.is_some_and(|e| hash.matches_str(&e.hash));
            // Units without a header keep whatever header the object already has.
            let same_header = cache_control.is_none()
                || existing.is_some_and(|e| e.cache_control == cache_control);

            if same_content && same_header && target.is_file() {
                report.unchanged.push(key);
                continue;
            }

            let header = match &cache_control {
                Some(cc) => Some(cc.clone()),
                None if same_content => existing.and_then(|e| e.cache_control.clone()),
                None => None,
            };
            staged.push(StagedObject {
                file: self.stage(&key, &bytes)?,
                target,
                entry: ObjectEntry {
                    hash: hash.to_string(),
                    cache_control: header,
                },
                key,
            });
        }

        for object in staged {
            let (key, entry) = object.publish()?;
            index.objects.insert(key.clone(), entry);
            report.uploaded.push(key);
        }
        Ok(())
    }

    fn stage(&self, key: &str, bytes: &[u8]) -> Result<NamedTempFile, TransferError> {
        let io_err = |e: std::io::Error| TransferError::Io {
            key: key.to_string(),
            message: e.to_string(),
        };
        let mut file = NamedTempFile::new_in(self.root.join(META_DIR)).map_err(io_err)?;
        file.write_all(bytes).map_err(io_err)?;
        Ok(file)
    }

    fn prune(
        &self,
        index: &mut ObjectIndex,
        unit: &DeploymentUnit,
        report: &mut UnitReport,
    ) -> Result<(), TransferError> {
        let prefix = unit.key_prefix();
        let wanted: BTreeSet<String> = unit
            .selector()
            .paths()
            .map(|p| prefix.object_key(p))
            .collect();

        let mut candidates = self.list_keys(prefix)?;
        candidates.extend(
            index
                .objects
                .keys()
                .filter(|k| prefix.strip(k).is_some())
                .cloned(),
        );

        for key in candidates.difference(&wanted) {
            let path = self.object_path(key);
            if path.is_file() {
                fs::remove_file(&path).map_err(|e| TransferError::Io {
                    key: key.clone(),
                    message: e.to_string(),
                })?;
                remove_empty_parents(&path, &self.root);
            }
            index.objects.remove(key);
            report.deleted.push(key.clone());
        }
        Ok(())
    }
}

/// Object written to the staging area, waiting to replace its target.
struct StagedObject {
    key: String,
    target: PathBuf,
    file: NamedTempFile,
    entry: ObjectEntry,
}

impl StagedObject {
    fn publish(self) -> Result<(String, ObjectEntry), TransferError> {
        let key = self.key;
        let io_err = |e: std::io::Error| TransferError::Io {
            key: key.clone(),
            message: e.to_string(),
        };
        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        self.file.persist(&self.target).map_err(|e| io_err(e.error))?;
        Ok((key, self.entry))
    }
}

/// Remove now-empty directories between `path` and `root` (exclusive).
fn remove_empty_parents(path: &Path, root: &Path) {
    let mut current = path.parent();
    while let Some(dir) = current {
        if dir == root || fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}

impl TransferCollaborator for LocalObjectStore {
    fn destination(&self) -> String {
        self.root.display().to_string()
    }

    fn local_root(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn execute(
        &self,
        unit: &DeploymentUnit,
        content_root: &Path,
    ) -> Result<UnitReport, TransferError> {
        self.with_locked_index(|index| {
            let mut report = UnitReport::default();
            self.upload(index, unit, content_root, &mut report)?;
            if unit.prune_enabled() {
                self.prune(index, unit, &mut report)?;
            }
            Ok(report)
        })
    }

    fn invalidate(&self, paths: &[String]) -> Result<(), TransferError> {
        if paths.is_empty() {
            return Ok(());
        }
        self.with_locked_index(|index| {
            index.record_invalidation(paths, Utc::now());
            Ok(())
        })
    }
}
