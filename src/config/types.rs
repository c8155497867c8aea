//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::{
    AssetPartitioner, DeploymentOrchestrator, EdgeRequestRewriter, ExtensionMatch,
    DEFAULT_DEPLOYMENT_ID, DEFAULT_INDEX_DOCUMENT, DEFAULT_INVALIDATION_PATH,
};
use crate::domain::value_objects::{KeyPrefix, LongCacheExtensions};
use crate::error::SiteshipResult;

use super::loader::{self, ConfigWarning};

/// Build output to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,

    /// Gitignore-style patterns excluded from the asset list
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            exclude: Vec::new(),
        }
    }
}

fn default_content_root() -> PathBuf {
    PathBuf::from("public")
}

/// Deployment configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Prefix of every unit id
    #[serde(default = "default_deployment_id")]
    pub id: String,

    /// Root directory of the local object store
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Key prefix under the destination (empty for the root)
    #[serde(default)]
    pub key_prefix: String,

    #[serde(default = "default_long_cache_extensions")]
    pub long_cache_extensions: Vec<String>,

    #[serde(default = "default_invalidation_paths")]
    pub invalidation_paths: Vec<String>,

    /// Run tier units concurrently once cleanup succeeds
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            id: default_deployment_id(),
            destination: default_destination(),
            key_prefix: String::new(),
            long_cache_extensions: default_long_cache_extensions(),
            invalidation_paths: default_invalidation_paths(),
            parallel: true,
        }
    }
}

fn default_deployment_id() -> String {
    DEFAULT_DEPLOYMENT_ID.to_string()
}

fn default_destination() -> PathBuf {
    PathBuf::from("dist")
}

fn default_long_cache_extensions() -> Vec<String> {
    vec!["js".to_string(), "css".to_string()]
}

fn default_invalidation_paths() -> Vec<String> {
    vec![DEFAULT_INVALIDATION_PATH.to_string()]
}

fn default_true() -> bool {
    true
}

/// Edge rewrite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    #[serde(default = "default_index_document")]
    pub index_document: String,

    #[serde(default)]
    pub extension_match: ExtensionMatch,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            index_document: default_index_document(),
            extension_match: ExtensionMatch::default(),
        }
    }
}

fn default_index_document() -> String {
    DEFAULT_INDEX_DOCUMENT.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub const ALL: [Self; 4] = [Self::Quiet, Self::Normal, Self::Verbose, Self::Debug];

    /// Numeric level as used by `-v` flags
    pub fn level(self) -> u8 {
        match self {
            Self::Quiet | Self::Normal => 0,
            Self::Verbose => 1,
            Self::Debug => 2,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SiteshipResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SiteshipResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, project config, user config, or defaults
    pub fn load_layered(
        project_root: &Path,
        explicit: Option<&Path>,
    ) -> SiteshipResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(project_root, explicit)
    }

    /// Apply environment variable overrides (SITESHIP_* prefix).
    ///
    /// Unrecognized enum values are skipped and reported as warnings.
    pub fn with_env_overrides(self) -> (Self, Vec<ConfigWarning>) {
        loader::with_env_overrides(self)
    }

    pub fn long_cache_extensions(&self) -> SiteshipResult<LongCacheExtensions> {
        LongCacheExtensions::new(&self.deploy.long_cache_extensions)
    }

    pub fn key_prefix(&self) -> SiteshipResult<KeyPrefix> {
        KeyPrefix::parse(&self.deploy.key_prefix)
    }

    pub fn partitioner(&self) -> SiteshipResult<AssetPartitioner> {
        Ok(AssetPartitioner::new(self.long_cache_extensions()?))
    }

    pub fn orchestrator(&self) -> SiteshipResult<DeploymentOrchestrator> {
        Ok(DeploymentOrchestrator::new(&self.deploy.id)?
            .with_key_prefix(self.key_prefix()?)
            .with_invalidation_paths(self.deploy.invalidation_paths.clone()))
    }

    pub fn rewriter(&self) -> SiteshipResult<EdgeRequestRewriter> {
        Ok(EdgeRequestRewriter::new()
            .with_index_document(&self.rewrite.index_document)?
            .with_extension_match(self.rewrite.extension_match))
    }
}
