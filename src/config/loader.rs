//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::services::ExtensionMatch;
use crate::error::{SiteshipError, SiteshipResult};

use super::types::{Config, Verbosity};

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "siteship.toml";

/// Suggestions further away than this many edits are dropped.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Where a configuration warning came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningSource {
    /// Unknown key in a config file
    File { path: PathBuf, line: Option<usize> },
    /// Unrecognized value in a `SITESHIP_*` variable; the override was skipped
    Env { value: String, expected: Vec<String> },
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Config key, or environment variable name
    pub key: String,
    pub source: WarningSource,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SiteshipResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| SiteshipError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_with_warnings(&content, path)
}

/// Parse TOML content; `path` is only used for diagnostics.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> SiteshipResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SiteshipError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                source: WarningSource::File {
                    path: path.to_path_buf(),
                    line: find_line_number(content, &key),
                },
                suggestion: closest(&key, CONFIG_KEYS.iter().copied()),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the config file hierarchy and apply environment overrides.
///
/// An explicit path must exist. Otherwise `siteship.toml` in `project_root`
/// wins over the user config; with neither, defaults are used.
pub fn load_layered(
    project_root: &Path,
    explicit: Option<&Path>,
) -> SiteshipResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project_config = project_root.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                Some(project_config)
            } else {
                user_config_path().filter(|p| p.exists())
            }
        }
    };

    let (config, mut warnings) = match candidate {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };
    let (config, env_warnings) = with_env_overrides(config);
    warnings.extend(env_warnings);
    Ok((config, warnings))
}

/// User config location (`<config dir>/siteship/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("siteship").join("config.toml"))
}

/// Apply environment variable overrides (SITESHIP_* prefix)
pub fn with_env_overrides(config: Config) -> (Config, Vec<ConfigWarning>) {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> (Config, Vec<ConfigWarning>) {
    let mut warnings = Vec::new();

    if let Some(root) = get_env("SITESHIP_CONTENT_ROOT") {
        config.site.content_root = PathBuf::from(root);
    }

    if let Some(id) = get_env("SITESHIP_DEPLOYMENT_ID") {
        config.deploy.id = id;
    }

    if let Some(destination) = get_env("SITESHIP_DESTINATION") {
        config.deploy.destination = PathBuf::from(destination);
    }

    if let Some(prefix) = get_env("SITESHIP_KEY_PREFIX") {
        config.deploy.key_prefix = prefix;
    }

    // SITESHIP_LONG_CACHE_EXTENSIONS (comma-separated, may be empty)
    if let Some(extensions) = get_env("SITESHIP_LONG_CACHE_EXTENSIONS") {
        config.deploy.long_cache_extensions = extensions
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(val) = get_env("SITESHIP_PARALLEL") {
        config.deploy.parallel = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(name) = get_env("SITESHIP_INDEX_DOCUMENT") {
        config.rewrite.index_document = name;
    }

    if let Some(raw) = get_env("SITESHIP_EXTENSION_MATCH") {
        match parse_env_enum("SITESHIP_EXTENSION_MATCH", &raw, &ExtensionMatch::ALL) {
            Ok(mode) => config.rewrite.extension_match = mode,
            Err(warning) => warnings.push(warning),
        }
    }

    if let Some(raw) = get_env("SITESHIP_VERBOSITY") {
        match parse_env_enum("SITESHIP_VERBOSITY", &raw, &Verbosity::ALL) {
            Ok(level) => config.output.verbosity = level,
            Err(warning) => warnings.push(warning),
        }
    }

    (config, warnings)
}

/// Parse an enum-valued variable by the same names the config file accepts.
fn parse_env_enum<T>(var: &str, raw: &str, variants: &[T]) -> Result<T, ConfigWarning>
where
    T: Serialize + DeserializeOwned + Copy,
{
    let value = raw.trim().to_lowercase();
    if let Ok(parsed) = serde_json::from_value(serde_json::Value::String(value.clone())) {
        return Ok(parsed);
    }

    let expected: Vec<String> = variants
        .iter()
        .filter_map(|v| match serde_json::to_value(v) {
            Ok(serde_json::Value::String(name)) => Some(name),
            _ => None,
        })
        .collect();
    Err(ConfigWarning {
        key: var.to_string(),
        suggestion: closest(&value, expected.iter().map(String::as_str)),
        source: WarningSource::Env {
            value: raw.to_string(),
            expected,
        },
    })
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

const CONFIG_KEYS: &[&str] = &[
    "site",
    "content_root",
    "exclude",
    "deploy",
    "id",
    "destination",
    "key_prefix",
    "long_cache_extensions",
    "invalidation_paths",
    "parallel",
    "rewrite",
    "index_document",
    "extension_match",
    "output",
    "verbosity",
];

/// Nearest candidate within a couple of edits; exact matches yield nothing.
fn closest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|c| (edit_distance(input, c), c))
        .filter(|(d, _)| (1..=MAX_SUGGESTION_DISTANCE).contains(d))
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c.to_string())
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
