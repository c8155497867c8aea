//! Configuration module for siteship
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SITESHIP_*)
//! 3. Project config (./siteship.toml, or the file given with --config)
//! 4. User config (<config dir>/siteship/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, WarningSource, PROJECT_CONFIG_FILE};
pub use types::{Config, DeployConfig, OutputConfig, RewriteConfig, SiteConfig, Verbosity};
