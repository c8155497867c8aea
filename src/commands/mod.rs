//! Command handlers for the siteship binary.

pub mod deploy;
pub mod plan;
pub mod rewrite;

use std::path::Path;

use anyhow::Result;
use siteship::config::Config;
use siteship::presentation::output::{config_warning_json, print_config_warnings};
use siteship::ui::json::write_event;

/// Resolve configuration for the current directory and surface warnings.
pub fn load_config(explicit: Option<&Path>, json: bool) -> Result<Config> {
    let (config, warnings) = Config::load_layered(Path::new("."), explicit)?;

    if json {
        let mut out = std::io::stdout().lock();
        for w in &warnings {
            write_event(&mut out, &config_warning_json(w))?;
        }
    } else {
        print_config_warnings(&warnings);
    }

    Ok(config)
}

/// Effective verbosity: `-v` flags win over the configured level.
pub fn verbosity(flag: u8, config: &Config) -> u8 {
    if flag > 0 {
        flag
    } else {
        config.output.verbosity.level()
    }
}
