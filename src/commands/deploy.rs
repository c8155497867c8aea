//! `siteship deploy`

use std::path::PathBuf;

use anyhow::Result;
use siteship::application::DeployOptions;
use siteship::config::Config;
use siteship::presentation::output::render_report;
use siteship::presentation::{create_deploy_use_case, create_event_sink};

pub struct DeployArgs {
    pub content_root: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub dry_run: bool,
    pub sequential: bool,
}

pub fn cmd_deploy(config: &Config, args: DeployArgs, json: bool, verbose: u8) -> Result<()> {
    let content_root = args
        .content_root
        .unwrap_or_else(|| config.site.content_root.clone());
    let destination = args
        .destination
        .unwrap_or_else(|| config.deploy.destination.clone());

    let use_case = create_deploy_use_case(config, &destination)?;
    let options = DeployOptions::new(content_root)
        .with_dry_run(args.dry_run)
        .with_parallel(config.deploy.parallel && !args.sequential);

    let report = use_case.execute_with_events(&options, create_event_sink(json, verbose))?;

    if !json && verbose > 0 {
        eprint!("{}", render_report(&report));
    }

    report.into_result()?;
    Ok(())
}
