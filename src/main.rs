//! Siteship CLI - static site publisher
//!
//! Usage: siteship <COMMAND>
//!
//! Commands:
//!   plan     Print the deployment plan for the content root
//!   deploy   Upload the content root to the destination store
//!   rewrite  Resolve request URIs the way the edge function does

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use siteship::presentation::cli::{Cli, Commands};
use siteship::ui::json::emit_event;
use siteship::ui::json::events::ErrorEvent;
use siteship::SiteshipError;

use commands::deploy::DeployArgs;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref(), cli.json)?;
    let verbose = commands::verbosity(cli.verbose, &config);

    match cli.command {
        Commands::Plan { content_root } => {
            commands::plan::cmd_plan(&config, content_root, cli.json, verbose)
        }
        Commands::Deploy {
            content_root,
            destination,
            dry_run,
            sequential,
        } => commands::deploy::cmd_deploy(
            &config,
            DeployArgs {
                content_root,
                destination,
                dry_run,
                sequential,
            },
            cli.json,
            verbose,
        ),
        Commands::Rewrite { uris, event } => {
            commands::rewrite::cmd_rewrite(&config, uris, event, cli.json)
        }
    }
}

fn report_error(err: &anyhow::Error, json: bool) {
    if json {
        let event = match err.downcast_ref::<SiteshipError>() {
            Some(e) => ErrorEvent::from_error("siteship", e),
            None => ErrorEvent::new("siteship", "error", format!("{:#}", err)),
        };
        if emit_event(&event).is_ok() {
            return;
        }
    }
    eprintln!("Error: {:#}", err);
}
