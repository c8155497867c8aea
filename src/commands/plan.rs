//! `siteship plan`

use std::path::PathBuf;

use anyhow::Result;
use siteship::config::Config;
use siteship::presentation::create_deploy_use_case;
use siteship::presentation::output::render_plan;
use siteship::ui::json::emit_event;
use siteship::ui::json::events::{CompleteEvent, DataEvent, StartEvent};

pub fn cmd_plan(
    config: &Config,
    content_root: Option<PathBuf>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let content_root = content_root.unwrap_or_else(|| config.site.content_root.clone());
    let use_case = create_deploy_use_case(config, &config.deploy.destination)?;
    let plan = use_case.plan(&content_root)?;

    if json {
        emit_event(&StartEvent::new("plan"))?;
        emit_event(&DataEvent::new(
            "plan",
            serde_json::json!({
                "content_root": content_root.display().to_string(),
                "units": plan.units(),
            }),
        ))?;
        emit_event(&CompleteEvent::success("plan"))?;
    } else {
        print!("{}", render_plan(&plan, verbose > 0));
    }

    Ok(())
}
