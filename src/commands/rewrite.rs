//! `siteship rewrite`

use std::io::Read;

use anyhow::{bail, Context, Result};
use siteship::config::Config;
use siteship::domain::services::{EdgeEvent, RouteKind};
use siteship::ui::json::emit_event;
use siteship::ui::json::events::DataEvent;

pub fn cmd_rewrite(config: &Config, uris: Vec<String>, event: bool, json: bool) -> Result<()> {
    let rewriter = config.rewriter()?;

    if event {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read edge event from stdin")?;
        let event: EdgeEvent =
            serde_json::from_str(&input).context("stdin is not a valid edge event")?;
        println!("{}", serde_json::to_string(&rewriter.handle(event))?);
        return Ok(());
    }

    if uris.is_empty() {
        bail!("no URIs given (pass URIs as arguments or use --event)");
    }

    for uri in &uris {
        let rewritten = rewriter.rewrite(uri);
        if json {
            let route = match rewriter.classify(uri) {
                RouteKind::Resource => "resource",
                RouteKind::CleanRoute => "clean-route",
            };
            emit_event(&DataEvent::new(
                "rewrite",
                serde_json::json!({
                    "uri": uri,
                    "rewritten": rewritten,
                    "route": route,
                }),
            ))?;
        } else {
            println!("{}", rewritten);
        }
    }

    Ok(())
}
