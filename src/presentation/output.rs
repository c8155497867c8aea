//! Output Rendering
//!
//! Plain-text views of plans and deploy reports, plus config warnings.

use std::fmt::Write as _;
use std::path::Path;

use crate::application::DeployReport;
use crate::config::{ConfigWarning, WarningSource};
use crate::domain::entities::DeploymentPlan;

/// Render a plan as text. With `verbose`, every selected asset is listed.
pub fn render_plan(plan: &DeploymentPlan, verbose: bool) -> String {
    let mut out = String::new();
    let asset_count = plan.cleanup().map(|u| u.selector().len()).unwrap_or(0);
    let prefix = plan
        .cleanup()
        .map(|u| u.key_prefix().to_string())
        .unwrap_or_else(|| "/".to_string());

    let _ = writeln!(
        out,
        "Plan: {} units, {} assets, prefix {}",
        plan.len(),
        asset_count,
        prefix
    );

    for unit in plan.units() {
        let _ = write!(out, "\n{} [{}]", unit.id(), unit.kind());
        if unit.prune_enabled() {
            out.push_str(" prune");
        }
        if let Some(dep) = unit.depends_on() {
            let _ = write!(out, " after {}", dep);
        }
        out.push('\n');

        let _ = writeln!(
            out,
            "  selector: {} ({} assets)",
            unit.selector().rule().describe(),
            unit.selector().len()
        );
        let header = unit
            .cache_control()
            .map(|cc| cc.to_string())
            .unwrap_or_else(|| "(not set)".to_string());
        let _ = writeln!(out, "  cache-control: {}", header);
        if !unit.invalidation_paths().is_empty() {
            let _ = writeln!(out, "  invalidate: {}", unit.invalidation_paths().join(" "));
        }
        if verbose {
            for path in unit.selector().paths() {
                let _ = writeln!(out, "    {}", path);
            }
        }
    }

    out
}

/// One line per unit, in plan order.
pub fn render_report(report: &DeployReport) -> String {
    let mut out = String::new();
    for unit in &report.units {
        let _ = write!(out, "{:<8} {}", unit.status, unit.unit);
        if let Some(r) = &unit.report {
            let _ = write!(
                out,
                " ({} uploaded, {} unchanged, {} deleted)",
                r.uploaded.len(),
                r.unchanged.len(),
                r.deleted.len()
            );
        }
        if let Some(reason) = &unit.reason {
            let _ = write!(out, ": {}", reason);
        }
        out.push('\n');
    }
    out
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        match &w.source {
            WarningSource::File {
                path,
                line: Some(line),
            } => eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, path.display(), line),
            WarningSource::File { path, line: None } => {
                eprintln!("⚠ Unknown config key '{}' in {}", w.key, path.display())
            }
            WarningSource::Env { value, expected } => {
                eprintln!("⚠ Ignoring {}='{}'", w.key, value);
                eprintln!("   Expected one of: {}", expected.join(", "));
            }
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Config warning as a JSON value, for `--json` runs.
pub fn config_warning_json(w: &ConfigWarning) -> serde_json::Value {
    match &w.source {
        WarningSource::File { path, line } => serde_json::json!({
            "event": "warning",
            "kind": "unknown_config_key",
            "key": w.key,
            "file": display(path),
            "line": line,
            "suggestion": w.suggestion,
        }),
        WarningSource::Env { value, expected } => serde_json::json!({
            "event": "warning",
            "kind": "invalid_env_value",
            "key": w.key,
            "value": value,
            "expected": expected,
            "suggestion": w.suggestion,
        }),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
