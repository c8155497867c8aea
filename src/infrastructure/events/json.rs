//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Started {
                content_root,
                destination,
                asset_count,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": "deploy",
                    "content_root": content_root.display().to_string(),
                    "destination": destination,
                    "asset_count": asset_count,
                })
            }

            DeployEvent::Planned {
                unit_count,
                long_cache_count,
                no_cache_count,
            } => {
                serde_json::json!({
                    "event": "planned",
                    "command": "deploy",
                    "units": unit_count,
                    "long_cache": long_cache_count,
                    "no_cache": no_cache_count,
                })
            }

            DeployEvent::UnitStarted {
                unit,
                asset_count,
                prune,
            } => {
                serde_json::json!({
                    "event": "unit_start",
                    "command": "deploy",
                    "unit": unit,
                    "asset_count": asset_count,
                    "prune": prune,
                })
            }

            DeployEvent::ObjectUploaded { unit, key } => {
                serde_json::json!({
                    "event": "object_uploaded",
                    "command": "deploy",
                    "unit": unit,
                    "key": key,
                })
            }

            DeployEvent::ObjectDeleted { unit, key } => {
                serde_json::json!({
                    "event": "object_deleted",
                    "command": "deploy",
                    "unit": unit,
                    "key": key,
                })
            }

            DeployEvent::InvalidationIssued { unit, paths } => {
                serde_json::json!({
                    "event": "invalidation",
                    "command": "deploy",
                    "unit": unit,
                    "paths": paths,
                })
            }

            DeployEvent::UnitSucceeded {
                unit,
                uploaded,
                unchanged,
                deleted,
            } => {
                serde_json::json!({
                    "event": "unit_succeeded",
                    "command": "deploy",
                    "unit": unit,
                    "uploaded": uploaded,
                    "unchanged": unchanged,
                    "deleted": deleted,
                })
            }

            DeployEvent::UnitFailed { unit, error } => {
                serde_json::json!({
                    "event": "unit_failed",
                    "command": "deploy",
                    "unit": unit,
                    "error": error,
                })
            }

            DeployEvent::UnitBlocked { unit, reason } => {
                serde_json::json!({
                    "event": "unit_blocked",
                    "command": "deploy",
                    "unit": unit,
                    "reason": reason,
                })
            }

            DeployEvent::Completed {
                succeeded,
                failed,
                blocked,
                dry_run,
            } => {
                let status = if failed == 0 && blocked == 0 {
                    "success"
                } else if succeeded == 0 {
                    "failure"
                } else {
                    "partial"
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "deploy",
                    "status": status,
                    "succeeded": succeeded,
                    "failed": failed,
                    "blocked": blocked,
                    "dry_run": dry_run,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
