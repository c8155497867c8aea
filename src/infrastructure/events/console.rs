//! Console Event Sink
//!
//! Human-readable deploy progress on stderr. Per-object lines appear only
//! with `-v`.

use std::io::{self, Write};
use std::sync::Mutex;

use is_terminal::IsTerminal;

use crate::domain::ports::{DeployEvent, DeployEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    verbosity: u8,
    fancy: bool,
}

impl ConsoleEventSink {
    pub fn stderr(verbosity: u8) -> Self {
        let fancy = io::stderr().is_terminal();
        Self {
            writer: Mutex::new(Box::new(io::stderr())),
            verbosity,
            fancy,
        }
    }

    /// Plain-text sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbosity: u8) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbosity,
            fancy: false,
        }
    }

    fn marker(&self, ok: bool) -> &'static str {
        match (self.fancy, ok) {
            (true, true) => "✓",
            (true, false) => "✗",
            (false, true) => "[ok]",
            (false, false) => "[failed]",
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        match event {
            DeployEvent::Started {
                content_root,
                destination,
                asset_count,
            } => self.line(format!(
                "Deploying {} assets from {} to {}",
                asset_count,
                content_root.display(),
                destination
            )),
            DeployEvent::Planned {
                unit_count,
                long_cache_count,
                no_cache_count,
            } => self.line(format!(
                "Planned {} units ({} long-cache, {} no-cache)",
                unit_count, long_cache_count, no_cache_count
            )),
            DeployEvent::UnitStarted {
                unit,
                asset_count,
                prune,
            } => {
                if self.verbosity > 0 {
                    let prune = if prune { ", prune" } else { "" };
                    self.line(format!("  {} ({} assets{})", unit, asset_count, prune));
                }
            }
            DeployEvent::ObjectUploaded { key, .. } => {
                if self.verbosity > 1 {
                    self.line(format!("    + {}", key));
                }
            }
            DeployEvent::ObjectDeleted { key, .. } => {
                if self.verbosity > 1 {
                    self.line(format!("    - {}", key));
                }
            }
            DeployEvent::InvalidationIssued { unit, paths } => {
                if self.verbosity > 0 {
                    self.line(format!("  {} invalidated {}", unit, paths.join(" ")));
                }
            }
            DeployEvent::UnitSucceeded {
                unit,
                uploaded,
                unchanged,
                deleted,
            } => self.line(format!(
                "{} {}: {} uploaded, {} unchanged, {} deleted",
                self.marker(true),
                unit,
                uploaded,
                unchanged,
                deleted
            )),
            DeployEvent::UnitFailed { unit, error } => {
                self.line(format!("{} {}: {}", self.marker(false), unit, error))
            }
            DeployEvent::UnitBlocked { unit, reason } => {
                self.line(format!("- {} skipped: {}", unit, reason))
            }
            DeployEvent::Completed {
                succeeded,
                failed,
                blocked,
                dry_run,
            } => {
                let suffix = if dry_run { " (dry run)" } else { "" };
                self.line(format!(
                    "Done{}: {} succeeded, {} failed, {} skipped",
                    suffix, succeeded, failed, blocked
                ))
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbosity > 1
    }
}
