//! JSON output formatter for machine processing

use crate::domain::{ChangeRecord, RunSummary};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a run
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Path to the pin file
    file: String,
    /// Whether this was a dry-run
    dry_run: bool,
    /// Number of rewritten lines
    updated: usize,
    /// Whether the file was written
    written: bool,
    changes: &'a [ChangeRecord],
    /// Packages whose latest version is unknown
    unresolved: &'a [String],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            file: summary.path.display().to_string(),
            dry_run: summary.dry_run,
            updated: summary.total_updates(),
            written: summary.written,
            changes: &summary.changes,
            unresolved: &summary.unresolved,
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
