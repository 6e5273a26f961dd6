//! Text output formatter for human-readable display

use crate::domain::RunSummary;
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn old_text(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn new_text(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        if !summary.has_changes() {
            return writeln!(writer, "No updates needed.");
        }

        if summary.dry_run {
            writeln!(writer, "Would make the following changes:")?;
            for change in &summary.changes {
                writeln!(
                    writer,
                    "  line {}: {} -> {}",
                    change.line,
                    self.old_text(&change.old),
                    self.new_text(&change.new)
                )?;
            }
            return Ok(());
        }

        writeln!(
            writer,
            "Updated '{}': {} packages updated.",
            summary.path.display(),
            summary.total_updates()
        )
    }
}
