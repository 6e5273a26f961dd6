//! Run summary types
//!
//! Collects everything the report needs once a run has finished.

use super::ChangeRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of a single run over one pin file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Path of the pin file
    pub path: PathBuf,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Rewritten lines, ordered by line number
    pub changes: Vec<ChangeRecord>,
    /// Canonical names whose latest version could not be determined
    pub unresolved: Vec<String>,
    /// Number of candidate pin lines
    pub candidates: usize,
    /// Whether the file was actually written
    pub written: bool,
}

impl RunSummary {
    /// Creates an empty summary
    pub fn new(path: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            path: path.into(),
            dry_run,
            changes: Vec::new(),
            unresolved: Vec::new(),
            candidates: 0,
            written: false,
        }
    }

    /// Adds a change, keeping line-number order
    pub fn add_change(&mut self, change: ChangeRecord) {
        let idx = self.changes.partition_point(|c| c.line <= change.line);
        self.changes.insert(idx, change);
    }

    /// Number of rewritten lines
    pub fn total_updates(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if any line was rewritten
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}
