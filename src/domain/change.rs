//! Records of lines that were (or would be) rewritten

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single rewritten line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// 1-based line number
    pub line: usize,
    /// Package name as written
    pub package: String,
    pub old_version: String,
    pub new_version: String,
    /// Line content before the rewrite, without terminator
    pub old: String,
    /// Line content after the rewrite, without terminator
    pub new: String,
}

impl ChangeRecord {
    /// Creates a new ChangeRecord
    pub fn new(
        line: usize,
        package: impl Into<String>,
        old_version: impl Into<String>,
        new_version: impl Into<String>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            line,
            package: package.into(),
            old_version: old_version.into(),
            new_version: new_version.into(),
            old: old.into(),
            new: new.into(),
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} -> {}", self.line, self.old, self.new)
    }
}
