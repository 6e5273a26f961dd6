//! Exact-version pins extracted from candidate lines

use super::LineEnding;
use crate::version::Version;
use std::collections::BTreeSet;

/// A requirement line pinned to exactly one version with `==`
///
/// The original line is always recoverable by concatenating
/// `leading_whitespace + requirement + trailing_whitespace`, then
/// `"#" + comment` when present, then the terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePin {
    /// 1-based line number, for reporting
    pub line_number: usize,
    /// Package name as written
    pub name: String,
    /// Extras, sorted
    pub extras: BTreeSet<String>,
    /// Environment marker text, trimmed
    pub marker: Option<String>,
    /// Version after `==`
    pub current_version: Version,
    /// Requirement expression exactly as written, trimmed
    pub requirement: String,
    pub leading_whitespace: String,
    pub trailing_whitespace: String,
    /// Text after the first `#`, without the `#`
    pub comment: Option<String>,
    pub ending: LineEnding,
}

impl CandidatePin {
    /// Name used for deduplication and index lookup
    pub fn canonical_name(&self) -> String {
        canonicalize_name(&self.name)
    }

    /// The line as it appeared in the file, without its terminator
    pub fn original_content(&self) -> String {
        self.assemble(&self.requirement)
    }

    /// The line as it appeared in the file, terminator included
    pub fn original_line(&self) -> String {
        format!("{}{}", self.original_content(), self.ending.as_str())
    }

    /// `name[extras]==version; marker`
    pub fn render_requirement(&self, version: &str) -> String {
        let mut out = self.name.clone();
        if !self.extras.is_empty() {
            let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
            out.push('[');
            out.push_str(&extras.join(","));
            out.push(']');
        }
        out.push_str("==");
        out.push_str(version);
        if let Some(marker) = &self.marker {
            out.push_str("; ");
            out.push_str(marker);
        }
        out
    }

    /// Line content with the requirement pinned to `version`, original
    /// whitespace and comment kept
    pub fn render_content(&self, version: &str) -> String {
        self.assemble(&self.render_requirement(version))
    }

    fn assemble(&self, requirement: &str) -> String {
        let mut out = String::with_capacity(
            self.leading_whitespace.len() + requirement.len() + self.trailing_whitespace.len(),
        );
        out.push_str(&self.leading_whitespace);
        out.push_str(requirement);
        out.push_str(&self.trailing_whitespace);
        if let Some(comment) = &self.comment {
            out.push('#');
            out.push_str(comment);
        }
        out
    }
}

/// PEP 503 normalized project name: lowercase, runs of `-`, `_`, `.` collapsed to `-`
pub fn canonicalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    out
}
