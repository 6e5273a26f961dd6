//! Pin file model
//!
//! This module provides:
//! - Splitting a pin file into lines that keep their own terminators
//! - Reassembling a line sequence byte-for-byte
//! - Atomic file replacement

mod writer;

pub use writer::{read_requirements, write_requirements};

use crate::domain::RawLine;
use crate::error::RequirementsError;
use std::path::{Path, PathBuf};

/// A pin file split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsFile {
    pub path: PathBuf,
    pub lines: Vec<RawLine>,
}

impl RequirementsFile {
    /// Read and split a pin file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, RequirementsError> {
        let path = path.as_ref();
        let content = read_requirements(path)?;
        Ok(Self::from_content(path, &content))
    }

    /// Split already-loaded content
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        let lines = content
            .split_inclusive('\n')
            .enumerate()
            .map(|(idx, line)| RawLine::new(idx + 1, line))
            .collect();
        Self {
            path: path.into(),
            lines,
        }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true for an empty file
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Join lines back into file content
pub fn render(lines: &[RawLine]) -> String {
    lines.iter().map(RawLine::to_text).collect()
}
