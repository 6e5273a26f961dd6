//! Requirement line parsing
//!
//! This module provides:
//! - A PEP 508 requirement specifier grammar (name, extras, version
//!   constraints, direct URL references, environment markers)
//! - The line classifier that decides which lines are exact-version pins
//! - The pin extractor that splits a candidate line into rewritable fields

mod classifier;
mod cursor;
mod marker;
mod requirement;

pub use classifier::{classify, extract, split_comment};
pub use marker::validate_marker;
pub use requirement::{parse_requirement, Operator, ParsedSpecifier, Specifier};
