//! Core domain models for reqbump
//!
//! This module contains the fundamental types used throughout the application:
//! - Raw lines with their terminators, and their classification
//! - Exact-version pins extracted from candidate lines
//! - Change records and the run summary

mod change;
mod line;
mod pin;
mod summary;

pub use change::ChangeRecord;
pub use line::{LineEnding, LineKind, RawLine};
pub use pin::{canonicalize_name, CandidatePin};
pub use summary::RunSummary;
