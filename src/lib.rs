//! reqbump - requirements pin updater library
//!
//! This library provides the core functionality for bumping exact pins
//! in a pip requirements file:
//! - Lossless line model (whitespace, comments, line endings)
//! - PEP 508 requirement and marker parsing
//! - PEP 440 version ordering
//! - Concurrent latest-version lookups against a PyPI-style JSON API

pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod requirements;
pub mod update;
pub mod version;
