//! Package index access
//!
//! This module provides:
//! - HTTP client shared foundation with timeout and retry logic
//! - PyPI JSON API adapter
//! - Bounded concurrent resolution of latest versions

mod client;
mod pypi;
mod resolver;

pub use client::{HttpClient, DEFAULT_RETRIES, DEFAULT_TIMEOUT};
pub use pypi::{PyPIAdapter, PYPI_API_URL};
pub use resolver::{resolve_latest, ResolvedVersions, DEFAULT_CONCURRENCY};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for package index adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the latest published version of a package
    async fn fetch_latest(&self, package: &str) -> Result<String, RegistryError>;
}
