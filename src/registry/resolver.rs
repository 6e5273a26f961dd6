//! Concurrent latest-version resolution
//!
//! One lookup per distinct package name, at most `concurrency` in flight.
//! Results are gathered as tasks finish; a failed lookup only leaves its
//! package unresolved.

use crate::error::RegistryError;
use crate::progress::Progress;
use crate::registry::RegistryAdapter;
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default maximum number of lookups in flight
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Latest versions keyed by canonical package name
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolvedVersions {
    versions: HashMap<String, String>,
}

impl ResolvedVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(name.into(), version.into());
    }

    /// Latest version for `name`, if the lookup succeeded
    pub fn get(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedVersions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut resolved = Self::new();
        for (name, version) in iter {
            resolved.insert(name, version);
        }
        resolved
    }
}

/// Look up the latest version of every name in `names`
pub async fn resolve_latest(
    adapter: Arc<dyn RegistryAdapter>,
    names: &BTreeSet<String>,
    concurrency: usize,
    progress: &Progress,
) -> ResolvedVersions {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for name in names {
        let adapter = Arc::clone(&adapter);
        let semaphore = Arc::clone(&semaphore);
        let name = name.clone();
        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => adapter.fetch_latest(&name).await,
                Err(_) => Err(RegistryError::network_error(
                    name.as_str(),
                    adapter.registry_name(),
                    "lookup pool closed",
                )),
            };
            (name, result)
        });
    }

    let mut resolved = ResolvedVersions::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, Ok(version))) => {
                debug!("{}: latest is {}", name, version);
                progress.record(&name, true);
                resolved.insert(name, version);
            }
            Ok((name, Err(e))) => {
                warn!("Could not fetch latest version for {}: {}", name, e);
                progress.record(&name, false);
            }
            Err(e) => {
                warn!("Version lookup task failed: {}", e);
                progress.record("?", false);
            }
        }
    }

    resolved
}
