//! CLI argument parsing module for reqbump

use crate::registry::{DEFAULT_CONCURRENCY, PYPI_API_URL};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a concurrency limit, which must be at least 1
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if n == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(n)
}

/// Bump exact-version pins in a requirements file to the latest releases
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reqbump",
    version,
    about = "Update pinned package versions in a requirements file to the latest index versions"
)]
pub struct CliArgs {
    /// The requirements file to update
    #[arg(default_value = "requirements.txt")]
    pub file: PathBuf,

    /// Show what would be changed without modifying the file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Base URL of the package index JSON API
    #[arg(long, env = "REQBUMP_INDEX_URL", default_value = PYPI_API_URL)]
    pub index_url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of lookups in flight
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Retries for connection errors and rate limiting
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub retries: u32,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors; no progress display
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
