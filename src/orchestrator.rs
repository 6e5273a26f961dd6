//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: read → classify → resolve → decide → write
//! - Deduplicated, bounded-concurrency version lookups
//! - Dry-run mode support
//! - Graceful degradation: only reading or writing the file is fatal

use crate::cli::CliArgs;
use crate::domain::{LineKind, RawLine, RunSummary};
use crate::error::{AppError, ConfigError};
use crate::parser::classify;
use crate::progress::Progress;
use crate::registry::{resolve_latest, HttpClient, PyPIAdapter, RegistryAdapter, ResolvedVersions};
use crate::requirements::{render, write_requirements, RequirementsFile};
use crate::update::{decide, Decision, KeepReason};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Package index adapter
    adapter: Arc<dyn RegistryAdapter>,
}

impl Orchestrator {
    /// Create a new orchestrator talking to the configured index
    pub fn new(args: CliArgs) -> Result<Self, AppError> {
        if args.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: args.concurrency,
            }
            .into());
        }

        let client = HttpClient::with_timeout(args.timeout())
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?
            .with_max_retries(args.retries);
        let adapter = PyPIAdapter::with_base_url(client, args.index_url.clone());

        Ok(Self::with_adapter(args, Arc::new(adapter)))
    }

    /// Create an orchestrator with a custom adapter (for testing)
    pub fn with_adapter(args: CliArgs, adapter: Arc<dyn RegistryAdapter>) -> Self {
        Self { args, adapter }
    }

    /// Run the update workflow
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        self.run_with_progress(!self.args.quiet).await
    }

    /// Run the update workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::new(&self.args.file, self.args.dry_run);

        // Step 1: Read and classify
        let file = RequirementsFile::read(&self.args.file)?;
        let kinds: Vec<LineKind> = file.lines.iter().map(classify).collect();
        let names = candidate_names(&kinds);
        summary.candidates = kinds.iter().filter(|k| k.is_candidate()).count();
        debug!(
            "{}: {} lines, {} pins, {} distinct packages",
            self.args.file.display(),
            file.len(),
            summary.candidates,
            names.len()
        );

        // Step 2: Resolve latest versions
        let resolved = if names.is_empty() {
            ResolvedVersions::new()
        } else {
            let mut progress = Progress::new(show_progress);
            progress.start(names.len() as u64);
            let resolved = resolve_latest(
                Arc::clone(&self.adapter),
                &names,
                self.args.concurrency,
                &progress,
            )
            .await;
            progress.finish_and_clear();
            debug!("{} of {} lookups failed", progress.failed(), names.len());
            resolved
        };
        summary.unresolved = names
            .iter()
            .filter(|name| resolved.get(name).is_none())
            .cloned()
            .collect();

        // Step 3: Decide per line
        let lines = apply_decisions(&file.lines, kinds, &resolved, &mut summary);

        // Step 4: Write (unless dry-run or nothing changed)
        if !self.args.dry_run && summary.has_changes() {
            write_requirements(&self.args.file, &render(&lines))?;
            summary.written = true;
        }

        Ok(summary)
    }
}

/// Distinct canonical names of all candidate pins
pub fn candidate_names(kinds: &[LineKind]) -> BTreeSet<String> {
    kinds
        .iter()
        .filter_map(LineKind::as_candidate)
        .map(|pin| pin.canonical_name())
        .collect()
}

/// Build the output line sequence, recording every rewrite in `summary`
pub fn apply_decisions(
    lines: &[RawLine],
    kinds: Vec<LineKind>,
    resolved: &ResolvedVersions,
    summary: &mut RunSummary,
) -> Vec<RawLine> {
    lines
        .iter()
        .zip(kinds)
        .map(|(line, kind)| {
            let LineKind::Candidate(pin) = kind else {
                return line.clone();
            };
            let decision = decide(&pin, resolved.get(&pin.canonical_name()));
            match &decision {
                Decision::Rewrite(rewrite) => {
                    debug!("{}", rewrite.change);
                    summary.add_change(rewrite.change.clone());
                }
                Decision::Keep(KeepReason::InvalidLatest(e)) => {
                    warn!("Invalid latest version for {}: {}", pin.name, e);
                }
                Decision::Keep(reason) => {
                    debug!("line {}: {} unchanged ({})", line.number, pin.name, reason);
                }
            }
            decision.into_line(&pin)
        })
        .collect()
}
