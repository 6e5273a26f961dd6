//! reqbump - requirements pin updater CLI tool
//!
//! Rewrites exact `==` pins in a requirements file to the latest
//! versions published on the package index, leaving every other byte alone.

use clap::Parser;
use reqbump::cli::CliArgs;
use reqbump::logging;
use reqbump::orchestrator::Orchestrator;
use reqbump::output::{create_formatter, OutputConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.verbose, args.quiet);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    log::debug!("reqbump v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Target: {}", args.file.display());
    if args.dry_run {
        log::debug!("Mode: dry-run");
    }

    let color = io::stdout().is_terminal();
    if !color {
        colored::control::set_override(false);
    }

    let orchestrator = Orchestrator::new(args.clone())?;
    let summary = orchestrator.run().await?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, color));
    let mut stdout = io::stdout().lock();
    formatter.format(&summary, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
