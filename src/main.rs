use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use hostfn_audit::cli::Cli;
use hostfn_audit::errors::AuditError;
use hostfn_audit::io::{fetcher_for_root, LocalFetcher};
use hostfn_audit::{emit_report, run_audit, ExitStatus};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Tracing is opt-in through HOSTFN_AUDIT_LOG and always goes to stderr
    if let Ok(filter) = EnvFilter::try_from_env("HOSTFN_AUDIT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_exit(err),
    };

    match run(cli) {
        Ok(status) => ExitCode::from(status.code()),
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            let code = err
                .downcast_ref::<AuditError>()
                .map_or(1, AuditError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<ExitStatus> {
    let config = cli.into_config();
    let reference_fetcher = fetcher_for_root(&config.source_root)?;
    let report = run_audit(&config, &reference_fetcher, &LocalFetcher)?;
    emit_report(&report, config.format, config.formatting).context("Failed to write report")
}

/// Help and version exit 0; every other argument error is a usage error
/// and exits 1.
fn usage_exit(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            let usage = AuditError::usage(err.render().to_string());
            eprint!("{}", usage);
            ExitCode::from(usage.exit_code())
        }
    }
}
