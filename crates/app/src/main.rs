//! TestLang binary.
//!
//! Loads a suite file, runs it against the system under test, and prints
//! the report. Exit codes: 0 when every case passed, 1 when any case
//! failed, 2 when the suite could not be loaded, validated or reported.

mod cli;

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use testlang_application::TestRunner;
use testlang_domain::TestReport;
use testlang_infrastructure::{ReqwestTransport, load_suite, render, write_report};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(&cli).await {
        Ok(report) if report.success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(error) => {
            tracing::error!(%error, "run aborted");
            eprintln!("error: {error}");
            ExitCode::from(2)
        }
    }
}

/// Logs go to stderr so a report on stdout stays machine-readable.
fn init_tracing(level: Option<&str>) {
    let (filter, rejected) = log_filter(level);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(reason) = rejected {
        tracing::warn!(%reason, "ignoring invalid --log-level");
    }
}

/// Picks `--log-level`, then `RUST_LOG`, then `info`. The second value
/// explains why a given `--log-level` was not used.
fn log_filter(level: Option<&str>) -> (EnvFilter, Option<String>) {
    let mut rejected = None;
    let requested = level.and_then(|directive| match EnvFilter::try_new(directive) {
        Ok(filter) => Some(filter),
        Err(error) => {
            rejected = Some(format!("'{directive}': {error}"));
            None
        }
    });

    let filter = requested
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    (filter, rejected)
}

async fn run(cli: &Cli) -> Result<TestReport, Box<dyn Error>> {
    tracing::info!("Starting TestLang v{}", env!("CARGO_PKG_VERSION"));

    let suite = load_suite(&cli.suite, |config| cli.apply(config)).await?;
    let transport = Arc::new(ReqwestTransport::new(&suite.config)?);
    let report = TestRunner::run_suite(transport, &suite).await?;

    let rendered = render(&report, cli.format.into())?;
    match &cli.output {
        Some(path) => {
            write_report(path, &rendered).await?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }

    Ok(report)
}
