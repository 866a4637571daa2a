//! Command-line interface.
//!
//! Every flag may also come from the environment:
//!
//! | Variable | Flag |
//! |----------|------|
//! | `TESTLANG_BASE_URL` | `--base-url` |
//! | `TESTLANG_CONCURRENCY` | `--concurrency` |
//! | `TESTLANG_CONNECT_TIMEOUT_MS` | `--connect-timeout-ms` |
//! | `TESTLANG_TIMEOUT_MS` | `--timeout-ms` |
//! | `TESTLANG_FORMAT` | `--format` |
//! | `TESTLANG_LOG_LEVEL` | `--log-level` |
//!
//! Values given here override the suite file's `config` block.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use testlang_domain::HarnessConfig;
use testlang_infrastructure::ReportFormat;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Runs a contract suite against a live API.
#[derive(Debug, Clone, Parser)]
#[command(name = "testlang", version)]
#[command(about = "Contract-based API test runner")]
pub struct Cli {
    /// Suite file (.yaml, .yml or .json).
    pub suite: PathBuf,

    /// Base URL of the system under test.
    #[arg(long, env = "TESTLANG_BASE_URL")]
    pub base_url: Option<String>,

    /// Maximum number of cases in flight.
    #[arg(short, long, env = "TESTLANG_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Connection timeout in milliseconds.
    #[arg(long, env = "TESTLANG_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Default request timeout in milliseconds.
    #[arg(long, env = "TESTLANG_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Report format.
    #[arg(short, long, env = "TESTLANG_FORMAT", value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level or filter directive (error, warn, info, debug, trace).
    /// Falls back to `RUST_LOG`, then `info`.
    #[arg(long, env = "TESTLANG_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Lays the command-line values over a suite's configuration.
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(connect_timeout_ms) = self.connect_timeout_ms {
            config.connect_timeout_ms = connect_timeout_ms;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }
    }
}
