//! Logging Benchmark Report Generation
//!
//! Turns the Criterion output of the logging library benchmarks into a
//! markdown report:
//!
//! - Collection of slope estimates from `target/criterion`
//! - Time and throughput tables by message size and by log level
//! - Key findings: fastest, most consistent and highest throughput logger
//!
//! The pipeline is sequential: [`collector::collect`] builds a
//! [`results::ResultSet`], which [`report::render_markdown`] and
//! [`summary::Findings`] then read.

pub mod collector;
pub mod config;
pub mod error;
pub mod report;
pub mod results;
pub mod summary;

use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use config::Config;
use error::Result;
use summary::Findings;

/// Logging libraries under benchmark, in report order
pub const LOGGERS: [&str; 6] = ["env_logger", "fern", "ftlog", "log4rs", "slog", "tracing"];

/// Message size cases in bytes
pub const MESSAGE_SIZES: [&str; 3] = ["10", "100", "1000"];

/// Log level cases, from most to least verbose
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Size case the fastest and best throughput findings compare
pub const REFERENCE_SIZE: &str = "100";

pub const LEVELS_SUFFIX: &str = "_levels";

/// Name of the log-level benchmark group for `logger`
pub fn levels_group(logger: &str) -> String {
    format!("{}{}", logger, LEVELS_SUFFIX)
}

/// Group name as shown in report rows
pub fn display_name(group: &str) -> &str {
    group.strip_suffix(LEVELS_SUFFIX).unwrap_or(group)
}

/// Result of one report generation run
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub report_path: PathBuf,
    pub measurements: usize,
    pub findings: Findings,
}

/// Collect, render and write the report described by `config`.
pub fn generate(config: &Config) -> Result<ReportOutcome> {
    info!("Generating benchmark results...");
    debug!("Using configuration: {:?}", config);

    let results = collector::collect(&config.criterion_dir, &config.loggers)?;

    let cwd = std::env::current_dir().ok();
    let charts_index = report::charts_index(&config.criterion_dir, cwd.as_deref());
    let markdown = report::render_markdown(&results, &config.loggers, &charts_index);
    let report_path = config.report_path();
    report::write_report(&report_path, &markdown)?;

    let findings = Findings::from_results(&results, &config.loggers);

    Ok(ReportOutcome {
        report_path,
        measurements: results.len(),
        findings,
    })
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// `default_level`; a second call is a no-op.
pub fn init_logging(default_level: tracing::Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
