//! Logging Benchmark Results Generator
//!
//! Reads Criterion estimates for the logging benchmarks and writes
//! `benchmark_results.md`.

use anyhow::{Context, Result};
use clap::Parser;
use logbench_report::{
    config::Config,
    error::{format_error, ReportError},
    generate, init_logging, ReportOutcome,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "generate-results")]
#[command(about = "Generate a markdown report from logging benchmark results")]
#[command(version)]
struct Cli {
    /// Criterion output directory
    #[arg(short, long)]
    criterion_dir: Option<PathBuf>,

    /// Directory the report is written into
    #[arg(short, long)]
    results_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Format of the key findings printed on stdout
    #[arg(short, long, value_enum, default_value = "text")]
    format: FindingsFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FindingsFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    init_logging(level);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    };

    let outcome = match generate(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", format_error(&e));
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = print_findings(&outcome, cli.format) {
        eprintln!("{}", format_error(&e));
        process::exit(e.exit_code());
    }
}

/// Defaults, overridden by `LOGBENCH_*` environment, then the config file,
/// then command line flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_from_env();

    if let Some(path) = &cli.config {
        config
            .merge_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    }

    if let Some(dir) = &cli.criterion_dir {
        config.criterion_dir = dir.clone();
    }
    if let Some(dir) = &cli.results_dir {
        config.results_dir = dir.clone();
    }

    config.validate().context("invalid configuration")?;

    Ok(config)
}

fn print_findings(outcome: &ReportOutcome, format: FindingsFormat) -> Result<(), ReportError> {
    match format {
        FindingsFormat::Text => {
            println!(
                "Results successfully generated in {}",
                outcome.report_path.display()
            );
            println!("\nKey findings:");
            println!("- Fastest logger: {}", outcome.findings.fastest);
            println!("- Most consistent logger: {}", outcome.findings.most_consistent);
            println!("- Best for high throughput: {}", outcome.findings.best_throughput);
        }
        FindingsFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
    }

    Ok(())
}
