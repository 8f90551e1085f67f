//! Markdown rendering of collected benchmark results

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path};
use tracing::info;

use crate::error::Result;
use crate::results::{Measurement, ResultSet};
use crate::{display_name, levels_group, LOG_LEVELS, MESSAGE_SIZES};

const NOT_AVAILABLE: &str = "N/A";

/// Which value of a measurement a table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Time,
    Throughput,
}

impl Column {
    fn heading(self) -> &'static str {
        match self {
            Column::Time => "### Time per Log (ns)",
            Column::Throughput => "### Throughput (logs/second)",
        }
    }

    fn value(self, measurement: &Measurement) -> Option<f64> {
        match self {
            Column::Time => Some(measurement.time_ns),
            Column::Throughput => measurement.throughput,
        }
    }
}

/// Location of Criterion's HTML index as written into the report: relative
/// to `base` when `criterion_dir` lies below it, always with `/` separators.
pub fn charts_index(criterion_dir: &Path, base: Option<&Path>) -> String {
    let dir = base
        .filter(|_| criterion_dir.is_absolute())
        .and_then(|base| criterion_dir.strip_prefix(base).ok())
        .unwrap_or(criterion_dir);

    portable_path(&dir.join("report").join("index.html"))
}

fn portable_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// Render the full report. Row and column order never depend on the
/// contents of `results`, so equal inputs give byte-identical output.
pub fn render_markdown(results: &ResultSet, loggers: &[String], charts_index: &str) -> String {
    let mut md = String::new();

    md.push_str("# Logging Library Benchmark Results\n\n");
    md.push_str("This document contains benchmark results for various Rust logging libraries.\n\n");

    render_message_size_tables(&mut md, results, loggers);
    render_log_level_tables(&mut md, results, loggers);

    md.push_str("## Interactive Charts\n\n");
    md.push_str(&format!(
        "For interactive charts, please view the Criterion HTML reports generated in `{}`.\n\n",
        charts_index
    ));

    md
}

fn render_message_size_tables(md: &mut String, results: &ResultSet, loggers: &[String]) {
    md.push_str("## Message Size Benchmarks\n\n");
    md.push_str("These benchmarks measure the performance of logging messages of different sizes.\n\n");

    let groups: Vec<&str> = loggers.iter().map(String::as_str).collect();
    for column in [Column::Time, Column::Throughput] {
        md.push_str(column.heading());
        md.push_str("\n\n");
        md.push_str("| Logger | 10 byte message | 100 byte message | 1000 byte message |\n");
        md.push_str("|--------|----------------|------------------|-------------------|\n");
        render_rows(md, results, &groups, &MESSAGE_SIZES, column);
        md.push('\n');
    }
}

fn render_log_level_tables(md: &mut String, results: &ResultSet, loggers: &[String]) {
    md.push_str("## Log Level Benchmarks\n\n");
    md.push_str("These benchmarks measure the performance of logging at different levels.\n\n");

    let level_groups: Vec<String> = loggers.iter().map(|l| levels_group(l)).collect();
    let groups: Vec<&str> = level_groups.iter().map(String::as_str).collect();
    for column in [Column::Time, Column::Throughput] {
        md.push_str(column.heading());
        md.push_str("\n\n");
        md.push_str("| Logger | trace | debug | info | warn | error |\n");
        md.push_str("|--------|-------|-------|------|------|-------|\n");
        render_rows(md, results, &groups, &LOG_LEVELS, column);
        md.push('\n');
    }
}

fn render_rows(
    md: &mut String,
    results: &ResultSet,
    groups: &[&str],
    cases: &[&str],
    column: Column,
) {
    for group in groups {
        md.push_str(&format!("| {} ", display_name(group)));
        for case in cases {
            md.push_str(&format!("| {} ", format_cell(results.get(group, case), column)));
        }
        md.push_str("|\n");
    }
}

fn format_cell(measurement: Option<&Measurement>, column: Column) -> String {
    measurement
        .and_then(|m| column.value(m))
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Write `markdown` to `path`, creating the parent directory if needed.
pub fn write_report(path: &Path, markdown: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    info!("Generating markdown report: {}", path.display());

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(markdown.as_bytes())?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LOGGERS;
    use tempfile::TempDir;

    fn loggers() -> Vec<String> {
        LOGGERS.iter().map(|s| s.to_string()).collect()
    }

    fn render(results: &ResultSet) -> String {
        render_markdown(results, &loggers(), "target/criterion/report/index.html")
    }

    #[test]
    fn test_empty_results_render_every_row() {
        let md = render(&ResultSet::new());

        assert!(md.starts_with("# Logging Library Benchmark Results\n\n"));
        assert!(md.contains("| env_logger | N/A | N/A | N/A |\n"));
        assert!(md.contains("| tracing | N/A | N/A | N/A | N/A | N/A |\n"));
        assert!(!md.contains("_levels"));
        // six loggers, four tables
        assert_eq!(md.matches("| fern |").count(), 4);
        assert!(md.ends_with(
            "For interactive charts, please view the Criterion HTML reports generated in `target/criterion/report/index.html`.\n\n"
        ));
    }

    #[test]
    fn test_section_order() {
        let md = render(&ResultSet::new());
        let size = md.find("## Message Size Benchmarks").unwrap();
        let level = md.find("## Log Level Benchmarks").unwrap();
        let charts = md.find("## Interactive Charts").unwrap();
        assert!(size < level && level < charts);
        assert_eq!(md.matches("### Time per Log (ns)").count(), 2);
        assert_eq!(md.matches("### Throughput (logs/second)").count(), 2);
    }

    #[test]
    fn test_single_tracing_measurement() {
        let mut results = ResultSet::new();
        results.insert("tracing", "100", Measurement::from_time_ns(500.0));

        let md = render(&results);

        assert!(md.contains("| tracing | N/A | 500.00 | N/A |\n"));
        assert!(md.contains("| tracing | N/A | 2000000.00 | N/A |\n"));
    }

    #[test]
    fn test_level_rows_strip_suffix() {
        let mut results = ResultSet::new();
        results.insert("slog_levels", "trace", Measurement::from_time_ns(12.5));
        results.insert("slog_levels", "error", Measurement::from_time_ns(250.0));

        let md = render(&results);

        assert!(md.contains("| slog | 12.50 | N/A | N/A | N/A | 250.00 |\n"));
        assert!(md.contains("| slog | 80000000.00 | N/A | N/A | N/A | 4000000.00 |\n"));
    }

    #[test]
    fn test_undefined_throughput_renders_not_available() {
        let mut results = ResultSet::new();
        results.insert("ftlog", "10", Measurement::from_time_ns(0.0));

        let md = render(&results);

        assert!(md.contains("| ftlog | 0.00 | N/A | N/A |\n"));
        assert!(md.contains("| ftlog | N/A | N/A | N/A |\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut a = ResultSet::new();
        a.insert("fern", "1000", Measurement::from_time_ns(105.0));
        a.insert("fern", "10", Measurement::from_time_ns(100.0));
        a.insert("slog_levels", "info", Measurement::from_time_ns(77.7));

        let mut b = ResultSet::new();
        b.insert("slog_levels", "info", Measurement::from_time_ns(77.7));
        b.insert("fern", "10", Measurement::from_time_ns(100.0));
        b.insert("fern", "1000", Measurement::from_time_ns(105.0));

        assert_eq!(render(&a), render(&b));
    }

    #[test]
    fn test_charts_index_default_location() {
        assert_eq!(
            charts_index(Path::new("target/criterion"), None),
            "target/criterion/report/index.html"
        );
        assert_eq!(
            charts_index(Path::new("./target/criterion"), Some(Path::new("/work"))),
            "./target/criterion/report/index.html"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_charts_index_strips_working_directory() {
        let base = Path::new("/home/ci/logbench");
        assert_eq!(
            charts_index(&base.join("target/criterion"), Some(base)),
            "target/criterion/report/index.html"
        );
        assert_eq!(
            charts_index(Path::new("/data/criterion"), Some(base)),
            "/data/criterion/report/index.html"
        );
    }

    #[test]
    fn test_write_report_creates_directory_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("results").join("benchmark_results.md");

        write_report(&path, "first").unwrap();
        write_report(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
