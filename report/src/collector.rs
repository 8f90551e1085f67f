//! Criterion estimate collection
//!
//! Criterion lays results out as `<root>/<group>/<case>/new/estimates.json`.
//! Each logger contributes a message-size group named after the logger and a
//! log-level group with the `_levels` suffix.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{ReportError, Result};
use crate::results::{Measurement, ResultSet};
use crate::levels_group;

/// Criterion's pre-rendered HTML assets live next to the case directories
pub const REPORT_DIR: &str = "report";

const ESTIMATES_FILE: &str = "estimates.json";
const LATEST_RUN_DIR: &str = "new";

/// Collect every available measurement for `loggers` under `criterion_dir`.
///
/// Only a missing `criterion_dir` is an error. Missing groups, missing
/// estimate files and unparseable estimates are logged and left out.
pub fn collect(criterion_dir: &Path, loggers: &[String]) -> Result<ResultSet> {
    if !criterion_dir.is_dir() {
        return Err(ReportError::CriterionDirNotFound {
            path: criterion_dir.to_path_buf(),
        });
    }

    let mut results = ResultSet::new();

    for logger in loggers {
        for group_name in [logger.clone(), levels_group(logger)] {
            let group_dir = criterion_dir.join(&group_name);
            if group_dir.is_dir() {
                collect_group(&group_dir, &group_name, &mut results);
            } else {
                warn!("Skipping missing benchmark: {}", group_name);
            }
        }
    }

    debug!(
        "Collected {} measurements across {} groups",
        results.len(),
        results.group_count()
    );

    Ok(results)
}

/// Read all cases of one benchmark group directory into `results`.
pub fn collect_group(group_dir: &Path, group_name: &str, results: &mut ResultSet) {
    info!("Processing benchmark group: {}", group_name);

    let entries = WalkDir::new(group_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in benchmark group {}: {}", group_dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            debug!("Skipping non-directory entry: {}", entry.path().display());
            continue;
        }

        let case = entry.file_name().to_string_lossy();
        if case == REPORT_DIR {
            continue;
        }

        let estimates_path = entry.path().join(LATEST_RUN_DIR).join(ESTIMATES_FILE);
        if !estimates_path.is_file() {
            warn!("No estimates file found at: {}", estimates_path.display());
            continue;
        }

        match read_estimate(&estimates_path) {
            Ok(time_ns) => {
                debug!("{}/{}: {:.2} ns", group_name, case, time_ns);
                results.insert(group_name, case.to_string(), Measurement::from_time_ns(time_ns));
            }
            Err(e) => {
                warn!("Error processing benchmark file {}: {}", estimates_path.display(), e);
            }
        }
    }
}

/// Extract the slope point estimate (nanoseconds per iteration) from an
/// `estimates.json` file.
pub fn read_estimate(path: &Path) -> Result<f64> {
    let content = fs::read_to_string(path)?;
    let estimates: Value = serde_json::from_str(&content).map_err(|source| ReportError::Estimates {
        path: path.to_path_buf(),
        source,
    })?;

    estimates
        .get("slope")
        .and_then(|slope| slope.get("point_estimate"))
        .and_then(Value::as_f64)
        .ok_or_else(|| ReportError::MissingField {
            path: path.to_path_buf(),
            field: "slope.point_estimate",
        })
}
