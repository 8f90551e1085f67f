//! Key findings across the message-size benchmarks

use serde::Serialize;

use crate::results::ResultSet;
use crate::{MESSAGE_SIZES, REFERENCE_SIZE};

/// Placeholder used when no logger qualifies for a finding
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Findings {
    pub fastest: String,
    pub most_consistent: String,
    pub best_throughput: String,
}

impl Findings {
    pub fn from_results(results: &ResultSet, loggers: &[String]) -> Self {
        Self {
            fastest: or_unknown(find_fastest(results, loggers)),
            most_consistent: or_unknown(find_most_consistent(results, loggers)),
            best_throughput: or_unknown(find_best_throughput(results, loggers)),
        }
    }
}

fn or_unknown(winner: Option<&str>) -> String {
    winner.unwrap_or(UNKNOWN).to_string()
}

/// Logger with the lowest time per 100 byte message. Ties keep the first.
pub fn find_fastest<'a>(results: &ResultSet, loggers: &'a [String]) -> Option<&'a str> {
    let mut fastest = None;
    let mut fastest_time = f64::INFINITY;

    for logger in loggers {
        if let Some(m) = results.get(logger, REFERENCE_SIZE) {
            if m.time_ns < fastest_time {
                fastest_time = m.time_ns;
                fastest = Some(logger.as_str());
            }
        }
    }

    fastest
}

/// Logger whose time varies least across message sizes.
///
/// Only loggers with a measurement for every size take part.
pub fn find_most_consistent<'a>(results: &ResultSet, loggers: &'a [String]) -> Option<&'a str> {
    let mut most_consistent = None;
    let mut min_variation = f64::INFINITY;

    for logger in loggers {
        let times: Vec<f64> = MESSAGE_SIZES
            .iter()
            .filter_map(|size| results.get(logger, size))
            .map(|m| m.time_ns)
            .collect();

        if times.len() != MESSAGE_SIZES.len() {
            continue;
        }

        if let Some(variation) = stats::coefficient_of_variation(&times) {
            if variation < min_variation {
                min_variation = variation;
                most_consistent = Some(logger.as_str());
            }
        }
    }

    most_consistent
}

/// Logger with the highest throughput for 100 byte messages.
pub fn find_best_throughput<'a>(results: &ResultSet, loggers: &'a [String]) -> Option<&'a str> {
    let mut best = None;
    let mut max_throughput = 0.0;

    for logger in loggers {
        let throughput = results
            .get(logger, REFERENCE_SIZE)
            .and_then(|m| m.throughput);

        if let Some(throughput) = throughput {
            if throughput > max_throughput {
                max_throughput = throughput;
                best = Some(logger.as_str());
            }
        }
    }

    best
}

/// Statistical utilities
pub mod stats {
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Standard deviation over the whole population (divides by `n`)
    pub fn population_std_dev(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mean_val = mean(values);
        let variance = values
            .iter()
            .map(|x| (x - mean_val).powi(2))
            .sum::<f64>()
            / values.len() as f64;
        variance.sqrt()
    }

    /// Standard deviation as a percentage of the mean
    pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
        let mean_val = mean(values);
        if values.is_empty() || mean_val == 0.0 {
            return None;
        }
        let cv = population_std_dev(values) / mean_val * 100.0;
        cv.is_finite().then_some(cv)
    }
}
