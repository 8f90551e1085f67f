//! In-memory benchmark results keyed by group and case

use serde::Serialize;
use std::collections::BTreeMap;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// One measured benchmark case
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Slope point estimate of one iteration, in nanoseconds
    pub time_ns: f64,
    /// Iterations per second, absent when `time_ns` is not positive
    pub throughput: Option<f64>,
}

impl Measurement {
    pub fn from_time_ns(time_ns: f64) -> Self {
        Self {
            time_ns,
            throughput: throughput_per_second(time_ns),
        }
    }
}

/// Operations per second for a per-operation duration in nanoseconds.
pub fn throughput_per_second(time_ns: f64) -> Option<f64> {
    if time_ns > 0.0 {
        let throughput = NANOS_PER_SECOND / time_ns;
        throughput.is_finite().then_some(throughput)
    } else {
        None
    }
}

/// Group name -> case label -> measurement
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    groups: BTreeMap<String, BTreeMap<String, Measurement>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        group: impl Into<String>,
        case: impl Into<String>,
        measurement: Measurement,
    ) {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(case.into(), measurement);
    }

    pub fn group(&self, group: &str) -> Option<&BTreeMap<String, Measurement>> {
        self.groups.get(group)
    }

    pub fn get(&self, group: &str, case: &str) -> Option<&Measurement> {
        self.groups.get(group).and_then(|cases| cases.get(case))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of measurements across all groups
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
