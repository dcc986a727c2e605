//! Statistic results.

use crate::stats::params::StatName;
use serde::Serialize;

/// The named numeric outcome of one statistics run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatResult {
    pub name: StatName,
    pub value: f64,
    pub units: &'static str,
}

impl StatResult {
    pub fn new(name: StatName, value: f64, units: &'static str) -> Self {
        Self { name, value, units }
    }
}

impl std::fmt::Display for StatResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.name, self.value, self.units)
    }
}

/// Round to two decimal places, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
