//! Streaming statistics core.
//!
//! This module contains:
//! - Run parameters and the shared post filter
//! - The `Calculator` contract and the run lifecycle around it
//! - Concrete calculators and a name-based lookup

pub mod calculator;
pub mod calculators;
pub mod error;
pub mod filter;
pub mod params;
pub mod registry;
pub mod result;

// Re-export commonly used types
pub use calculator::{accumulate_data, finalize_result, run, Calculator, StatAccumulator, StatRun};
pub use error::StatsError;
pub use params::{parse_date_bound, ReportingPeriod, StatName, StatParams};
pub use registry::accumulator_for;
pub use result::StatResult;
