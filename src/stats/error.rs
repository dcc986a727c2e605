//! Errors raised by the statistics core.

/// Statistics errors.
///
/// Nothing in the filter or accumulate path fails; these only cover caller
/// mistakes in configuring a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// `calculate()` was called before parameters were set
    MissingParameters,
    /// A statistic name did not match any known statistic
    UnknownStat(String),
    /// A reporting period could not be resolved
    InvalidPeriod(String),
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::MissingParameters => {
                write!(f, "Parameters must be set before calculating a statistic")
            }
            StatsError::UnknownStat(name) => write!(f, "Unknown statistic: {name}"),
            StatsError::InvalidPeriod(e) => write!(f, "Invalid reporting period: {e}"),
        }
    }
}

impl std::error::Error for StatsError {}
