//! Lookup from statistic name to a ready-to-feed accumulator.

use crate::stats::calculator::{StatAccumulator, StatRun};
use crate::stats::calculators::{AveragePostLength, AveragePostsPerUser, MaxPostLength, TotalPosts};
use crate::stats::params::{StatName, StatParams};

/// Build an accumulator for `params.stat_name` with the parameters applied.
pub fn accumulator_for(params: StatParams) -> Box<dyn StatAccumulator> {
    match params.stat_name {
        StatName::AveragePostsPerUser => {
            Box::new(StatRun::new(AveragePostsPerUser).set_parameters(params))
        }
        StatName::AveragePostLength => {
            Box::new(StatRun::new(AveragePostLength).set_parameters(params))
        }
        StatName::MaxPostLength => Box::new(StatRun::new(MaxPostLength).set_parameters(params)),
        StatName::TotalPosts => Box::new(StatRun::new(TotalPosts).set_parameters(params)),
    }
}
