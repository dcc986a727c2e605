//! Statistic names and run parameters.

use crate::stats::error::StatsError;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Statistics this crate knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatName {
    /// Mean number of posts per distinct author
    AveragePostsPerUser,
    /// Mean message length in characters
    AveragePostLength,
    /// Longest message in characters
    MaxPostLength,
    /// Number of posts
    TotalPosts,
}

impl StatName {
    /// Every known statistic, in display order.
    pub const ALL: [StatName; 4] = [
        StatName::AveragePostsPerUser,
        StatName::AveragePostLength,
        StatName::MaxPostLength,
        StatName::TotalPosts,
    ];

    /// Wire name of the statistic.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatName::AveragePostsPerUser => "average-posts-per-user",
            StatName::AveragePostLength => "average-post-length",
            StatName::MaxPostLength => "max-post-length",
            StatName::TotalPosts => "total-posts",
        }
    }

    /// Short human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            StatName::AveragePostsPerUser => "Average number of posts per author",
            StatName::AveragePostLength => "Average message length in characters",
            StatName::MaxPostLength => "Longest message length in characters",
            StatName::TotalPosts => "Total number of posts",
        }
    }
}

impl std::fmt::Display for StatName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatName {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        StatName::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| StatsError::UnknownStat(s.to_string()))
    }
}

/// Parameters for one statistics run.
///
/// Set once before any post is accumulated and read-only afterwards.
/// Missing bounds mean the window is open on that side. A `start_date` later
/// than `end_date` is not rejected here; it simply filters out every post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatParams {
    pub stat_name: StatName,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub post_type: Option<String>,
}

impl StatParams {
    /// Parameters for the given statistic with no filters.
    pub fn new(stat_name: StatName) -> Self {
        Self {
            stat_name,
            start_date: None,
            end_date: None,
            post_type: None,
        }
    }

    pub fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_post_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = Some(post_type.into());
        self
    }

    /// Restrict the run to a reporting period.
    pub fn with_period(self, period: &ReportingPeriod) -> Self {
        self.with_start_date(period.start).with_end_date(period.end)
    }
}

/// An inclusive time range resolved from a calendar period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportingPeriod {
    /// The calendar month `year-month` in the given timezone.
    ///
    /// `end` is the last nanosecond of the month, so posts stamped exactly at
    /// the final instant are still inside the period.
    pub fn month(year: i32, month: u32, tz: Tz) -> Result<Self, StatsError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| StatsError::InvalidPeriod(format!("{year}-{month:02}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| StatsError::InvalidPeriod(format!("{year}-{month:02}")))?;

        let start = start_of_day(first, tz)?;
        let end = start_of_day(next, tz)? - Duration::nanoseconds(1);

        Ok(Self { start, end })
    }

    /// Parse a `YYYY-MM` month in the given timezone.
    pub fn parse_month(s: &str, tz: Tz) -> Result<Self, StatsError> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| StatsError::InvalidPeriod(format!("expected YYYY-MM, got '{s}'")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| StatsError::InvalidPeriod(format!("bad year in '{s}'")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| StatsError::InvalidPeriod(format!("bad month in '{s}'")))?;

        Self::month(year, month, tz)
    }

    /// Whether a timestamp falls inside the period (both ends inclusive).
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

/// Parse a date bound given on the command line.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates. A plain date is
/// read in `tz` and expands to the first instant of the day, or to the last
/// nanosecond of the day when `end_of_day` is set.
pub fn parse_date_bound(s: &str, tz: Tz, end_of_day: bool) -> Result<DateTime<Utc>, StatsError> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| StatsError::InvalidPeriod(format!("'{s}': {e}")))?;

    if end_of_day {
        let next = date
            .succ_opt()
            .ok_or_else(|| StatsError::InvalidPeriod(format!("'{s}' is out of range")))?;
        Ok(start_of_day(next, tz)? - Duration::nanoseconds(1))
    } else {
        start_of_day(date, tz)
    }
}

fn start_of_day(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>, StatsError> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| StatsError::InvalidPeriod(date.to_string()))?;

    // Some zones skip midnight on DST changes; fall back to the first valid hour.
    (0..3)
        .find_map(|h| {
            tz.from_local_datetime(&(midnight + Duration::hours(h)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| StatsError::InvalidPeriod(format!("{date} has no midnight in {tz}")))
}
