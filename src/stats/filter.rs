//! Post filtering shared by every calculator.

use crate::post::SocialPost;
use crate::stats::params::StatParams;

/// Decide whether a post qualifies for a run.
///
/// Pure: the same post and parameters always give the same answer. Both date
/// bounds are inclusive; an unset bound or type filter accepts everything on
/// that dimension.
pub fn accepts(params: &StatParams, post: &SocialPost) -> bool {
    if let Some(start) = params.start_date {
        if post.date < start {
            return false;
        }
    }

    if let Some(end) = params.end_date {
        if post.date > end {
            return false;
        }
    }

    if let Some(ref wanted) = params.post_type {
        if post.post_type.as_deref() != Some(wanted.as_str()) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::params::StatName;
    use chrono::{Duration, TimeZone, Utc};

    fn params() -> StatParams {
        StatParams::new(StatName::TotalPosts)
            .with_start_date(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
            .with_end_date(Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap())
    }

    #[test]
    fn test_no_bounds_accepts_any_date() {
        let params = StatParams::new(StatName::TotalPosts);
        for year in [1970, 2000, 2024, 2100] {
            let post = SocialPost::new(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap());
            assert!(accepts(&params, &post));
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let params = params();
        let start = params.start_date.unwrap();
        let end = params.end_date.unwrap();

        assert!(accepts(&params, &SocialPost::new(start)));
        assert!(accepts(&params, &SocialPost::new(end)));
        assert!(!accepts(&params, &SocialPost::new(start - Duration::nanoseconds(1))));
        assert!(!accepts(&params, &SocialPost::new(end + Duration::nanoseconds(1))));
        assert!(!accepts(&params, &SocialPost::new(start - Duration::microseconds(1))));
        assert!(!accepts(&params, &SocialPost::new(end + Duration::microseconds(1))));
    }

    #[test]
    fn test_post_type_filter() {
        let params = StatParams::new(StatName::TotalPosts).with_post_type("status");
        let now = Utc::now();

        assert!(accepts(&params, &SocialPost::new(now).with_type("status")));
        assert!(!accepts(&params, &SocialPost::new(now).with_type("photo")));
        assert!(!accepts(&params, &SocialPost::new(now)));
    }

    #[test]
    fn test_inverted_bounds_reject_everything() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let params = StatParams::new(StatName::TotalPosts)
            .with_start_date(start)
            .with_end_date(end);

        assert!(!accepts(&params, &SocialPost::new(start)));
        assert!(!accepts(&params, &SocialPost::new(end)));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let params = params();
        let inside = SocialPost::new(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        let outside = SocialPost::new(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap());

        assert_eq!(accepts(&params, &inside), accepts(&params, &inside));
        assert_eq!(accepts(&params, &outside), accepts(&params, &outside));
    }
}
