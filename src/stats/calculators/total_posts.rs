//! Post count.

use crate::post::SocialPost;
use crate::stats::calculator::Calculator;

/// Number of posts that passed the filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalPosts;

impl Calculator for TotalPosts {
    type State = u64;
    const UNITS: &'static str = "posts";

    fn accumulate(&self, state: u64, _post: &SocialPost) -> u64 {
        state + 1
    }

    fn finalize(&self, state: &u64) -> f64 {
        *state as f64
    }
}
