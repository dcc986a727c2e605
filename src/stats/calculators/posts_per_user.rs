//! Average number of posts per author.

use crate::post::SocialPost;
use crate::stats::calculator::Calculator;
use crate::stats::result::round2;
use std::collections::HashSet;

/// Running totals for [`AveragePostsPerUser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsPerUserState {
    /// Posts that had an author
    pub post_count: u64,
    /// Distinct author ids seen
    pub authors: HashSet<String>,
}

/// Mean number of posts per distinct author, rounded to two decimals.
///
/// Posts without an author (missing or empty id) are not counted at all.
/// With no authors the value is `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AveragePostsPerUser;

impl Calculator for AveragePostsPerUser {
    type State = PostsPerUserState;
    const UNITS: &'static str = "posts";

    fn accumulate(&self, mut state: Self::State, post: &SocialPost) -> Self::State {
        let Some(author) = post.author() else {
            return state;
        };

        state.post_count += 1;
        if !state.authors.contains(author) {
            state.authors.insert(author.to_string());
        }
        state
    }

    fn finalize(&self, state: &Self::State) -> f64 {
        let user_count = state.authors.len();
        if user_count == 0 {
            return 0.0;
        }
        round2(state.post_count as f64 / user_count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn feed(posts: &[SocialPost]) -> PostsPerUserState {
        posts
            .iter()
            .fold(PostsPerUserState::default(), |state, post| {
                AveragePostsPerUser.accumulate(state, post)
            })
    }

    fn post(author: Option<&str>) -> SocialPost {
        let post = SocialPost::new(Utc::now());
        match author {
            Some(author) => post.with_author(author),
            None => post,
        }
    }

    #[test]
    fn test_repeat_author_counted_once() {
        let state = feed(&[post(Some("user_1")), post(Some("user_2")), post(Some("user_1"))]);
        assert_eq!(state.post_count, 3);
        assert_eq!(state.authors.len(), 2);
        assert_eq!(AveragePostsPerUser.finalize(&state), 1.5);
    }

    #[test]
    fn test_authorless_posts_contribute_nothing() {
        let state = feed(&[post(None), post(Some("")), post(None)]);
        assert_eq!(state, PostsPerUserState::default());
        assert_eq!(AveragePostsPerUser.finalize(&state), 0.0);
    }

    #[test]
    fn test_author_ids_compared_exactly() {
        let state = feed(&[post(Some("user_1")), post(Some("User_1")), post(Some("user_1 "))]);
        assert_eq!(state.authors.len(), 3);
        assert_eq!(AveragePostsPerUser.finalize(&state), 1.0);
    }

    #[test]
    fn test_result_is_rounded() {
        let state = feed(&[
            post(Some("a")),
            post(Some("b")),
            post(Some("c")),
            post(Some("a")),
            post(Some("a")),
        ]);
        assert_eq!(AveragePostsPerUser.finalize(&state), 1.67);
    }
}
