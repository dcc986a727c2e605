//! Message length statistics.

use crate::post::SocialPost;
use crate::stats::calculator::Calculator;
use crate::stats::result::round2;

/// Sum and count of message lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthSum {
    pub total_chars: u64,
    pub messages: u64,
}

/// Mean message length in characters. Posts without a message are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AveragePostLength;

impl Calculator for AveragePostLength {
    type State = LengthSum;
    const UNITS: &'static str = "characters";

    fn accumulate(&self, mut state: LengthSum, post: &SocialPost) -> LengthSum {
        if let Some(len) = post.message_len() {
            state.total_chars += len as u64;
            state.messages += 1;
        }
        state
    }

    fn finalize(&self, state: &LengthSum) -> f64 {
        if state.messages == 0 {
            return 0.0;
        }
        round2(state.total_chars as f64 / state.messages as f64)
    }
}

/// Longest message length in characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxPostLength;

impl Calculator for MaxPostLength {
    type State = Option<usize>;
    const UNITS: &'static str = "characters";

    fn accumulate(&self, state: Option<usize>, post: &SocialPost) -> Option<usize> {
        match (state, post.message_len()) {
            (Some(max), Some(len)) => Some(max.max(len)),
            (None, len) => len,
            (max, None) => max,
        }
    }

    fn finalize(&self, state: &Option<usize>) -> f64 {
        state.unwrap_or(0) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn posts() -> Vec<SocialPost> {
        vec![
            SocialPost::new(Utc::now()).with_message("hello"),
            SocialPost::new(Utc::now()),
            SocialPost::new(Utc::now()).with_message("hi"),
            SocialPost::new(Utc::now()).with_message("ääää"),
        ]
    }

    #[test]
    fn test_average_length() {
        let state = posts()
            .iter()
            .fold(LengthSum::default(), |s, p| AveragePostLength.accumulate(s, p));
        assert_eq!(state.messages, 3);
        assert_eq!(state.total_chars, 11);
        assert_eq!(AveragePostLength.finalize(&state), 3.67);
    }

    #[test]
    fn test_average_length_without_messages() {
        let post = SocialPost::new(Utc::now());
        let state = AveragePostLength.accumulate(LengthSum::default(), &post);
        assert_eq!(AveragePostLength.finalize(&state), 0.0);
    }

    #[test]
    fn test_max_length() {
        let state = posts()
            .iter()
            .fold(None, |s, p| MaxPostLength.accumulate(s, p));
        assert_eq!(MaxPostLength.finalize(&state), 5.0);
        assert_eq!(MaxPostLength.finalize(&None), 0.0);
    }

    #[test]
    fn test_empty_message_counts_as_zero_length() {
        let post = SocialPost::new(Utc::now()).with_message("");
        assert_eq!(MaxPostLength.accumulate(None, &post), Some(0));
    }
}
