//! The calculator contract and the run lifecycle around it.
//!
//! A [`Calculator`] only describes how to fold accepted posts into its state
//! and how to reduce that state to a number. Filtering, naming the result and
//! enforcing accumulate-then-finalize ordering happen here, once, for every
//! statistic:
//!
//! ```text
//! post ──▶ filter::accepts ──▶ Calculator::accumulate ──▶ State
//!                                                          │
//!                         StatResult ◀── finalize_result ◀─┘
//! ```

use crate::post::SocialPost;
use crate::stats::error::StatsError;
use crate::stats::filter;
use crate::stats::params::{StatName, StatParams};
use crate::stats::result::StatResult;

/// A pluggable metric.
///
/// Implementations keep all running state in `State` and never look at the
/// run parameters; by the time `accumulate` sees a post it has already passed
/// the filter.
pub trait Calculator {
    /// Running aggregate; `Default` is the empty state.
    type State: Default;

    /// Units label attached to results.
    const UNITS: &'static str;

    /// Fold one accepted post into the state.
    fn accumulate(&self, state: Self::State, post: &SocialPost) -> Self::State;

    /// Reduce the state to the statistic's value.
    fn finalize(&self, state: &Self::State) -> f64;
}

/// Filter a post and, if accepted, fold it into `state`.
pub fn accumulate_data<C: Calculator>(
    calculator: &C,
    params: &StatParams,
    state: C::State,
    post: &SocialPost,
) -> C::State {
    if filter::accepts(params, post) {
        calculator.accumulate(state, post)
    } else {
        tracing::trace!("Post {} rejected for {}", post.id, params.stat_name);
        state
    }
}

/// Finalize `state` into a named result.
pub fn finalize_result<C: Calculator>(
    calculator: &C,
    params: &StatParams,
    state: &C::State,
) -> StatResult {
    StatResult::new(params.stat_name, calculator.finalize(state), C::UNITS)
}

/// Run a calculator over a whole stream of posts.
pub fn run<'a, C, I>(calculator: &C, params: &StatParams, posts: I) -> StatResult
where
    C: Calculator,
    I: IntoIterator<Item = &'a SocialPost>,
{
    let state = posts.into_iter().fold(C::State::default(), |state, post| {
        accumulate_data(calculator, params, state, post)
    });
    finalize_result(calculator, params, &state)
}

/// One statistics pass: parameters, calculator and its running state.
///
/// Not meant to be shared between threads or reused after `calculate()`.
pub struct StatRun<C: Calculator> {
    calculator: C,
    params: Option<StatParams>,
    state: C::State,
}

impl<C: Calculator> StatRun<C> {
    /// Start a run with empty state and no parameters.
    pub fn new(calculator: C) -> Self {
        Self {
            calculator,
            params: None,
            state: C::State::default(),
        }
    }

    /// Set the run parameters. Call once, before the first post.
    pub fn set_parameters(mut self, params: StatParams) -> Self {
        tracing::debug!("Configured {} run: {:?}", params.stat_name, params);
        self.params = Some(params);
        self
    }

    /// The parameters, if set.
    pub fn parameters(&self) -> Option<&StatParams> {
        self.params.as_ref()
    }

    /// Feed one post. Rejected posts leave the state untouched.
    ///
    /// Without parameters nothing can be accepted, so the post is ignored.
    pub fn accumulate_data(&mut self, post: &SocialPost) {
        let Some(ref params) = self.params else {
            tracing::warn!("Post {} fed before parameters were set", post.id);
            return;
        };

        let state = std::mem::take(&mut self.state);
        self.state = accumulate_data(&self.calculator, params, state, post);
    }

    /// Produce the result from everything accumulated so far.
    pub fn calculate(&self) -> Result<StatResult, StatsError> {
        let params = self.params.as_ref().ok_or(StatsError::MissingParameters)?;
        Ok(finalize_result(&self.calculator, params, &self.state))
    }

    /// Current running state.
    pub fn state(&self) -> &C::State {
        &self.state
    }
}

/// Object-safe view of a [`StatRun`], so a caller can fan one post stream out
/// to calculators of different types.
pub trait StatAccumulator {
    /// Statistic this accumulator computes, once parameters are set.
    fn stat_name(&self) -> Option<StatName>;
    /// Filter one post and fold it in if accepted.
    fn accumulate_data(&mut self, post: &SocialPost);
    /// Finalize everything accumulated so far.
    fn calculate(&self) -> Result<StatResult, StatsError>;
}

impl<C: Calculator> StatAccumulator for StatRun<C> {
    fn stat_name(&self) -> Option<StatName> {
        self.params.as_ref().map(|p| p.stat_name)
    }

    fn accumulate_data(&mut self, post: &SocialPost) {
        StatRun::accumulate_data(self, post);
    }

    fn calculate(&self) -> Result<StatResult, StatsError> {
        StatRun::calculate(self)
    }
}
