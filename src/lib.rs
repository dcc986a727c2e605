//! post-stats - streaming statistics over social media posts.
//!
//! Posts are consumed one at a time and folded into small running
//! aggregates; the full dataset is never held in memory. Each statistic is a
//! [`stats::Calculator`] with two extension points (accumulate and finalize).
//! Date window and post-type filtering are applied once, before any
//! calculator sees a post.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         post-stats                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │ PostReader  │──▶│   Filter    │──▶│ Calculator  │       │
//! │  │ (jsonl)     │   │ (params)    │   │ (state)     │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │         │                                    │              │
//! │         ▼                                    ▼              │
//! │  ┌─────────────┐                     ┌─────────────┐       │
//! │  │ Ingest Log  │                     │ StatResult  │       │
//! │  └─────────────┘                     └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use post_stats::post::SocialPost;
//! use post_stats::stats::calculators::AveragePostsPerUser;
//! use post_stats::stats::{StatName, StatParams, StatRun};
//!
//! let mut stat_run = StatRun::new(AveragePostsPerUser)
//!     .set_parameters(StatParams::new(StatName::AveragePostsPerUser));
//!
//! for author in ["user_1", "user_2", "user_1"] {
//!     stat_run.accumulate_data(&SocialPost::new(Utc::now()).with_author(author));
//! }
//!
//! assert_eq!(stat_run.calculate().unwrap().value, 1.5);
//! ```

pub mod audit;
pub mod config;
pub mod post;
pub mod stats;

// Re-export key types at crate root for convenience
pub use audit::{IngestLog, IngestStats};
pub use config::{Config, ConfigError, OutputFormat};
pub use post::{Input, PostReader, SocialPost, SourceEvent};
pub use stats::{
    accumulator_for, Calculator, ReportingPeriod, StatAccumulator, StatName, StatParams,
    StatResult, StatRun, StatsError,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
