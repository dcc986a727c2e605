//! Post records and the sources that supply them.
//!
//! The statistics core only ever sees [`SocialPost`] values; how they are
//! fetched lives here.

pub mod source;
pub mod types;

// Re-export commonly used types
pub use source::{read_posts, Input, PostReader, SourceError, SourceEvent};
pub use types::SocialPost;
