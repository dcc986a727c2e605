//! Ingest bookkeeping.
//!
//! Tracks how much input the tool has processed, so a user can see what a
//! run actually consumed without keeping any post content.

pub mod log;

// Re-export commonly used types
pub use log::{IngestLog, IngestStats};
