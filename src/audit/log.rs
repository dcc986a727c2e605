//! Ingest counters with optional persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the current session, optionally carried over between runs.
#[derive(Debug)]
pub struct IngestLog {
    /// Posts parsed from input
    posts_read: AtomicU64,
    /// Input lines that could not be parsed
    malformed_lines: AtomicU64,
    /// Statistic results produced
    results_computed: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting stats
    persist_path: Option<PathBuf>,
}

impl IngestLog {
    /// Create a new ingest log.
    pub fn new() -> Self {
        Self {
            posts_read: AtomicU64::new(0),
            malformed_lines: AtomicU64::new(0),
            results_computed: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create an ingest log that loads and saves cumulative counters.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut log = Self::new();
        log.persist_path = Some(path);

        if let Err(e) = log.load() {
            tracing::warn!("Could not load previous ingest stats: {}", e);
        }

        log
    }

    /// Record a parsed post.
    pub fn record_post(&self) {
        self.posts_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an unparseable input line.
    pub fn record_malformed(&self) {
        self.malformed_lines.fetch_add(1, Ordering::Relaxed);
    }

    /// Record produced results.
    pub fn record_results(&self, count: u64) {
        self.results_computed.fetch_add(count, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> IngestStats {
        IngestStats {
            posts_read: self.posts_read.load(Ordering::Relaxed),
            malformed_lines: self.malformed_lines.load(Ordering::Relaxed),
            results_computed: self.results_computed.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Ingest Statistics:\n\
             - Posts read: {}\n\
             - Malformed lines skipped: {}\n\
             - Results computed: {}",
            stats.posts_read, stats.malformed_lines, stats.results_computed
        )
    }

    /// Save stats to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.stats();
            let persisted = PersistedStats {
                posts_read: stats.posts_read,
                malformed_lines: stats.malformed_lines,
                results_computed: stats.results_computed,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load stats from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.posts_read
                    .store(persisted.posts_read, Ordering::Relaxed);
                self.malformed_lines
                    .store(persisted.malformed_lines, Ordering::Relaxed);
                self.results_computed
                    .store(persisted.results_computed, Ordering::Relaxed);
            }
        }
        Ok(())
    }
}

impl Default for IngestLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of ingest statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestStats {
    pub posts_read: u64,
    pub malformed_lines: u64,
    pub results_computed: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Stats format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    posts_read: u64,
    malformed_lines: u64,
    results_computed: u64,
    last_updated: DateTime<Utc>,
}
