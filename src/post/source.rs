//! JSON-lines post source.
//!
//! Posts are parsed on a background thread and handed to the consumer over a
//! bounded channel, so the full dataset is never held in memory. Lines that
//! fail to parse are reported as [`SourceEvent::Malformed`] and skipped.

use crate::post::types::SocialPost;
use crossbeam_channel::{bounded, Receiver};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

/// Where posts are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Interpret a CLI argument; `-` means stdin.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(arg))
        }
    }
}

/// One item produced by the reader.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    Post(SocialPost),
    Malformed { line: usize, error: String },
}

/// Errors that can occur opening a post source.
#[derive(Debug)]
pub enum SourceError {
    Io(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io(e) => write!(f, "Could not open input: {e}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Reads posts on a background thread.
pub struct PostReader {
    receiver: Receiver<SourceEvent>,
    handle: Option<JoinHandle<()>>,
}

impl PostReader {
    /// Open the given input and start reading it.
    pub fn open(input: &Input, capacity: usize) -> Result<Self, SourceError> {
        match input {
            Input::Stdin => Ok(Self::spawn(BufReader::new(std::io::stdin()), capacity)),
            Input::File(path) => {
                let file = File::open(path)
                    .map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))?;
                Ok(Self::spawn(BufReader::new(file), capacity))
            }
        }
    }

    /// Start reading lines from any buffered reader.
    pub fn spawn<R>(reader: R, capacity: usize) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (sender, receiver) = bounded(capacity.max(1));

        let handle = thread::spawn(move || {
            for (idx, line) in reader.split(b'\n').enumerate() {
                let event = match line {
                    Ok(bytes) => match parse_bytes(idx + 1, &bytes) {
                        Some(event) => event,
                        None => continue,
                    },
                    Err(e) => {
                        tracing::warn!("Stopping input read at line {}: {}", idx + 1, e);
                        break;
                    }
                };

                // Consumer went away (e.g. Ctrl+C); nothing left to do.
                if sender.send(event).is_err() {
                    break;
                }
            }
            tracing::debug!("Post reader finished");
        });

        Self {
            receiver,
            handle: Some(handle),
        }
    }

    /// Get the receiver for source events.
    pub fn receiver(&self) -> &Receiver<SourceEvent> {
        &self.receiver
    }

    /// Wait for the reader thread to exit.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Post reader thread panicked");
            }
        }
    }
}

/// Parse one raw input line. Bytes that are not UTF-8 are reported as
/// malformed like any other unparseable line.
pub fn parse_bytes(line_no: usize, bytes: &[u8]) -> Option<SourceEvent> {
    match std::str::from_utf8(bytes) {
        Ok(line) => parse_line(line_no, line),
        Err(e) => {
            tracing::warn!("Skipping non-UTF-8 input on line {}: {}", line_no, e);
            Some(SourceEvent::Malformed {
                line: line_no,
                error: e.to_string(),
            })
        }
    }
}

/// Parse one JSON line. Blank lines yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Option<SourceEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<SocialPost>(trimmed) {
        Ok(post) => Some(SourceEvent::Post(post)),
        Err(e) => {
            tracing::warn!("Skipping malformed post on line {}: {}", line_no, e);
            Some(SourceEvent::Malformed {
                line: line_no,
                error: e.to_string(),
            })
        }
    }
}

/// Read posts synchronously from a buffered reader, skipping malformed lines.
pub fn read_posts<R: BufRead>(reader: R) -> impl Iterator<Item = SocialPost> {
    reader
        .split(b'\n')
        .map_while(Result::ok)
        .enumerate()
        .filter_map(|(idx, bytes)| match parse_bytes(idx + 1, &bytes) {
            Some(SourceEvent::Post(post)) => Some(post),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const INPUT: &str = r#"{"id":"1","author_id":"user_1","type":"status","date":"2024-03-02T00:00:00Z"}

not json
{"id":"2","author_id":"user_2","type":"status","date":"2024-03-03T00:00:00Z"}
"#;

    #[test]
    fn test_parse_blank_line() {
        assert!(parse_line(1, "   ").is_none());
    }

    #[test]
    fn test_parse_malformed_line() {
        match parse_line(7, "{\"id\": 1") {
            Some(SourceEvent::Malformed { line, .. }) => assert_eq!(line, 7),
            other => panic!("expected malformed event, got {other:?}"),
        }
    }

    #[test]
    fn test_read_posts_skips_bad_lines() {
        let posts: Vec<SocialPost> = read_posts(Cursor::new(INPUT)).collect();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[1].author(), Some("user_2"));
    }

    #[test]
    fn test_reader_thread_reports_events() {
        let reader = PostReader::spawn(Cursor::new(INPUT), 1);
        let events: Vec<SourceEvent> = reader.receiver().iter().collect();
        reader.join();

        let posts = events
            .iter()
            .filter(|e| matches!(e, SourceEvent::Post(_)))
            .count();
        let malformed: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                SourceEvent::Malformed { line, .. } => Some(*line),
                _ => None,
            })
            .collect();

        assert_eq!(posts, 2);
        assert_eq!(malformed, vec![3]);
    }

    fn input_with_invalid_utf8() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(
            br#"{"id":"1","author_id":"user_1","date":"2024-03-02T00:00:00Z"}"#,
        );
        bytes.extend_from_slice(b"\n\xff\xfe garbage\r\n");
        bytes.extend_from_slice(
            br#"{"id":"2","author_id":"user_2","date":"2024-03-03T00:00:00Z"}"#,
        );
        bytes.push(b'\n');
        bytes
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        match parse_bytes(4, b"\xff\xfe") {
            Some(SourceEvent::Malformed { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected malformed event, got {other:?}"),
        }
    }

    #[test]
    fn test_read_posts_continues_after_invalid_utf8() {
        let posts: Vec<SocialPost> = read_posts(Cursor::new(input_with_invalid_utf8())).collect();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, "2");
    }

    #[test]
    fn test_reader_thread_counts_invalid_utf8_as_malformed() {
        let reader = PostReader::spawn(Cursor::new(input_with_invalid_utf8()), 4);
        let events: Vec<SourceEvent> = reader.receiver().iter().collect();
        reader.join();

        let posts = events
            .iter()
            .filter(|e| matches!(e, SourceEvent::Post(_)))
            .count();
        let malformed: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                SourceEvent::Malformed { line, .. } => Some(*line),
                _ => None,
            })
            .collect();

        assert_eq!(posts, 2);
        assert_eq!(malformed, vec![2]);
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(INPUT.as_bytes()).unwrap();

        let reader = PostReader::open(&Input::File(file.path().to_path_buf()), 16).unwrap();
        let count = reader.receiver().iter().count();
        reader.join();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_open_missing_file() {
        let input = Input::File(PathBuf::from("/definitely/not/here.jsonl"));
        assert!(PostReader::open(&input, 16).is_err());
    }

    #[test]
    fn test_input_from_arg() {
        assert_eq!(Input::from_arg("-"), Input::Stdin);
        assert_eq!(
            Input::from_arg("posts.jsonl"),
            Input::File(PathBuf::from("posts.jsonl"))
        );
    }
}
