//! Post record type consumed by the statistics calculators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single social media post.
///
/// Posts are immutable once built. Every field except `id` and `date` is
/// optional because upstream sources routinely omit them; calculators treat
/// missing data as "no contribution", never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    /// Source identifier of the post
    pub id: String,
    /// Author identifier (absent and empty both mean "no author")
    #[serde(default, alias = "from_id")]
    pub author_id: Option<String>,
    /// Post type as reported by the source (e.g. "status")
    #[serde(default, rename = "type")]
    pub post_type: Option<String>,
    /// When the post was created
    #[serde(alias = "created_time")]
    pub date: DateTime<Utc>,
    /// Post body text
    #[serde(default)]
    pub message: Option<String>,
}

impl SocialPost {
    /// Create a post with a fresh random id and no optional fields set.
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author_id: None,
            post_type: None,
            date,
            message: None,
        }
    }

    /// Set the author id.
    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    /// Set the post type.
    pub fn with_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = Some(post_type.into());
        self
    }

    /// Set the message body.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The author id, treating an empty string the same as a missing one.
    pub fn author(&self) -> Option<&str> {
        self.author_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Length of the message in characters, if there is one.
    pub fn message_len(&self) -> Option<usize> {
        self.message.as_deref().map(|m| m.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_author_is_no_author() {
        let post = SocialPost::new(Utc::now()).with_author("");
        assert_eq!(post.author(), None);

        let post = SocialPost::new(Utc::now());
        assert_eq!(post.author(), None);

        let post = SocialPost::new(Utc::now()).with_author("user_1");
        assert_eq!(post.author(), Some("user_1"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let now = Utc::now();
        assert_ne!(SocialPost::new(now).id, SocialPost::new(now).id);
    }

    #[test]
    fn test_message_len_counts_chars() {
        let post = SocialPost::new(Utc::now()).with_message("héllo");
        assert_eq!(post.message_len(), Some(5));
        assert_eq!(SocialPost::new(Utc::now()).message_len(), None);
    }

    #[test]
    fn test_deserialize_source_field_names() {
        let json = r#"{
            "id": "post_1",
            "from_id": "user_7",
            "type": "status",
            "created_time": "2024-03-05T10:00:00+00:00",
            "message": "hi"
        }"#;
        let post: SocialPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.author(), Some("user_7"));
        assert_eq!(post.post_type.as_deref(), Some("status"));
        assert_eq!(post.date.to_rfc3339(), "2024-03-05T10:00:00+00:00");
    }

    #[test]
    fn test_deserialize_missing_optional_fields() {
        let json = r#"{"id": "post_2", "date": "2024-03-05T10:00:00Z"}"#;
        let post: SocialPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.author_id, None);
        assert_eq!(post.post_type, None);
        assert_eq!(post.message, None);
    }
}
