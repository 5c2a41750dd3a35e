//! Data models for database records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored code review: the submitted code paired with the AI feedback
///
/// Records are immutable once written. The only lifecycle events are
/// creation (through [`crate::ReviewRepository::create`]) and deletion.
///
/// On the wire the identifier is exposed as a string under `_id` and the
/// timestamp as `createdAt`, which is the shape the browser client expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewRecord {
    /// Store-assigned identifier, unique and never reused
    #[serde(rename = "_id", with = "id_string")]
    pub id: i64,

    /// The submitted source code
    pub code: String,

    /// The AI-generated feedback
    pub response: String,

    /// When the review was stored
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A review that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewReview {
    /// The submitted source code
    pub code: String,

    /// The AI-generated feedback
    pub response: String,

    /// Creation timestamp; `None` means "now" at insert time
    pub created_at: Option<DateTime<Utc>>,
}

impl NewReview {
    /// Create a new review stamped at insert time
    pub fn new(code: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            response: response.into(),
            created_at: None,
        }
    }

    /// Use an explicit creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Parse a wire identifier into a record id
///
/// Returns `None` for anything that is not a positive integer.
pub fn parse_review_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

mod id_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_review_id(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid review id: {raw}")))
    }
}
