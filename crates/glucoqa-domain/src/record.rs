//! Answer record module - the result of resolving one question

use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel topic key reported when no topic matched
pub const NO_MATCH: &str = "no match";

/// Unique identifier for an answer record based on UUIDv7
///
/// Ids generated in sequence sort chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a RecordId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use glucoqa_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// let parsed = RecordId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid record id: {}", e))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which knowledge-base topic answered a question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MatchedTopic {
    /// A topic key occurred in the question
    Topic(String),

    /// Nothing matched; the fallback entry answered
    NoMatch,
}

impl MatchedTopic {
    /// Topic key, or [`NO_MATCH`]
    pub fn key(&self) -> &str {
        match self {
            MatchedTopic::Topic(key) => key,
            MatchedTopic::NoMatch => NO_MATCH,
        }
    }

    /// Whether the fallback entry was used
    pub fn is_fallback(&self) -> bool {
        matches!(self, MatchedTopic::NoMatch)
    }
}

impl From<MatchedTopic> for String {
    fn from(matched: MatchedTopic) -> Self {
        match matched {
            MatchedTopic::Topic(key) => key,
            MatchedTopic::NoMatch => NO_MATCH.to_string(),
        }
    }
}

impl From<String> for MatchedTopic {
    fn from(key: String) -> Self {
        if key == NO_MATCH {
            MatchedTopic::NoMatch
        } else {
            MatchedTopic::Topic(key)
        }
    }
}

impl fmt::Display for MatchedTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The personalized answer to one question
///
/// Built once by the resolver and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    id: RecordId,
    question: String,
    role: Role,
    matched: MatchedTopic,
    answer_text: String,
    sources: Vec<String>,
    timestamp: u64,
}

impl AnswerRecord {
    pub(crate) fn new(
        question: String,
        role: Role,
        matched: MatchedTopic,
        answer_text: String,
        sources: Vec<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            id: RecordId::new(),
            question,
            role,
            matched,
            answer_text,
            sources,
            timestamp,
        }
    }

    /// Record identifier
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Question exactly as submitted
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Role the answer was personalized for
    pub fn role(&self) -> Role {
        self.role
    }

    /// Topic that answered the question
    pub fn matched(&self) -> &MatchedTopic {
        &self.matched
    }

    /// Matched topic key, or [`NO_MATCH`]
    pub fn matched_topic_key(&self) -> &str {
        self.matched.key()
    }

    /// Personalized text shown to the user
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    /// Citations backing the answer
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Creation time in milliseconds since Unix epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_chronological() {
        let id1 = RecordId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RecordId::new();
        assert!(id1 < id2, "Earlier UUIDv7 should sort first");
    }

    #[test]
    fn test_record_id_invalid_string() {
        assert!(RecordId::from_string("not-a-uuid").is_err());
        assert!(RecordId::from_string("").is_err());
    }

    #[test]
    fn test_matched_topic_keys() {
        assert_eq!(MatchedTopic::Topic("diet".into()).key(), "diet");
        assert_eq!(MatchedTopic::NoMatch.key(), NO_MATCH);
        assert!(MatchedTopic::NoMatch.is_fallback());
        assert!(!MatchedTopic::Topic("diet".into()).is_fallback());
    }

    #[test]
    fn test_record_json_shape() {
        let record = AnswerRecord::new(
            "diet tips".to_string(),
            Role::Patient,
            MatchedTopic::Topic("diet".to_string()),
            "text".to_string(),
            vec!["ADA".to_string()],
            1_700_000_000_000,
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["matched"], "diet");
        assert_eq!(value["role"], "patient");
        assert_eq!(value["timestamp"], 1_700_000_000_000u64);

        let back: AnswerRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_no_match_serializes_as_sentinel() {
        let value = serde_json::to_value(MatchedTopic::NoMatch).unwrap();
        assert_eq!(value, "no match");
    }
}
