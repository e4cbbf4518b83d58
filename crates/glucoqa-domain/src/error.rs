//! Error types for the domain layer

use thiserror::Error;

/// Errors raised while loading authored knowledge-base content.
///
/// These are data errors, not request errors: a knowledge base that fails to
/// load means the process cannot start.
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    /// Content is not valid TOML or does not have the expected shape
    #[error("Failed to parse knowledge base: {0}")]
    Parse(#[from] toml::de::Error),

    /// No topics were declared
    #[error("Knowledge base declares no topics")]
    Empty,

    /// Topic key is empty or not lowercase
    #[error("Invalid topic key {key:?}: {reason}")]
    InvalidKey {
        /// Offending key as authored
        key: String,
        /// Description of the issue
        reason: &'static str,
    },

    /// Same topic key declared twice
    #[error("Duplicate topic key: {0:?}")]
    DuplicateKey(String),

    /// Topic declared with no answer text
    #[error("Topic {0:?} has empty answer text")]
    EmptyAnswer(String),

    /// Fallback text cannot embed the question
    #[error("Fallback text must contain the {{question}} placeholder")]
    MissingPlaceholder,
}

/// Precondition failures detected by the host before resolving
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Question is empty or whitespace-only
    #[error("Question cannot be empty")]
    EmptyQuestion,
}
