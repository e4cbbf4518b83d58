//! Knowledge base - the fixed table of authored answers
//!
//! Topics keep the order in which they are declared. That order is part of
//! the contract: the resolver picks the first declared topic whose key occurs
//! in the question.

use crate::error::KnowledgeBaseError;
use crate::record::NO_MATCH;
use serde::Deserialize;
use std::collections::HashSet;

/// Built-in authored content, embedded at compile time
const BUILTIN: &str = include_str!("../data/knowledge_base.toml");

/// Placeholder the fallback text uses to embed the asked question
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// One authored answer for a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBaseEntry {
    key: String,
    text: String,
    sources: Vec<String>,
}

impl KnowledgeBaseEntry {
    /// Topic key (lowercase, unique within the knowledge base)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Authored answer text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Citations for the answer, in authored order; may be empty
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

/// Generic answer used when no topic matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackEntry {
    template: String,
    sources: Vec<String>,
}

impl FallbackEntry {
    /// Render the fallback text for a question, embedding it verbatim
    pub fn render(&self, question: &str) -> String {
        self.template.replace(QUESTION_PLACEHOLDER, question)
    }

    /// Generic citation list
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

/// Immutable, ordered set of topic entries plus the fallback entry
///
/// There is no mutation API; share it across sessions behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeBaseEntry>,
    fallback: FallbackEntry,
}

#[derive(Debug, Deserialize)]
struct RawKnowledgeBase {
    #[serde(default)]
    topics: Vec<RawTopic>,
    fallback: RawFallback,
}

#[derive(Debug, Deserialize)]
struct RawTopic {
    key: String,
    text: String,
    #[serde(default)]
    sources: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawFallback {
    text: String,
    #[serde(default)]
    sources: Vec<String>,
}

impl KnowledgeBase {
    /// Load the built-in knowledge base
    ///
    /// Only fails if the embedded content is malformed, which is a build
    /// problem rather than a runtime condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use glucoqa_domain::KnowledgeBase;
    ///
    /// let kb = KnowledgeBase::load().unwrap();
    /// assert_eq!(kb.entries()[0].key(), "blood sugar");
    /// ```
    pub fn load() -> Result<Self, KnowledgeBaseError> {
        Self::from_toml(BUILTIN)
    }

    /// Parse and validate authored content from a TOML document
    ///
    /// # Errors
    /// Returns an error if the document does not parse, declares no topics,
    /// has an empty, non-lowercase, reserved or duplicate key, has a topic without
    /// text, or the fallback text lacks the `{question}` placeholder.
    pub fn from_toml(content: &str) -> Result<Self, KnowledgeBaseError> {
        let raw: RawKnowledgeBase = toml::from_str(content)?;

        if raw.topics.is_empty() {
            return Err(KnowledgeBaseError::Empty);
        }

        let mut seen = HashSet::with_capacity(raw.topics.len());
        let mut entries = Vec::with_capacity(raw.topics.len());

        for topic in raw.topics {
            validate_key(&topic.key)?;
            if !seen.insert(topic.key.clone()) {
                return Err(KnowledgeBaseError::DuplicateKey(topic.key));
            }

            // Authoring whitespace around multi-line strings is not content
            let text = topic.text.trim();
            if text.is_empty() {
                return Err(KnowledgeBaseError::EmptyAnswer(topic.key));
            }

            entries.push(KnowledgeBaseEntry {
                text: text.to_string(),
                key: topic.key,
                sources: topic.sources,
            });
        }

        if !raw.fallback.text.contains(QUESTION_PLACEHOLDER) {
            return Err(KnowledgeBaseError::MissingPlaceholder);
        }

        tracing::debug!(topics = entries.len(), "Knowledge base loaded");

        Ok(Self {
            entries,
            fallback: FallbackEntry {
                template: raw.fallback.text.trim().to_string(),
                sources: raw.fallback.sources,
            },
        })
    }

    /// All topic entries in declared order
    pub fn entries(&self) -> &[KnowledgeBaseEntry] {
        &self.entries
    }

    /// Look up an entry by its exact topic key
    pub fn get(&self, key: &str) -> Option<&KnowledgeBaseEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Topic keys in declared order
    pub fn topic_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// The no-match entry
    pub fn fallback(&self) -> &FallbackEntry {
        &self.fallback
    }

    /// Number of topics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no topics (never true for a loaded knowledge base)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_key(key: &str) -> Result<(), KnowledgeBaseError> {
    if key.trim().is_empty() {
        return Err(KnowledgeBaseError::InvalidKey {
            key: key.to_string(),
            reason: "key cannot be empty",
        });
    }
    // Questions are lowercased before matching, so an uppercase key never matches
    if key.to_lowercase() != key {
        return Err(KnowledgeBaseError::InvalidKey {
            key: key.to_string(),
            reason: "key must be lowercase",
        });
    }
    // Reserved for records answered by the fallback entry
    if key == NO_MATCH {
        return Err(KnowledgeBaseError::InvalidKey {
            key: key.to_string(),
            reason: "key is reserved for unmatched questions",
        });
    }
    Ok(())
}
