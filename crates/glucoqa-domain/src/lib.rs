//! Glucoqa Domain Layer
//!
//! This crate contains the question-answering core of Glucoqa: a fixed,
//! authored diabetes knowledge base, the resolver that matches free-text
//! questions against it, and the per-session conversation log that records
//! every resolved answer.
//!
//! ## Key Concepts
//!
//! - **Topic key**: short lowercase string identifying one knowledge-base subject
//! - **Knowledge base**: ordered, immutable list of topic entries plus a fallback
//! - **Answer record**: the personalized result of one question submission
//! - **Conversation log**: append-only, session-scoped history of answer records
//! - **Role**: closed set of user profiles, used only to pick a banner
//!
//! ## Control flow
//!
//! ```text
//! host → QueryResolver::resolve(question, role) → AnswerRecord
//!      → ConversationLog::append(record) → host renders record
//! ```
//!
//! The resolver owns no session state. The host creates one
//! [`ConversationLog`] per session and passes it around explicitly.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod conversation;
pub mod error;
pub mod knowledge;
pub mod record;
pub mod resolver;
pub mod role;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use conversation::ConversationLog;
pub use error::{KnowledgeBaseError, QueryError};
pub use knowledge::{FallbackEntry, KnowledgeBase, KnowledgeBaseEntry};
pub use record::{AnswerRecord, MatchedTopic, RecordId, NO_MATCH};
pub use resolver::{ensure_question, match_topic, QueryResolver};
pub use role::Role;
