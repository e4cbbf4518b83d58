//! Per-session state: who is asking and what has been asked.

use crate::error::Result;
use glucoqa_domain::{ensure_question, AnswerRecord, ConversationLog, KnowledgeBase, QueryResolver, Role};
use std::sync::Arc;
use tracing::info;

/// One user session.
///
/// Owns its conversation log; the knowledge base is shared with any other
/// session through the resolver's `Arc`.
pub struct Session {
    resolver: QueryResolver,
    log: ConversationLog,
    role: Role,
}

impl Session {
    /// Start a session against a shared knowledge base.
    pub fn new(knowledge_base: Arc<KnowledgeBase>, role: Role) -> Self {
        info!(role = %role, topics = knowledge_base.len(), "Session started");
        Self {
            resolver: QueryResolver::new(knowledge_base),
            log: ConversationLog::new(),
            role,
        }
    }

    /// Validate, resolve and log a question; returns the new record.
    pub fn ask(&mut self, question: &str) -> Result<AnswerRecord> {
        let question = ensure_question(question)?;
        let record = self.resolver.resolve(question, self.role);
        self.log.append(record.clone());
        Ok(record)
    }

    /// Current role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Switch the role used for subsequent questions.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Conversation so far.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Knowledge base in use.
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        self.resolver.knowledge_base()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!(questions = self.log.len(), "Session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn session() -> Session {
        Session::new(Arc::new(KnowledgeBase::load().unwrap()), Role::Patient)
    }

    #[test]
    fn test_ask_appends_to_log() {
        let mut session = session();
        let record = session.ask("What is HbA1c?").unwrap();

        assert_eq!(record.matched_topic_key(), "hba1c");
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().last(), Some(&record));
    }

    #[test]
    fn test_blank_question_rejected_and_not_logged() {
        let mut session = session();
        let result = session.ask("   ");

        assert!(matches!(result, Err(CliError::Query(_))));
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_role_switch_applies_to_next_question() {
        let mut session = session();
        session.ask("diet").unwrap();
        session.set_role(Role::HealthcareProfessional);
        let record = session.ask("diet").unwrap();

        assert_eq!(record.role(), Role::HealthcareProfessional);
        assert_eq!(session.log().all()[0].role(), Role::Patient);
    }
}
