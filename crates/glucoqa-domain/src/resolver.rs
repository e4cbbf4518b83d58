//! Query resolver - maps a question and a role to an answer record
//!
//! Matching is plain substring containment against the lowercased question,
//! in declared topic order. It is not token-aware: "hba1cs" matches "hba1c",
//! and a question naming several topics is answered by the first declared one.

use crate::clock::{Clock, SystemClock};
use crate::error::QueryError;
use crate::knowledge::{KnowledgeBase, KnowledgeBaseEntry};
use crate::record::{AnswerRecord, MatchedTopic};
use crate::role::Role;
use std::sync::Arc;
use tracing::debug;

/// Find the first declared entry whose key occurs in `normalized`
///
/// `normalized` must already be lowercased.
pub fn match_topic<'kb>(kb: &'kb KnowledgeBase, normalized: &str) -> Option<&'kb KnowledgeBaseEntry> {
    kb.entries().iter().find(|entry| normalized.contains(entry.key()))
}

/// Reject empty or whitespace-only questions
///
/// This is the host's precondition check. [`QueryResolver::resolve`] itself
/// accepts any string.
pub fn ensure_question(question: &str) -> Result<&str, QueryError> {
    if question.trim().is_empty() {
        Err(QueryError::EmptyQuestion)
    } else {
        Ok(question)
    }
}

/// Resolves questions against a shared knowledge base
///
/// Holds no session state; the caller decides what to do with each record.
pub struct QueryResolver<C: Clock = SystemClock> {
    knowledge_base: Arc<KnowledgeBase>,
    clock: C,
}

impl QueryResolver<SystemClock> {
    /// Create a resolver stamping records with the system clock
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self::with_clock(knowledge_base, SystemClock::new())
    }
}

impl<C: Clock> QueryResolver<C> {
    /// Create a resolver with a specific clock
    pub fn with_clock(knowledge_base: Arc<KnowledgeBase>, clock: C) -> Self {
        Self {
            knowledge_base,
            clock,
        }
    }

    /// The knowledge base this resolver reads
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Resolve a question for a role
    ///
    /// Never fails: when no topic key occurs in the question, the fallback
    /// entry answers, embedding the question verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use glucoqa_domain::{KnowledgeBase, QueryResolver, Role};
    /// use std::sync::Arc;
    ///
    /// let resolver = QueryResolver::new(Arc::new(KnowledgeBase::load().unwrap()));
    /// let record = resolver.resolve("What are normal blood sugar levels?", Role::Patient);
    /// assert_eq!(record.matched_topic_key(), "blood sugar");
    /// ```
    pub fn resolve(&self, question: &str, role: Role) -> AnswerRecord {
        let normalized = question.to_lowercase();

        let (matched, base_text, sources) = match match_topic(&self.knowledge_base, &normalized) {
            Some(entry) => (
                MatchedTopic::Topic(entry.key().to_string()),
                entry.text().to_string(),
                entry.sources().to_vec(),
            ),
            None => {
                let fallback = self.knowledge_base.fallback();
                (
                    MatchedTopic::NoMatch,
                    fallback.render(question),
                    fallback.sources().to_vec(),
                )
            }
        };

        debug!(role = %role, matched = %matched, "Resolved question");

        let answer_text = personalize(&base_text, role);

        AnswerRecord::new(
            question.to_string(),
            role,
            matched,
            answer_text,
            sources,
            self.clock.now_millis(),
        )
    }
}

fn personalize(base_text: &str, role: Role) -> String {
    format!("{}\n\n{}", role.banner(), base_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::record::NO_MATCH;

    fn resolver() -> QueryResolver<FixedClock> {
        let kb = Arc::new(KnowledgeBase::load().unwrap());
        QueryResolver::with_clock(kb, FixedClock(1_000))
    }

    #[test]
    fn test_blood_sugar_match() {
        let record = resolver().resolve("What are normal blood sugar levels?", Role::Patient);
        assert_eq!(record.matched_topic_key(), "blood sugar");
        assert!(record.answer_text().contains("80-130 mg/dL"));
        assert_eq!(record.timestamp(), 1_000);
    }

    #[test]
    fn test_case_folding() {
        let record = resolver().resolve("HOW OFTEN SHOULD I EXERCISE", Role::HealthcareProfessional);
        assert_eq!(record.matched_topic_key(), "exercise");
        assert!(record.answer_text().starts_with(Role::HealthcareProfessional.banner()));
        assert!(record.answer_text().contains("Clinical"));
    }

    #[test]
    fn test_question_kept_verbatim() {
        let record = resolver().resolve("  What is HbA1c?  ", Role::Student);
        assert_eq!(record.question(), "  What is HbA1c?  ");
        assert_eq!(record.matched_topic_key(), "hba1c");
    }

    #[test]
    fn test_first_declared_topic_wins() {
        // "hba1c" and "blood sugar" both occur; "blood sugar" is declared first
        let record = resolver().resolve("Is my hba1c related to blood sugar?", Role::Patient);
        assert_eq!(record.matched_topic_key(), "blood sugar");

        let record = resolver().resolve("diet and exercise plan", Role::Patient);
        assert_eq!(record.matched_topic_key(), "diet");
    }

    #[test]
    fn test_substring_not_token_aware() {
        let record = resolver().resolve("compare my hba1cs", Role::Patient);
        assert_eq!(record.matched_topic_key(), "hba1c");

        let record = resolver().resolve("any symptoms to watch?", Role::Patient);
        assert_eq!(record.matched_topic_key(), "symptom");
    }

    #[test]
    fn test_fallback_embeds_original_question() {
        let record = resolver().resolve("Tell me about DINOSAURS", Role::Patient);
        assert_eq!(record.matched_topic_key(), NO_MATCH);
        assert!(record.matched().is_fallback());
        assert!(record.answer_text().contains("Tell me about DINOSAURS"));
        assert_eq!(record.sources(), resolver().knowledge_base().fallback().sources());
    }

    #[test]
    fn test_empty_question_still_answers() {
        let record = resolver().resolve("", Role::Caregiver);
        assert_eq!(record.matched_topic_key(), NO_MATCH);
        assert!(!record.answer_text().is_empty());
    }

    #[test]
    fn test_entry_sources_copied() {
        let r = resolver();
        let record = r.resolve("medication options", Role::Patient);
        assert_eq!(record.sources(), r.knowledge_base().get("medication").unwrap().sources());
    }

    #[test]
    fn test_non_clinical_roles_share_banner() {
        let r = resolver();
        let patient = r.resolve("diet", Role::Patient);
        let caregiver = r.resolve("diet", Role::Caregiver);
        assert_eq!(patient.answer_text(), caregiver.answer_text());

        let clinician = r.resolve("diet", Role::HealthcareProfessional);
        assert_ne!(patient.answer_text(), clinician.answer_text());
    }

    #[test]
    fn test_match_topic_direct() {
        let kb = KnowledgeBase::load().unwrap();
        assert_eq!(match_topic(&kb, "low blood sugar").map(|e| e.key()), Some("blood sugar"));
        assert!(match_topic(&kb, "what should i eat with diabetes?").is_none());
        // Matching expects a lowercased question
        assert!(match_topic(&kb, "DIET").is_none());
    }

    #[test]
    fn test_ensure_question() {
        assert_eq!(ensure_question("diet?"), Ok("diet?"));
        assert_eq!(ensure_question(""), Err(QueryError::EmptyQuestion));
        assert_eq!(ensure_question(" \t\n"), Err(QueryError::EmptyQuestion));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::record::NO_MATCH;
    use proptest::prelude::*;

    fn kb() -> Arc<KnowledgeBase> {
        Arc::new(KnowledgeBase::load().unwrap())
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    proptest! {
        /// Property: every string resolves to a non-empty answer
        #[test]
        fn test_resolve_is_total(question in ".*", role in any_role()) {
            let resolver = QueryResolver::with_clock(kb(), FixedClock(0));
            let record = resolver.resolve(&question, role);
            prop_assert!(!record.answer_text().is_empty());
            prop_assert_eq!(record.question(), question.as_str());
            prop_assert_eq!(record.role(), role);
        }

        /// Property: a matched record names the first declared key found in the question
        #[test]
        fn test_match_is_first_declared(prefix in "[a-z ]{0,12}", idx in 0usize..6, suffix in "[a-z ]{0,12}") {
            let kb = kb();
            let key = kb.entries()[idx].key().to_string();
            let question = format!("{}{}{}", prefix, key.to_uppercase(), suffix);
            let normalized = question.to_lowercase();
            let expected = kb
                .entries()
                .iter()
                .find(|e| normalized.contains(e.key()))
                .map(|e| e.key().to_string());

            let resolver = QueryResolver::with_clock(kb.clone(), FixedClock(0));
            let record = resolver.resolve(&question, Role::Patient);

            prop_assert_eq!(Some(record.matched_topic_key().to_string()), expected);
            let entry = kb.get(record.matched_topic_key()).unwrap();
            prop_assert!(record.answer_text().contains(entry.text()));
        }

        /// Property: with no key in the question the fallback embeds it verbatim
        #[test]
        fn test_fallback_embeds_question(question in "[0-9 !?.,xyzqwj]{0,40}") {
            let resolver = QueryResolver::with_clock(kb(), FixedClock(0));
            let record = resolver.resolve(&question, Role::Student);
            prop_assert_eq!(record.matched_topic_key(), NO_MATCH);
            prop_assert!(record.answer_text().contains(question.as_str()));
        }

        /// Property: resolving never changes the knowledge base
        #[test]
        fn test_knowledge_base_untouched(questions in prop::collection::vec(".*", 0..20), role in any_role()) {
            let kb = kb();
            let before = (*kb).clone();
            let resolver = QueryResolver::with_clock(kb.clone(), FixedClock(0));
            for q in &questions {
                resolver.resolve(q, role);
            }
            prop_assert_eq!(&*kb, &before);
        }
    }
}
