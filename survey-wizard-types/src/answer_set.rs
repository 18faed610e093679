use std::collections::HashMap;

use crate::{Answer, AnswerId, AnswerValue, Question, QuestionId};

/// Error type for draft access and editing.
///
/// Both variants indicate a driver bug rather than a recoverable runtime
/// condition: a correctly seeded session always has a type-matching draft
/// for every question.
#[derive(Debug, thiserror::Error)]
pub enum AnswerSetError {
    /// No draft exists for the question being edited. The set must be
    /// seeded before editing.
    #[error("No draft answer for question: {0}")]
    MissingDraft(QuestionId),

    /// The new value's kind does not match the question's answer type.
    #[error("Answer type mismatch for question '{question_id}': expected {expected}, got {actual}")]
    TypeMismatch {
        question_id: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The in-memory draft answers of one survey session.
///
/// Keyed by question id, so the set holds exactly one draft per question.
/// Inserting a draft for a question that already has one is refused, which
/// makes seeding idempotent: out-of-order id allocations and repeated
/// seeding runs cannot create duplicates.
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    drafts: HashMap<QuestionId, Answer>,
}

impl AnswerSet {
    /// Create a new empty answer set.
    pub fn new() -> Self {
        Self {
            drafts: HashMap::new(),
        }
    }

    /// Insert a draft for its question.
    ///
    /// Returns `false` and keeps the existing draft if the question is
    /// already covered.
    pub fn insert(&mut self, draft: Answer) -> bool {
        use std::collections::hash_map::Entry;

        match self.drafts.entry(draft.question_id().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(draft);
                true
            }
        }
    }

    /// Get the draft for a question.
    pub fn get(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.drafts.get(question_id)
    }

    /// Check if a question has a draft.
    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.drafts.contains_key(question_id)
    }

    /// Get the number of drafts.
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Check if there are no drafts.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Get an iterator over the drafts, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.drafts.values()
    }

    /// Get an iterator over the drafts' document ids.
    pub fn ids(&self) -> impl Iterator<Item = &AnswerId> {
        self.drafts.values().map(Answer::id)
    }

    /// Record a value on the draft for `question`.
    ///
    /// The stored draft is replaced by a new answer that keeps its id,
    /// question id, and creation time; no other draft is touched. Fails if
    /// the set was never seeded for this question, or if the value's kind
    /// does not match the question's answer type.
    pub fn record(
        &mut self,
        question: &Question,
        value: AnswerValue,
    ) -> Result<&Answer, AnswerSetError> {
        if value.answer_type() != question.answer_type() {
            return Err(AnswerSetError::TypeMismatch {
                question_id: question.id().clone(),
                expected: question.answer_type().as_str(),
                actual: value.type_name(),
            });
        }

        let draft = self
            .drafts
            .get_mut(question.id())
            .ok_or_else(|| AnswerSetError::MissingDraft(question.id().clone()))?;
        *draft = draft.with_value(value);
        Ok(draft)
    }
}

impl IntoIterator for AnswerSet {
    type Item = Answer;
    type IntoIter = std::collections::hash_map::IntoValues<QuestionId, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.drafts.into_values()
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a Answer;
    type IntoIter = std::collections::hash_map::Values<'a, QuestionId, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.drafts.values()
    }
}
