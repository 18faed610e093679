use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AnswerId, AnswerType, Question, QuestionId};

/// A collected answer, stored as one document in the answer collection.
///
/// Identity fields are shared by both answer kinds; the kind-specific value
/// is tagged with `type` in the stored document. `id` and `created` are
/// assigned once when the draft is created and never change across edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Document id.
    id: AnswerId,

    /// The question this answer belongs to.
    #[serde(rename = "questionId")]
    question_id: QuestionId,

    /// Creation timestamp.
    created: DateTime<Utc>,

    /// The answered value, tagged by answer kind.
    #[serde(flatten)]
    value: AnswerValue,
}

impl Answer {
    /// Create a draft answer for a question, holding the empty default
    /// value for the question's answer type.
    pub fn draft(id: AnswerId, question: &Question, created: DateTime<Utc>) -> Self {
        Self {
            id,
            question_id: question.id().clone(),
            created,
            value: AnswerValue::empty(question.answer_type()),
        }
    }

    /// Get the document id.
    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    /// Get the id of the question this answer belongs to.
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    /// Get the creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Get the answered value.
    pub fn value(&self) -> &AnswerValue {
        &self.value
    }

    /// Get the answer type this answer's value satisfies.
    pub fn answer_type(&self) -> AnswerType {
        self.value.answer_type()
    }

    /// Build the replacement answer for an edit: same id, question id, and
    /// creation time, with the new value applied.
    pub(crate) fn with_value(&self, value: AnswerValue) -> Self {
        Self {
            id: self.id.clone(),
            question_id: self.question_id.clone(),
            created: self.created,
            value,
        }
    }
}

/// The value carried by an answer, tagged as `type` in the stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnswerValue {
    /// A numeric rating.
    Rating { rating: i64 },

    /// Free-form text.
    Text { text: String },
}

impl AnswerValue {
    /// The empty default for an answer type: rating `0`, or the empty
    /// string.
    pub fn empty(answer_type: AnswerType) -> Self {
        match answer_type {
            AnswerType::Rating => Self::Rating { rating: 0 },
            AnswerType::Text => Self::Text {
                text: String::new(),
            },
        }
    }

    /// Create a rating value.
    pub fn rating(rating: i64) -> Self {
        Self::Rating { rating }
    }

    /// Create a text value.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Try to get this value as a rating.
    pub fn as_rating(&self) -> Option<i64> {
        match self {
            Self::Rating { rating } => Some(*rating),
            Self::Text { .. } => None,
        }
    }

    /// Try to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Rating { .. } => None,
        }
    }

    /// The answer type this value satisfies.
    pub fn answer_type(&self) -> AnswerType {
        match self {
            Self::Rating { .. } => AnswerType::Rating,
            Self::Text { .. } => AnswerType::Text,
        }
    }

    /// Get the tag name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        self.answer_type().as_str()
    }
}

impl From<i64> for AnswerValue {
    fn from(rating: i64) -> Self {
        Self::Rating { rating }
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        Self::Text {
            text: text.to_string(),
        }
    }
}

impl From<String> for AnswerValue {
    fn from(text: String) -> Self {
        Self::Text { text }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn rating_question() -> Question {
        Question::new("q1", "How was it?", AnswerType::Rating)
    }

    #[test]
    fn draft_holds_empty_default() {
        let text_question = Question::new("q2", "Anything else?", AnswerType::Text);

        let rating = Answer::draft(AnswerId::new("a1"), &rating_question(), Utc::now());
        let text = Answer::draft(AnswerId::new("a2"), &text_question, Utc::now());

        assert_eq!(rating.value().as_rating(), Some(0));
        assert_eq!(text.value().as_text(), Some(""));
    }

    #[test]
    fn with_value_preserves_identity() {
        let created = Utc.with_ymd_and_hms(2021, 3, 14, 9, 26, 53).unwrap();
        let draft = Answer::draft(AnswerId::new("a1"), &rating_question(), created);

        let edited = draft.with_value(AnswerValue::rating(4));

        assert_eq!(edited.id(), draft.id());
        assert_eq!(edited.question_id(), draft.question_id());
        assert_eq!(edited.created(), created);
        assert_eq!(edited.value().as_rating(), Some(4));
    }

    #[test]
    fn document_shape() {
        let draft = Answer::draft(AnswerId::new("a1"), &rating_question(), Utc::now());
        let json = serde_json::to_value(draft.with_value(AnswerValue::rating(4))).unwrap();

        assert_eq!(json["id"], "a1");
        assert_eq!(json["questionId"], "q1");
        assert_eq!(json["type"], "rating");
        assert_eq!(json["rating"], 4);
        assert!(json["created"].is_string());
        assert!(json.get("text").is_none());
    }

    #[test]
    fn document_round_trip() {
        let question = Question::new("q2", "Anything else?", AnswerType::Text);
        let answer = Answer::draft(AnswerId::new("a2"), &question, Utc::now())
            .with_value(AnswerValue::text("ok"));

        let json = serde_json::to_value(&answer).unwrap();
        let restored: Answer = serde_json::from_value(json).unwrap();

        assert_eq!(restored, answer);
    }
}
