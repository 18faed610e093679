use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// A single question in a survey.
///
/// Questions are immutable and supplied by an external source; their order
/// in the fetched sequence defines the wizard's step order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question's id in the question collection.
    id: QuestionId,

    /// The prompt text shown to the user.
    #[serde(rename = "question")]
    prompt: String,

    /// The kind of answer this question collects.
    #[serde(rename = "answerType")]
    answer_type: AnswerType,
}

impl Question {
    /// Create a new question.
    pub fn new(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        answer_type: AnswerType,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            answer_type,
        }
    }

    /// Get the question id.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Get the kind of answer this question collects.
    pub fn answer_type(&self) -> AnswerType {
        self.answer_type
    }
}

/// The kind of value a question collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    /// A numeric rating on a scale.
    Rating,

    /// Free-form text.
    Text,
}

impl AnswerType {
    /// Get the tag name of this answer type, as it appears in stored
    /// documents and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Text => "text",
        }
    }
}
