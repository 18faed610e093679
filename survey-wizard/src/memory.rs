//! In-memory backend for driving sessions without a remote store.
//!
//! `MemoryStore` keeps the answer collection in process memory behind an
//! async lock, and `StaticSource` serves canned surveys and question
//! lists. Together they let tests and examples run complete sessions
//! through the same traits a remote-store deployment uses.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use survey_wizard_types::{Answer, AnswerId, Question, QuestionId, Survey, SurveyId};

use crate::{AnswerStore, QuestionSource, StoreError, StoreResult, SurveyCatalog};

/// An in-memory answer collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    answers: RwLock<HashMap<AnswerId, Answer>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored documents.
    pub async fn len(&self) -> usize {
        self.answers.read().await.len()
    }

    /// Check if the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.answers.read().await.is_empty()
    }
}

#[async_trait]
impl AnswerStore for MemoryStore {
    async fn answers_by_ids(&self, ids: &[AnswerId]) -> StoreResult<Vec<Answer>> {
        let answers = self.answers.read().await;
        Ok(ids.iter().filter_map(|id| answers.get(id).cloned()).collect())
    }

    async fn answer_for_question(&self, question_id: &QuestionId) -> StoreResult<Answer> {
        let answers = self.answers.read().await;
        answers
            .values()
            .find(|answer| answer.question_id() == question_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("answer for question {question_id}")))
    }

    async fn answer_by_id(&self, id: &AnswerId) -> StoreResult<Answer> {
        let answers = self.answers.read().await;
        answers
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("answer {id}")))
    }

    async fn allocate_answer_id(&self) -> StoreResult<AnswerId> {
        Ok(AnswerId::new(Uuid::new_v4().to_string()))
    }

    async fn upsert_answer(&self, id: &AnswerId, answer: &Answer) -> StoreResult<()> {
        self.answers
            .write()
            .await
            .insert(id.clone(), answer.clone());
        Ok(())
    }
}

/// Canned surveys and question lists, keyed by survey id.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    surveys: HashMap<SurveyId, Survey>,
    questions: HashMap<SurveyId, Vec<Question>>,
}

impl StaticSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a survey and its ordered questions.
    pub fn with_survey(mut self, survey: Survey, questions: Vec<Question>) -> Self {
        self.questions.insert(survey.id().clone(), questions);
        self.surveys.insert(survey.id().clone(), survey);
        self
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    async fn questions(&self, survey_id: &SurveyId) -> StoreResult<Vec<Question>> {
        Ok(self.questions.get(survey_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl SurveyCatalog for StaticSource {
    async fn survey(&self, survey_id: &SurveyId) -> StoreResult<Survey> {
        self.surveys
            .get(survey_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("survey {survey_id}")))
    }
}
