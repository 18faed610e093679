use async_trait::async_trait;

use survey_wizard_types::{Answer, AnswerId, QuestionId};

/// Error type for store and source operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store or network was unavailable. Nothing here retries; the
    /// caller decides whether to.
    #[error("Store transport error: {0}")]
    Transport(#[from] anyhow::Error),

    /// A single-document lookup found nothing. Expected for callers that
    /// probe for a not-yet-written answer; a bug for callers that assume
    /// presence.
    #[error("No document found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Create a transport error from any error type.
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        Self::Transport(err.into())
    }

    /// Create a `NotFound` error describing the query that came up empty.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Check if this error is the expected no-such-document case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store and source operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The answer document collection.
///
/// All operations are asynchronous calls against an external store. The
/// store's per-document write is the only atomicity unit: `upsert_answer`
/// fully overwrites one document, last writer wins, with no optimistic
/// concurrency check and no batching.
#[async_trait]
pub trait AnswerStore {
    /// Bulk lookup by id membership. Returns only existing matches, in
    /// unspecified order.
    async fn answers_by_ids(&self, ids: &[AnswerId]) -> StoreResult<Vec<Answer>>;

    /// The first answer recorded for a question. `NotFound` when no answer
    /// exists yet.
    async fn answer_for_question(&self, question_id: &QuestionId) -> StoreResult<Answer>;

    /// Lookup by document id.
    async fn answer_by_id(&self, id: &AnswerId) -> StoreResult<Answer>;

    /// Allocate a fresh unique document id, usable before the document is
    /// written.
    async fn allocate_answer_id(&self) -> StoreResult<AnswerId>;

    /// Create or fully overwrite the document at `id`. Idempotent.
    async fn upsert_answer(&self, id: &AnswerId, answer: &Answer) -> StoreResult<()>;
}
