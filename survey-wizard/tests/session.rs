//! Integration tests for survey-wizard, driven through the in-memory
//! backend.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use survey_wizard::{
    Answer, AnswerId, AnswerStore, AnswerType, MemoryStore, NavigationError, Question, QuestionId,
    SessionError, StaticSource, StoreResult, Survey, SurveyId, SurveySession,
};

fn two_questions() -> Vec<Question> {
    vec![
        Question::new("q1", "How focused was the sprint?", AnswerType::Rating),
        Question::new("q2", "Anything else to share?", AnswerType::Text),
    ]
}

fn team_survey() -> Survey {
    Survey::new("team-health", "Team health check")
}

async fn begin_two_question_session() -> SurveySession<MemoryStore> {
    SurveySession::begin(MemoryStore::new(), team_survey(), two_questions())
        .await
        .unwrap()
}

#[tokio::test]
async fn seeding_creates_one_draft_per_question() {
    let session = begin_two_question_session().await;

    assert_eq!(session.answers().len(), 2);

    let q1 = session.answers().get(&QuestionId::new("q1")).unwrap();
    let q2 = session.answers().get(&QuestionId::new("q2")).unwrap();
    assert_eq!(q1.value().as_rating(), Some(0));
    assert_eq!(q2.value().as_text(), Some(""));
    assert_ne!(q1.id(), q2.id());

    // Drafts live in memory only until submission.
    assert!(session.store().is_empty().await);
}

#[tokio::test]
async fn seeding_an_empty_survey_yields_no_drafts() {
    let session = SurveySession::begin(MemoryStore::new(), team_survey(), Vec::new())
        .await
        .unwrap();

    assert!(session.answers().is_empty());
    assert!(session.is_complete());
    assert!(session.active_question().is_none());
}

#[tokio::test]
async fn seeding_again_is_idempotent() {
    let mut session = begin_two_question_session().await;
    let ids: HashSet<AnswerId> = session.answers().ids().cloned().collect();

    session.seed_answers().await.unwrap();

    assert_eq!(session.answers().len(), 2);
    let after: HashSet<AnswerId> = session.answers().ids().cloned().collect();
    assert_eq!(after, ids);
}

#[tokio::test]
async fn editing_replaces_only_the_active_draft() {
    let mut session = begin_two_question_session().await;
    let q1_before = session.active_answer().unwrap().clone();
    let q2_before = session.answers().get(&QuestionId::new("q2")).unwrap().clone();

    session.edit_rating(4).unwrap();

    let q1_after = session.active_answer().unwrap();
    assert_eq!(q1_after.value().as_rating(), Some(4));
    assert_eq!(q1_after.id(), q1_before.id());
    assert_eq!(q1_after.created(), q1_before.created());
    assert_eq!(
        session.answers().get(&QuestionId::new("q2")).unwrap(),
        &q2_before
    );
}

#[tokio::test]
async fn next_then_back_returns_to_the_same_step() {
    let mut session = begin_two_question_session().await;

    session.next().unwrap();
    assert_eq!(session.active_step(), 1);

    session.back().unwrap();
    assert_eq!(session.active_step(), 0);
    assert!(!session.is_step_skipped(0));
}

#[tokio::test]
async fn skip_always_fails() {
    let mut session = begin_two_question_session().await;

    let result = session.skip();
    assert!(matches!(
        result,
        Err(SessionError::Navigation(NavigationError::NotOptional { step: 0 }))
    ));
    assert_eq!(session.active_step(), 0);

    session.next().unwrap();
    assert!(session.skip().is_err());
}

#[tokio::test]
async fn reset_returns_to_the_first_step() {
    let mut session = begin_two_question_session().await;

    session.next().unwrap();
    session.reset();

    assert_eq!(session.active_step(), 0);
}

#[tokio::test]
async fn editing_in_the_completion_view_fails() {
    let mut session = begin_two_question_session().await;

    session.next().unwrap();
    session.next().unwrap();
    assert!(session.is_complete());

    let result = session.edit_text("too late");
    assert!(matches!(result, Err(SessionError::NoActiveQuestion)));
}

#[tokio::test]
async fn two_question_walkthrough_persists_both_answers() {
    let mut session = begin_two_question_session().await;

    assert_eq!(
        session.active_question().unwrap().prompt(),
        "How focused was the sprint?"
    );
    session.edit_rating(4).unwrap();

    session.next().unwrap();
    assert_eq!(session.active_step(), 1);
    session.edit_text("ok").unwrap();

    let q1_draft = session.answers().get(&QuestionId::new("q1")).unwrap().clone();
    let q2_draft = session.answers().get(&QuestionId::new("q2")).unwrap().clone();

    let report = session.finish().await.unwrap();
    assert!(report.is_complete());
    assert_eq!(report.submitted().len(), 2);
    assert!(session.is_complete());
    assert_eq!(session.active_step(), 2);

    // Both documents land under their original ids, values intact.
    let store = session.store();
    assert_eq!(store.answer_by_id(q1_draft.id()).await.unwrap(), q1_draft);
    assert_eq!(store.answer_by_id(q2_draft.id()).await.unwrap(), q2_draft);
    assert_eq!(
        store
            .answer_for_question(&QuestionId::new("q1"))
            .await
            .unwrap()
            .value()
            .as_rating(),
        Some(4)
    );
}

#[tokio::test]
async fn finishing_twice_fails_loudly() {
    let mut session = begin_two_question_session().await;

    session.next().unwrap();
    session.finish().await.unwrap();

    let result = session.finish().await;
    assert!(matches!(
        result,
        Err(SessionError::Navigation(NavigationError::AtTerminal { .. }))
    ));
}

#[tokio::test]
async fn store_round_trip() {
    let store = MemoryStore::new();
    let question = Question::new("q1", "How focused was the sprint?", AnswerType::Rating);

    let missing = store.answer_for_question(question.id()).await;
    assert!(missing.is_err_and(|e| e.is_not_found()));

    let id = store.allocate_answer_id().await.unwrap();
    let answer = Answer::draft(id.clone(), &question, chrono::Utc::now());
    store.upsert_answer(&id, &answer).await.unwrap();

    assert_eq!(store.answer_by_id(&id).await.unwrap(), answer);
    assert_eq!(
        store.answer_for_question(question.id()).await.unwrap(),
        answer
    );
}

#[tokio::test]
async fn bulk_lookup_returns_only_existing_matches() {
    let store = MemoryStore::new();
    let question = Question::new("q1", "How focused was the sprint?", AnswerType::Rating);

    let id = store.allocate_answer_id().await.unwrap();
    let answer = Answer::draft(id.clone(), &question, chrono::Utc::now());
    store.upsert_answer(&id, &answer).await.unwrap();

    let fetched = store
        .answers_by_ids(&[id, AnswerId::new("no-such-answer")])
        .await
        .unwrap();
    assert_eq!(fetched, vec![answer]);
}

#[tokio::test]
async fn open_fetches_metadata_and_questions() {
    let source = StaticSource::new().with_survey(team_survey(), two_questions());

    let session = SurveySession::open(
        MemoryStore::new(),
        &source,
        &source,
        &SurveyId::new("team-health"),
    )
    .await
    .unwrap();

    assert_eq!(session.survey().name(), "Team health check");
    assert_eq!(session.step_count(), 2);
    assert_eq!(session.answers().len(), 2);
}

#[tokio::test]
async fn opening_an_unknown_survey_is_not_found() {
    let source = StaticSource::new();

    let result = SurveySession::open(
        MemoryStore::new(),
        &source,
        &source,
        &SurveyId::new("nope"),
    )
    .await;

    assert!(matches!(
        result,
        Err(SessionError::Store(e)) if e.is_not_found()
    ));
}

/// A store that rejects writes for chosen questions, for exercising
/// partial submission failure.
struct FailingStore {
    inner: MemoryStore,
    reject: Mutex<HashSet<QuestionId>>,
}

impl FailingStore {
    fn rejecting(question_id: QuestionId) -> Self {
        Self {
            inner: MemoryStore::new(),
            reject: Mutex::new(HashSet::from([question_id])),
        }
    }

    fn heal(&self) {
        self.reject.lock().unwrap().clear();
    }
}

#[async_trait]
impl AnswerStore for FailingStore {
    async fn answers_by_ids(&self, ids: &[AnswerId]) -> StoreResult<Vec<Answer>> {
        self.inner.answers_by_ids(ids).await
    }

    async fn answer_for_question(&self, question_id: &QuestionId) -> StoreResult<Answer> {
        self.inner.answer_for_question(question_id).await
    }

    async fn answer_by_id(&self, id: &AnswerId) -> StoreResult<Answer> {
        self.inner.answer_by_id(id).await
    }

    async fn allocate_answer_id(&self) -> StoreResult<AnswerId> {
        self.inner.allocate_answer_id().await
    }

    async fn upsert_answer(&self, id: &AnswerId, answer: &Answer) -> StoreResult<()> {
        if self.reject.lock().unwrap().contains(answer.question_id()) {
            return Err(survey_wizard::StoreError::transport(anyhow::anyhow!(
                "answer collection offline"
            )));
        }
        self.inner.upsert_answer(id, answer).await
    }
}

#[tokio::test]
async fn submission_collects_every_failure_and_retries_per_answer() {
    let store = FailingStore::rejecting(QuestionId::new("q2"));
    let mut session = SurveySession::begin(store, team_survey(), two_questions())
        .await
        .unwrap();

    session.edit_rating(4).unwrap();
    session.next().unwrap();
    session.edit_text("ok").unwrap();

    let report = session.finish().await.unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.submitted().len(), 1);
    assert_eq!(report.failures().len(), 1);

    let q2_id = session
        .answers()
        .get(&QuestionId::new("q2"))
        .unwrap()
        .id()
        .clone();
    assert_eq!(report.failed_ids().collect::<Vec<_>>(), vec![&q2_id]);

    // The q1 document was written despite q2 failing.
    assert_eq!(session.store().inner.len().await, 1);

    // Upserts are idempotent: once the store recovers, resubmitting
    // completes the batch.
    session.store().heal();
    let retry = session.submit_answers().await;
    assert!(retry.is_complete());
    assert_eq!(session.store().inner.len().await, 2);
}
