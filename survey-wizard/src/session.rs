use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};

use survey_wizard_types::{
    Answer, AnswerSet, AnswerSetError, AnswerValue, NavEvent, Navigation, NavigationError,
    Question, Survey, SurveyId,
};

use crate::{AnswerStore, QuestionSource, StoreError, SubmissionReport, SurveyCatalog};

/// Error type for session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A store or source call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A navigation transition violated its precondition.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// An edit violated the answer set's invariants.
    #[error(transparent)]
    Answers(#[from] AnswerSetError),

    /// An edit arrived while the wizard shows its completion view.
    #[error("No active question: all steps are complete")]
    NoActiveQuestion,
}

/// One user's pass through one survey.
///
/// The session owns the in-memory draft answers and the step state; the
/// store only sees writes at submission. All mutation happens on the
/// calling task - a session is not shared between threads, and dropping it
/// discards the drafts.
#[derive(Debug)]
pub struct SurveySession<S> {
    store: S,
    survey: Survey,
    questions: Vec<Question>,
    answers: AnswerSet,
    nav: Navigation,
}

impl<S: AnswerStore> SurveySession<S> {
    /// Start a session over an already-fetched question list, seeding one
    /// draft answer per question.
    pub async fn begin(
        store: S,
        survey: Survey,
        questions: Vec<Question>,
    ) -> Result<Self, SessionError> {
        let mut session = Self {
            store,
            survey,
            nav: Navigation::new(questions.len()),
            answers: AnswerSet::new(),
            questions,
        };
        session.seed_answers().await?;
        Ok(session)
    }

    /// Fetch survey metadata and the question list from the external
    /// providers, then begin a session over them.
    pub async fn open(
        store: S,
        catalog: &impl SurveyCatalog,
        source: &impl QuestionSource,
        survey_id: &SurveyId,
    ) -> Result<Self, SessionError> {
        let survey = catalog.survey(survey_id).await?;
        let questions = source.questions(survey_id).await?;
        Self::begin(store, survey, questions).await
    }

    /// Seed a draft answer for every question not yet covered.
    ///
    /// Id allocations run concurrently; each completion inserts through the
    /// answer set's uniqueness check, so completion order does not matter
    /// and calling this again is a no-op for questions already seeded.
    pub async fn seed_answers(&mut self) -> Result<(), SessionError> {
        let pending: Vec<&Question> = self
            .questions
            .iter()
            .filter(|question| !self.answers.contains(question.id()))
            .collect();

        let ids = join_all(pending.iter().map(|_| self.store.allocate_answer_id())).await;

        for (question, id) in pending.into_iter().zip(ids) {
            self.answers
                .insert(Answer::draft(id?, question, Utc::now()));
        }
        debug!(
            survey = %self.survey.id(),
            drafts = self.answers.len(),
            "seeded draft answers"
        );
        Ok(())
    }

    /// Get the survey metadata.
    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Get the ordered question list.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get the draft answers.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Get the navigation state, e.g. for rendering a stepper.
    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    /// Get the active step index.
    pub fn active_step(&self) -> usize {
        self.nav.active_step()
    }

    /// Get the number of steps.
    pub fn step_count(&self) -> usize {
        self.nav.step_count()
    }

    /// Check if all steps were traversed.
    pub fn is_complete(&self) -> bool {
        self.nav.is_complete()
    }

    /// Check if a step was skipped.
    pub fn is_step_skipped(&self, step: usize) -> bool {
        self.nav.is_skipped(step)
    }

    /// Get the question at the active step, or `None` in the completion
    /// view.
    pub fn active_question(&self) -> Option<&Question> {
        self.questions.get(self.nav.active_step())
    }

    /// Get the draft answer for the active question.
    pub fn active_answer(&self) -> Option<&Answer> {
        self.active_question()
            .and_then(|question| self.answers.get(question.id()))
    }

    /// Get the store this session persists to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance to the next step.
    pub fn next(&mut self) -> Result<(), SessionError> {
        self.nav = self.nav.next()?;
        Ok(())
    }

    /// Return to the previous step.
    pub fn back(&mut self) -> Result<(), SessionError> {
        self.nav = self.nav.back()?;
        Ok(())
    }

    /// Skip the active step.
    ///
    /// No step of a survey is optional, so this always fails; it exists so
    /// a driver wired to a skip control gets a loud error instead of
    /// silently advancing.
    pub fn skip(&mut self) -> Result<(), SessionError> {
        self.nav = self.nav.skip()?;
        Ok(())
    }

    /// Return to the first step. Drafts and skip markings stay as they
    /// are.
    pub fn reset(&mut self) {
        self.nav = self.nav.reset();
    }

    /// Apply a navigation event raised by the presentation layer.
    pub fn navigate(&mut self, event: NavEvent) -> Result<(), SessionError> {
        self.nav = self.nav.apply(event)?;
        Ok(())
    }

    /// Record a value on the active question's draft.
    ///
    /// The draft keeps its id and creation time; no other draft is
    /// touched.
    pub fn edit_answer(&mut self, value: AnswerValue) -> Result<(), SessionError> {
        let question = self
            .questions
            .get(self.nav.active_step())
            .ok_or(SessionError::NoActiveQuestion)?;
        self.answers.record(question, value)?;
        Ok(())
    }

    /// Record a rating on the active question's draft.
    pub fn edit_rating(&mut self, rating: i64) -> Result<(), SessionError> {
        self.edit_answer(AnswerValue::rating(rating))
    }

    /// Record text on the active question's draft.
    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.edit_answer(AnswerValue::text(text))
    }

    /// Write every draft to the store.
    ///
    /// Upserts run concurrently against disjoint documents, in no
    /// particular order. Every failed write lands in the report; a later
    /// call retries per answer, since upserts are idempotent.
    pub async fn submit_answers(&self) -> SubmissionReport {
        let outcomes = join_all(self.answers.iter().map(|answer| {
            let store = &self.store;
            async move {
                let outcome = store.upsert_answer(answer.id(), answer).await;
                (answer.id().clone(), outcome)
            }
        }))
        .await;

        let mut report = SubmissionReport::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.record_success(id),
                Err(error) => report.record_failure(id, error),
            }
        }

        if report.is_complete() {
            debug!(
                survey = %self.survey.id(),
                submitted = report.submitted().len(),
                "submitted answers"
            );
        } else {
            warn!(
                survey = %self.survey.id(),
                submitted = report.submitted().len(),
                failed = report.failures().len(),
                "submission left unwritten answers"
            );
        }
        report
    }

    /// Advance past the last step and submit every draft.
    pub async fn finish(&mut self) -> Result<SubmissionReport, SessionError> {
        self.nav = self.nav.next()?;
        Ok(self.submit_answers().await)
    }
}
