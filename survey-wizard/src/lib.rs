//! # survey-wizard
//!
//! A multi-step survey-taking session: one question at a time, typed
//! answers (numeric rating or free text), each persisted to a document
//! store keyed by answer id.
//!
//! The crate is store-agnostic - storage is reached through the
//! [`AnswerStore`] trait, and the question list and survey metadata arrive
//! through [`QuestionSource`] and [`SurveyCatalog`]. A presentation layer
//! drives the session through its navigation and editing methods and reads
//! back the active question and draft.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_wizard::{MemoryStore, SurveySession};
//!
//! let mut session = SurveySession::open(store, &catalog, &source, &survey_id).await?;
//!
//! session.edit_rating(4)?;       // answer the first question
//! session.next()?;               // advance
//! session.edit_text("ok")?;      // answer the second question
//!
//! let report = session.finish().await?;
//! assert!(report.is_complete());
//! ```
//!
//! Seeding allocates one store id per question and keeps exactly one draft
//! per question; edits replace a draft's value while its id and creation
//! time stay fixed; finishing writes every draft to the store and reports
//! every failed write instead of dropping it.

// Re-export all types from survey-wizard-types
pub use survey_wizard_types::*;

mod store;
pub use store::{AnswerStore, StoreError, StoreResult};

mod source;
pub use source::{QuestionSource, SurveyCatalog};

// In-memory backend for driving sessions without a remote store
mod memory;
pub use memory::{MemoryStore, StaticSource};

mod submission;
pub use submission::SubmissionReport;

mod session;
pub use session::{SessionError, SurveySession};
