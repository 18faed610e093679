//! Core types for the survey-wizard crate.
//!
//! This crate provides the foundational types for taking surveys:
//! - `Survey` and `Question` - survey metadata and the ordered question list
//! - `Answer` and `AnswerValue` - collected answers as tagged documents
//! - `AnswerSet` - the in-memory drafts, exactly one per question
//! - `Navigation` - the step state machine driving the wizard

mod id;
pub use id::{AnswerId, QuestionId, SurveyId};

mod question;
pub use question::{AnswerType, Question};

mod answer;
pub use answer::{Answer, AnswerValue};

mod answer_set;
pub use answer_set::{AnswerSet, AnswerSetError};

mod navigation;
pub use navigation::{NavEvent, Navigation, NavigationError};

mod survey;
pub use survey::Survey;
