use async_trait::async_trait;

use survey_wizard_types::{Question, Survey, SurveyId};

use crate::StoreResult;

/// Provider of the ordered question sequence for a survey.
///
/// Fetched once per session; the wizard only consumes the resulting
/// sequence and its answer type discriminators. The order of the returned
/// questions defines the wizard's step order.
#[async_trait]
pub trait QuestionSource {
    /// Fetch the ordered questions of a survey. May be empty.
    async fn questions(&self, survey_id: &SurveyId) -> StoreResult<Vec<Question>>;
}

/// Provider of survey display metadata. Read-only for the wizard.
#[async_trait]
pub trait SurveyCatalog {
    /// Fetch a survey's metadata. `NotFound` when no survey has this id.
    async fn survey(&self, survey_id: &SurveyId) -> StoreResult<Survey>;
}
