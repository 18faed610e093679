use serde::{Deserialize, Serialize};

use crate::SurveyId;

/// Display metadata for a survey.
///
/// Read-only for the wizard: it names the survey being taken and carries
/// no question content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    id: SurveyId,
    name: String,
}

impl Survey {
    /// Create new survey metadata.
    pub fn new(id: impl Into<SurveyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Get the survey id.
    pub fn id(&self) -> &SurveyId {
        &self.id
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
