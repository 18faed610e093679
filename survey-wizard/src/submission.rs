use survey_wizard_types::AnswerId;

use crate::StoreError;

/// The outcome of submitting a session's answers.
///
/// Upserts are independent, so some may succeed while others fail. The
/// report collects every failure instead of dropping them; upserts being
/// idempotent, submitting again retries exactly the writes that are still
/// missing (re-writing an already-submitted document is harmless).
#[derive(Debug, Default)]
pub struct SubmissionReport {
    submitted: Vec<AnswerId>,
    failures: Vec<(AnswerId, StoreError)>,
}

impl SubmissionReport {
    pub(crate) fn record_success(&mut self, id: AnswerId) {
        self.submitted.push(id);
    }

    pub(crate) fn record_failure(&mut self, id: AnswerId, error: StoreError) {
        self.failures.push((id, error));
    }

    /// Ids of the answers written successfully.
    pub fn submitted(&self) -> &[AnswerId] {
        &self.submitted
    }

    /// Every failed upsert with its error.
    pub fn failures(&self) -> &[(AnswerId, StoreError)] {
        &self.failures
    }

    /// Ids of the answers that still need a write.
    pub fn failed_ids(&self) -> impl Iterator<Item = &AnswerId> {
        self.failures.iter().map(|(id, _)| id)
    }

    /// Check if every draft was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
