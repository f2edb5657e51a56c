use crate::domain::model::{AnswerOption, Questionnaire, Status};
use crate::utils::error::Result;

/// Severity rules. Each implementation owns its questionnaire, its scoring
/// and its status thresholds so the classifier and renderer never depend on
/// which rule set is active.
pub trait SeverityStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn questionnaire(&self) -> &Questionnaire;

    fn score(&self, answers: &[AnswerOption]) -> u32;

    fn status(&self, score: u32, recent_procedure: bool) -> Status;
}

/// Upstream provider that turns an image payload into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, payload: &[u8]) -> Result<String>;
}
