use crate::core::classifier::Classifier;
use crate::core::session::ProductList;
use crate::core::severity;
use crate::domain::model::{AnswerOption, Diagnosis, Guidance};
use crate::domain::ports::SeverityStrategy;
use crate::utils::error::{LbasiError, Result};

/// Runs the classifier and the selected severity rules over one submission.
pub struct Diagnoser {
    classifier: Classifier,
    strategy: Box<dyn SeverityStrategy>,
}

impl Diagnoser {
    pub fn new(classifier: Classifier, strategy: Box<dyn SeverityStrategy>) -> Self {
        Self {
            classifier,
            strategy,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn strategy(&self) -> &dyn SeverityStrategy {
        self.strategy.as_ref()
    }

    /// Severity only; usable without any products.
    pub fn evaluate(&self, answers: &[AnswerOption], recent_procedure: bool) -> (u32, Guidance) {
        let score = self.strategy.score(answers);
        let status = self.strategy.status(score, recent_procedure);
        tracing::debug!(
            "Rules '{}' scored {} (recent procedure: {}) -> {}",
            self.strategy.name(),
            score,
            recent_procedure,
            status
        );
        (score, severity::guidance(status))
    }

    /// Appends text returned by an upstream extractor. A failed extraction is
    /// not fatal: it is logged and returned as a notice for the report.
    pub fn absorb_extracted_text(
        &self,
        products: &mut ProductList,
        extracted: Result<String>,
    ) -> Option<String> {
        match extracted {
            Ok(text) => {
                let added = products.append_text(&self.classifier, &text);
                tracing::info!("Added {} product(s) from extracted text", added);
                None
            }
            Err(e) => {
                tracing::warn!("Text extraction failed, continuing with manual input: {}", e);
                Some(e.user_friendly_message())
            }
        }
    }

    pub fn diagnose(
        &self,
        products: &ProductList,
        answers: &[AnswerOption],
        recent_procedure: bool,
    ) -> Result<Diagnosis> {
        if products.is_empty() {
            return Err(LbasiError::EmptyInput);
        }

        let routine = self.classifier.classify_entries(products.list());
        tracing::info!(
            "Classified {} product(s): {} primer, {} trigger, {} stabilizer, {} unknown",
            routine.len(),
            routine.primer.len(),
            routine.trigger.len(),
            routine.stabilizer.len(),
            routine.unknown.len()
        );

        let (score, guidance) = self.evaluate(answers, recent_procedure);
        tracing::info!("Status: {} (score {})", guidance.status, score);

        Ok(Diagnosis {
            routine,
            strategy: self.strategy.name().to_string(),
            score,
            recent_procedure,
            guidance,
            notices: Vec::new(),
            generated_at: chrono::Utc::now(),
        })
    }
}
