pub mod classifier;
pub mod diagnoser;
pub mod session;
pub mod severity;

pub use crate::domain::model::{
    AnswerOption, Diagnosis, Guidance, ProductEntry, Question, Questionnaire, Role, Routine,
    Status, TriggerUse,
};
pub use crate::domain::ports::{SeverityStrategy, TextExtractor};
pub use crate::utils::error::Result;
