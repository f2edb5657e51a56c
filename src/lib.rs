pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::CommandTextExtractor;
pub use app::report::{render, OutputFormat};
pub use config::RulesConfig;
pub use crate::core::classifier::{Classifier, KeywordCatalog, KeywordSet};
pub use crate::core::diagnoser::Diagnoser;
pub use crate::core::session::ProductList;
pub use crate::core::severity::{OrdinalLevelStrategy, RuleSet, SummedScoreStrategy};
pub use domain::model::{
    AnswerOption, Diagnosis, Guidance, ProductEntry, Question, Questionnaire, Role, Routine,
    Status, TriggerUse,
};
pub use domain::ports::{SeverityStrategy, TextExtractor};
pub use utils::error::{LbasiError, Result};
