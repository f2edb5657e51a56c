use crate::app::report::OutputFormat;
use crate::core::severity::{OrdinalLevelStrategy, RuleSet};
use crate::domain::model::{AnswerOption, Questionnaire};
use crate::utils::error::{LbasiError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "lbasi")]
#[command(about = "Sort skincare products into Primer/Trigger/Stabilizer and check whether actives are safe to use")]
pub struct CliConfig {
    /// File with one product per line
    #[arg(long)]
    pub products_file: Option<String>,

    /// Product name (repeatable)
    #[arg(short, long = "product")]
    pub products: Vec<String>,

    /// Selected option index per question, in order (0-based)
    #[arg(short, long = "answer", value_delimiter = ',')]
    pub answers: Vec<usize>,

    /// Self-reported level 1-5; implies the ordinal rules
    #[arg(long)]
    pub level: Option<u32>,

    /// Had a peel, laser or similar procedure recently
    #[arg(long)]
    pub recent_procedure: bool,

    /// Severity rules to apply (default: from config, else summed)
    #[arg(long, value_enum)]
    pub rules: Option<RuleSet>,

    /// TOML rules file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also split product lines on commas
    #[arg(long)]
    pub split_commas: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Image of product labels to run through --ocr-command
    #[arg(long, requires = "ocr_command")]
    pub image: Option<String>,

    /// OCR command reading an image on stdin and printing text, e.g. "tesseract stdin stdout -l kor"
    #[arg(long)]
    pub ocr_command: Option<String>,

    /// Print the questionnaire for the selected rules and exit
    #[arg(long)]
    pub list_questions: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// Rule set requested on the command line, if any. `--level` selects ordinal.
    pub fn rule_override(&self) -> Option<RuleSet> {
        match (self.rules, self.level) {
            (Some(rules), _) => Some(rules),
            (None, Some(_)) => Some(RuleSet::Ordinal),
            (None, None) => None,
        }
    }

    /// Answers for the active questionnaire. `--level` is taken as the level
    /// itself and never as an index into a custom questionnaire.
    pub fn resolve_answers(&self, questionnaire: &Questionnaire) -> Vec<AnswerOption> {
        match self.level {
            Some(level) => vec![AnswerOption::new(format!("{}단계", level), level)],
            None => questionnaire.answer(&self.answers),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.products_file {
            validation::validate_path("products_file", path)?;
        }
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        if let Some(path) = &self.image {
            validation::validate_path("image", path)?;
            if self.ocr_command.is_none() {
                return Err(LbasiError::MissingConfigError {
                    field: "ocr_command".to_string(),
                });
            }
        }
        if let Some(command) = &self.ocr_command {
            validation::validate_non_empty_string("ocr_command", command)?;
        }
        if let Some(level) = self.level {
            validation::validate_range("level", level, 1, OrdinalLevelStrategy::MAX_LEVEL)?;
            if self.rules == Some(RuleSet::Summed) {
                return Err(LbasiError::InvalidConfigValueError {
                    field: "level".to_string(),
                    value: level.to_string(),
                    reason: "--level only applies to the ordinal rules".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::core::severity::SummedScoreStrategy;
    use crate::domain::model::Status;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("lbasi").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_answers_accept_commas_and_repeats() {
        let config = parse(&["--answer", "1,0,2", "-a", "1"]);
        assert_eq!(config.answers, vec![1, 0, 2, 1]);
        assert_eq!(config.rule_override(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_level_selects_ordinal() {
        let config = parse(&["--level", "3"]);
        assert_eq!(config.rule_override(), Some(RuleSet::Ordinal));
        assert!(config.validate().is_ok());
        let answers = config.resolve_answers(&OrdinalLevelStrategy::default_questionnaire());
        assert_eq!(answers, vec![AnswerOption::new("3단계", 3)]);

        assert!(parse(&["--level", "6"]).validate().is_err());
        assert!(parse(&["--level", "2", "--rules", "summed"]).validate().is_err());
    }

    #[test]
    fn test_level_ignores_custom_option_weights() {
        let rules = RulesConfig::from_toml_str(
            "[[questions]]\nprompt = \"q\"\noptions = [\"a (0점)\", \"b (1점)\", \"c (2점)\", \"d (4점)\"]\n",
        )
        .unwrap();
        let config = parse(&["--level", "3"]);
        let diagnoser = rules.build_diagnoser(config.rule_override()).unwrap();

        let answers = config.resolve_answers(diagnoser.strategy().questionnaire());
        let (score, guidance) = diagnoser.evaluate(&answers, false);
        assert_eq!(score, 3);
        assert_eq!(guidance.status, Status::Warning);
    }

    #[test]
    fn test_answers_resolve_against_questionnaire() {
        let config = parse(&["--answer", "1,1,1,1,1,1"]);
        let answers = config.resolve_answers(&SummedScoreStrategy::default_questionnaire());
        assert_eq!(answers.len(), 6);
        assert_eq!(answers.iter().map(|a| a.points).sum::<u32>(), 7);
    }

    #[test]
    fn test_image_requires_ocr_command() {
        let result = CliConfig::try_parse_from(["lbasi", "--image", "label.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_values() {
        assert_eq!(parse(&[]).format, OutputFormat::Text);
        assert_eq!(parse(&["--format", "csv"]).format, OutputFormat::Csv);
    }
}
