use crate::core::classifier::{Classifier, KeywordCatalog};
use crate::core::diagnoser::Diagnoser;
use crate::core::severity::{OrdinalLevelStrategy, RuleSet};
use crate::domain::model::{AnswerOption, Question, Questionnaire, Role};
use crate::utils::error::{LbasiError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

/// Optional rules file: rule set selection, extra keywords and a custom questionnaire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: RulesSection,
    #[serde(default)]
    pub keywords: KeywordsSection,
    #[serde(default)]
    pub questions: Vec<QuestionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesSection {
    pub strategy: Option<RuleSet>,
    pub split_on_commas: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordsSection {
    pub replace_defaults: Option<bool>,
    #[serde(default)]
    pub trigger: Vec<String>,
    #[serde(default)]
    pub stabilizer: Vec<String>,
    #[serde(default)]
    pub primer: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub prompt: String,
    /// Display labels with an embedded weight, e.g. `"없음 (0점)"`.
    pub options: Vec<String>,
}

impl RulesConfig {
    /// Reads and parses a rules file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LbasiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rules.strategy.unwrap_or_default()
    }

    pub fn split_on_commas(&self) -> bool {
        self.rules.split_on_commas.unwrap_or(false)
    }

    pub fn keyword_catalog(&self) -> Result<KeywordCatalog> {
        let mut catalog = if self.keywords.replace_defaults.unwrap_or(false) {
            KeywordCatalog::empty()
        } else {
            KeywordCatalog::default()
        };

        let extra = [
            (Role::Trigger, &self.keywords.trigger),
            (Role::Stabilizer, &self.keywords.stabilizer),
            (Role::Primer, &self.keywords.primer),
        ];
        for (role, keywords) in extra {
            for keyword in keywords {
                if !catalog.add_keyword(role, keyword)? {
                    tracing::debug!("Keyword '{}' already present for {}", keyword, role);
                }
            }
        }

        Ok(catalog)
    }

    /// Custom questionnaire, if the file defines one.
    pub fn questionnaire(&self) -> Option<Questionnaire> {
        if self.questions.is_empty() {
            return None;
        }
        let questions = self
            .questions
            .iter()
            .map(|q| {
                Question::new(
                    q.prompt.trim(),
                    q.options.iter().map(|l| AnswerOption::from_label(l.trim())).collect(),
                )
            })
            .collect();
        Some(Questionnaire::new(questions))
    }

    /// Builds a diagnoser; `rule_override` wins over the file's `rules.strategy`.
    pub fn build_diagnoser(&self, rule_override: Option<RuleSet>) -> Result<Diagnoser> {
        let rule_set = rule_override.unwrap_or_else(|| self.rule_set());
        self.validate_questionnaire_for(rule_set)?;
        let classifier =
            Classifier::new(self.keyword_catalog()?).with_comma_splitting(self.split_on_commas());

        let strategy = match self.questionnaire() {
            Some(questionnaire) => rule_set.strategy_with(questionnaire),
            None => rule_set.strategy(),
        };
        tracing::debug!("Using '{}' rules", strategy.name());

        Ok(Diagnoser::new(classifier, strategy))
    }

    pub fn validate_config(&self) -> Result<()> {
        let keyword_lists = [
            ("keywords.trigger", &self.keywords.trigger),
            ("keywords.stabilizer", &self.keywords.stabilizer),
            ("keywords.primer", &self.keywords.primer),
        ];
        for (field, keywords) in keyword_lists {
            for keyword in keywords {
                validation::validate_non_empty_string(field, keyword)?;
            }
        }

        for (i, question) in self.questions.iter().enumerate() {
            validation::validate_non_empty_string(&format!("questions[{}].prompt", i), &question.prompt)?;
            let options_field = format!("questions[{}].options", i);
            validation::validate_min_items(&options_field, &question.options, 1)?;
            for label in &question.options {
                validation::validate_non_empty_string(&options_field, label)?;
            }
        }

        self.validate_questionnaire_for(self.rule_set())
    }

    /// Ordinal rules read option points as levels, so they must stay within 0..=5.
    pub fn validate_questionnaire_for(&self, rule_set: RuleSet) -> Result<()> {
        if rule_set != RuleSet::Ordinal {
            return Ok(());
        }
        if let Some(questionnaire) = self.questionnaire() {
            for (i, question) in questionnaire.questions.iter().enumerate() {
                for option in &question.options {
                    validation::validate_range(
                        &format!("questions[{}].options", i),
                        option.points,
                        0,
                        OrdinalLevelStrategy::MAX_LEVEL,
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl Validate for RulesConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
