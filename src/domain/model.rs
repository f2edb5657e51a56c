use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Unit suffix used in option labels, e.g. `붉은 기가 10분 이상 가요 (2점)`.
pub const POINT_UNIT: &str = "점";

static POINTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\((\d+)\s*{}\)", POINT_UNIT)).expect("point pattern is a valid regex")
});

/// One product line as the user typed it. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductEntry(String);

impl ProductEntry {
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Primer,
    Trigger,
    Stabilizer,
    Unknown,
}

impl Role {
    /// Order in which the routine is applied and displayed.
    pub const DISPLAY_ORDER: [Role; 3] = [Role::Primer, Role::Trigger, Role::Stabilizer];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Primer => "Primer",
            Role::Trigger => "Trigger",
            Role::Stabilizer => "Stabilizer",
            Role::Unknown => "Unknown",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Role::Primer => "Primer (환경조성)",
            Role::Trigger => "Trigger (기능활성)",
            Role::Stabilizer => "Stabilizer (안정화)",
            Role::Unknown => "Unknown (분류 불가)",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Products grouped by role. Each classified entry lands in exactly one
/// bucket, and every bucket keeps input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    #[serde(rename = "Primer")]
    pub primer: Vec<ProductEntry>,
    #[serde(rename = "Trigger")]
    pub trigger: Vec<ProductEntry>,
    #[serde(rename = "Stabilizer")]
    pub stabilizer: Vec<ProductEntry>,
    #[serde(rename = "Unknown")]
    pub unknown: Vec<ProductEntry>,
}

impl Routine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, role: Role) -> &[ProductEntry] {
        match role {
            Role::Primer => &self.primer,
            Role::Trigger => &self.trigger,
            Role::Stabilizer => &self.stabilizer,
            Role::Unknown => &self.unknown,
        }
    }

    fn bucket_mut(&mut self, role: Role) -> &mut Vec<ProductEntry> {
        match role {
            Role::Primer => &mut self.primer,
            Role::Trigger => &mut self.trigger,
            Role::Stabilizer => &mut self.stabilizer,
            Role::Unknown => &mut self.unknown,
        }
    }

    pub fn push(&mut self, role: Role, entry: ProductEntry) {
        self.bucket_mut(role).push(entry);
    }

    /// Appends every bucket of `other` after the matching bucket of `self`.
    pub fn merge(&mut self, other: Routine) {
        self.primer.extend(other.primer);
        self.trigger.extend(other.trigger);
        self.stabilizer.extend(other.stabilizer);
        self.unknown.extend(other.unknown);
    }

    pub fn len(&self) -> usize {
        self.primer.len() + self.trigger.len() + self.stabilizer.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extracts `N` from a `(N점)` group in an option label. The last group wins;
/// a label without one scores zero.
pub fn parse_points(label: &str) -> u32 {
    POINTS_RE
        .captures_iter(label)
        .last()
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub points: u32,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, points: u32) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Builds an option from a display label carrying its weight, e.g. `없음 (0점)`.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let points = parse_points(&label);
        Self { label, points }
    }

    /// Placeholder for an unanswered question.
    pub fn unanswered() -> Self {
        Self::new("(무응답)", 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }

    pub fn max_points(&self) -> u32 {
        self.options.iter().map(|o| o.points).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub questions: Vec<Question>,
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn max_score(&self) -> u32 {
        self.questions
            .iter()
            .map(Question::max_points)
            .fold(0u32, u32::saturating_add)
    }

    /// Resolves one option index per question. Missing or out-of-range
    /// selections become zero-point placeholders; extra selections are ignored.
    pub fn answer(&self, selections: &[usize]) -> Vec<AnswerOption> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                match selections.get(i).and_then(|&idx| question.options.get(idx)) {
                    Some(option) => option.clone(),
                    None => {
                        tracing::debug!("No valid answer for question {}, scoring zero", i + 1);
                        AnswerOption::unanswered()
                    }
                }
            })
            .collect()
    }
}

/// Severity tier. Later variants are strictly more restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Normal,
    Caution,
    Warning,
    Danger,
    Medical,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Normal => "Normal",
            Status::Caution => "Caution",
            Status::Warning => "Warning",
            Status::Danger => "Danger",
            Status::Medical => "Medical",
        };
        f.write_str(name)
    }
}

/// How Trigger products should be used under a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerUse {
    Encourage,
    Halve,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    pub status: Status,
    pub advice: String,
    pub suppress_trigger: bool,
    pub trigger_use: TriggerUse,
    pub avoid_all_products: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub routine: Routine,
    pub strategy: String,
    pub score: u32,
    pub recent_procedure: bool,
    pub guidance: Guidance,
    pub notices: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
