use crate::domain::model::{AnswerOption, Guidance, Question, Questionnaire, Status, TriggerUse};
use crate::domain::ports::SeverityStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which severity rules evaluate the answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Six symptom questions whose points are summed.
    #[default]
    Summed,
    /// A single self-reported level from 1 to 5.
    Ordinal,
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSet::Summed => f.write_str("summed"),
            RuleSet::Ordinal => f.write_str("ordinal"),
        }
    }
}

impl RuleSet {
    pub fn strategy(self) -> Box<dyn SeverityStrategy> {
        match self {
            RuleSet::Summed => Box::new(SummedScoreStrategy::default()),
            RuleSet::Ordinal => Box::new(OrdinalLevelStrategy::default()),
        }
    }

    pub fn strategy_with(self, questionnaire: Questionnaire) -> Box<dyn SeverityStrategy> {
        match self {
            RuleSet::Summed => Box::new(SummedScoreStrategy::new(questionnaire)),
            RuleSet::Ordinal => Box::new(OrdinalLevelStrategy::new(questionnaire)),
        }
    }
}

fn question(prompt: &str, labels: &[&str]) -> Question {
    Question::new(
        prompt,
        labels.iter().map(|l| AnswerOption::from_label(*l)).collect(),
    )
}

/// Sum of six symptom questions. Thresholds: <3 Normal, 3-5 Caution,
/// 6-9 Warning, 10+ Danger.
#[derive(Debug, Clone)]
pub struct SummedScoreStrategy {
    questionnaire: Questionnaire,
}

impl SummedScoreStrategy {
    pub const CAUTION_AT: u32 = 3;
    pub const WARNING_AT: u32 = 6;
    pub const DANGER_AT: u32 = 10;

    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire }
    }

    pub fn default_questionnaire() -> Questionnaire {
        Questionnaire::new(vec![
            question(
                "바를 때 따가움이 있나요?",
                &[
                    "없음 (0점)",
                    "바를 때만 살짝 따끔하고 금방 사라져요 (1점)",
                    "10분 이상 따끔거려요 (2점)",
                    "참기 힘들 정도로 따갑거나 아파요 (3점)",
                ],
            ),
            question(
                "붉은 기가 있나요?",
                &[
                    "없음 (0점)",
                    "살짝 붉어졌다가 가라앉아요 (1점)",
                    "붉은 기가 10분 이상 가요 (2점)",
                    "얼굴 전체가 붉게 달아올라요 (3점)",
                ],
            ),
            question(
                "가려움이 있나요?",
                &["없음 (0점)", "가끔 가려워요 (1점)", "계속 긁고 싶어요 (2점)"],
            ),
            question(
                "각질이나 당김이 있나요?",
                &["없음 (0점)", "세안 후에만 당겨요 (1점)", "하얗게 일어나요 (2점)"],
            ),
            question(
                "부어오르거나 진물이 나나요?",
                &["없음 (0점)", "살짝 부었어요 (2점)", "진물이 나거나 심하게 부었어요 (4점)"],
            ),
            question(
                "증상이 얼마나 지속됐나요?",
                &["하루 미만 (0점)", "2~3일 (1점)", "일주일 이상 (2점)"],
            ),
        ])
    }
}

impl Default for SummedScoreStrategy {
    fn default() -> Self {
        Self::new(Self::default_questionnaire())
    }
}

impl SeverityStrategy for SummedScoreStrategy {
    fn name(&self) -> &'static str {
        "summed"
    }

    fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    fn score(&self, answers: &[AnswerOption]) -> u32 {
        score(answers)
    }

    fn status(&self, score: u32, recent_procedure: bool) -> Status {
        let by_score = match score {
            s if s >= Self::DANGER_AT => Status::Danger,
            s if s >= Self::WARNING_AT => Status::Warning,
            s if s >= Self::CAUTION_AT => Status::Caution,
            _ => Status::Normal,
        };
        apply_procedure_floor(by_score, recent_procedure)
    }
}

/// Self-reported level 1-5, mapped one to one onto Normal..Medical.
#[derive(Debug, Clone)]
pub struct OrdinalLevelStrategy {
    questionnaire: Questionnaire,
}

impl OrdinalLevelStrategy {
    pub const MAX_LEVEL: u32 = 5;

    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire }
    }

    pub fn default_questionnaire() -> Questionnaire {
        let levels = [
            "😄 1단계: 없음 (아주 편안해요)",
            "🙂 2단계: 미약함 (바를 때만 살짝 따끔하고 금방 사라져요)",
            "😐 3단계: 거슬림 (화끈거림이나 붉은 기가 10분 이상 가요)",
            "😣 4단계: 심함 (참기 힘들 정도로 따갑거나 아파요)",
            "😱 5단계: 매우 심함 (진물이 나거나 심하게 부어올랐어요)",
        ];
        let options = levels
            .iter()
            .zip(1u32..)
            .map(|(label, level)| AnswerOption::new(*label, level))
            .collect();
        Questionnaire::new(vec![Question::new("현재 피부 상태를 골라주세요", options)])
    }
}

impl Default for OrdinalLevelStrategy {
    fn default() -> Self {
        Self::new(Self::default_questionnaire())
    }
}

impl SeverityStrategy for OrdinalLevelStrategy {
    fn name(&self) -> &'static str {
        "ordinal"
    }

    fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// The level is the highest selected option, not a sum.
    fn score(&self, answers: &[AnswerOption]) -> u32 {
        answers
            .iter()
            .map(|a| a.points)
            .max()
            .unwrap_or(0)
            .min(Self::MAX_LEVEL)
    }

    fn status(&self, score: u32, recent_procedure: bool) -> Status {
        let by_level = match score {
            0 | 1 => Status::Normal,
            2 => Status::Caution,
            3 => Status::Warning,
            4 => Status::Danger,
            _ => Status::Medical,
        };
        apply_procedure_floor(by_level, recent_procedure)
    }
}

/// Skin after a recent procedure is treated as compromised whatever the answers say.
fn apply_procedure_floor(status: Status, recent_procedure: bool) -> Status {
    if recent_procedure {
        status.max(Status::Warning)
    } else {
        status
    }
}

pub fn score(answers: &[AnswerOption]) -> u32 {
    answers
        .iter()
        .fold(0u32, |acc, a| acc.saturating_add(a.points))
}

pub fn suppress_trigger(status: Status) -> bool {
    status >= Status::Warning
}

pub fn trigger_use(status: Status) -> TriggerUse {
    match status {
        Status::Normal => TriggerUse::Encourage,
        Status::Caution => TriggerUse::Halve,
        Status::Warning | Status::Danger | Status::Medical => TriggerUse::Stop,
    }
}

pub fn avoid_all_products(status: Status) -> bool {
    status == Status::Medical
}

pub fn advice(status: Status) -> &'static str {
    match status {
        Status::Normal => {
            "✅ 최적의 상태(Stable)입니다.\n\
             피부가 아주 편안하네요! 현재 루틴을 유지하시고, Trigger(기능성) 제품을 적극적으로 써서 효과를 보세요."
        }
        Status::Caution => {
            "🙂 괜찮은 상태(Acceptable)입니다.\n\
             약간 느낌은 있지만 계속 쓸 수 있어요. 단, Trigger 제품 양을 반으로 줄이거나, 이틀에 한 번만 쓰세요."
        }
        Status::Warning => {
            "✋ 주의(Caution) 단계입니다. Trigger를 멈추세요.\n\
             불편한 게 신경 쓰이기 시작했네요. 욕심내지 마세요. Trigger(기능성) 사용을 멈추고, Primer(장벽) 바르는 것에만 집중하세요."
        }
        Status::Danger => {
            "🚨 위험(Danger) 단계입니다. 즉시 중단하세요!\n\
             피부 장벽이 다쳤습니다. 모든 기능성 제품을 끊고, 순한 세안제와 진정 크림(Stabilizer)만 쓰세요. 증상이 계속되면 피부과 진료를 받으세요."
        }
        Status::Medical => {
            "🏥 병원에 가야 할 상태(Medical)입니다.\n\
             화장품으로 해결할 수 없습니다. 아무것도 바르지 말고 피부과 의사 선생님을 만나보세요."
        }
    }
}

pub fn guidance(status: Status) -> Guidance {
    Guidance {
        status,
        advice: advice(status).to_string(),
        suppress_trigger: suppress_trigger(status),
        trigger_use: trigger_use(status),
        avoid_all_products: avoid_all_products(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summed_thresholds() {
        let strategy = SummedScoreStrategy::default();
        assert_eq!(strategy.status(0, false), Status::Normal);
        assert_eq!(strategy.status(2, false), Status::Normal);
        assert_eq!(strategy.status(3, false), Status::Caution);
        assert_eq!(strategy.status(5, false), Status::Caution);
        assert_eq!(strategy.status(6, false), Status::Warning);
        assert_eq!(strategy.status(9, false), Status::Warning);
        assert_eq!(strategy.status(10, false), Status::Danger);
        assert_eq!(strategy.status(99, false), Status::Danger);
    }

    #[test]
    fn test_recent_procedure_floor() {
        let strategy = SummedScoreStrategy::default();
        assert_eq!(strategy.status(0, true), Status::Warning);
        assert_eq!(strategy.status(4, true), Status::Warning);
        assert_eq!(strategy.status(10, true), Status::Danger);
    }

    #[test]
    fn test_status_is_monotonic_in_score() {
        let strategies: [Box<dyn SeverityStrategy>; 2] =
            [RuleSet::Summed.strategy(), RuleSet::Ordinal.strategy()];
        for strategy in &strategies {
            for flag in [false, true] {
                let mut previous = Status::Normal;
                for score in 0..20 {
                    let status = strategy.status(score, flag);
                    assert!(status >= previous, "{} at {}", strategy.name(), score);
                    if flag {
                        assert!(status >= Status::Warning);
                    }
                    previous = status;
                }
            }
        }
    }

    #[test]
    fn test_default_questionnaire_shape() {
        let questionnaire = SummedScoreStrategy::default_questionnaire();
        assert_eq!(questionnaire.len(), 6);
        assert_eq!(questionnaire.max_score(), 16);
        assert!(questionnaire
            .questions
            .iter()
            .all(|q| q.options.first().map(|o| o.points) == Some(0)));
    }

    #[test]
    fn test_ordinal_levels() {
        let strategy = OrdinalLevelStrategy::default();
        let levels = strategy.questionnaire().questions[0].options.clone();
        let expected = [
            Status::Normal,
            Status::Caution,
            Status::Warning,
            Status::Danger,
            Status::Medical,
        ];
        for (option, status) in levels.iter().zip(expected) {
            let score = strategy.score(std::slice::from_ref(option));
            assert_eq!(strategy.status(score, false), status);
        }
        assert_eq!(strategy.score(&[]), 0);
        assert_eq!(strategy.score(&[AnswerOption::new("x", 42)]), 5);
    }

    #[test]
    fn test_score_saturates_on_huge_weights() {
        let answers = vec![
            AnswerOption::from_label("a (4000000000점)"),
            AnswerOption::from_label("b (4000000000점)"),
        ];
        assert_eq!(score(&answers), u32::MAX);

        let strategy = SummedScoreStrategy::new(Questionnaire::new(vec![
            question("q1", &["a (4000000000점)"]),
            question("q2", &["b (4000000000점)"]),
        ]));
        assert_eq!(strategy.questionnaire().max_score(), u32::MAX);
        let answers = strategy.questionnaire().answer(&[0, 0]);
        assert_eq!(strategy.status(strategy.score(&answers), false), Status::Danger);
    }

    #[test]
    fn test_trigger_rules() {
        assert!(!suppress_trigger(Status::Normal));
        assert!(!suppress_trigger(Status::Caution));
        assert!(suppress_trigger(Status::Warning));
        assert!(suppress_trigger(Status::Danger));
        assert!(suppress_trigger(Status::Medical));
        assert_eq!(trigger_use(Status::Caution), TriggerUse::Halve);
        assert!(avoid_all_products(Status::Medical));
        assert!(!avoid_all_products(Status::Danger));
    }

    #[test]
    fn test_guidance_carries_advice() {
        let g = guidance(Status::Warning);
        assert!(g.suppress_trigger);
        assert_eq!(g.trigger_use, TriggerUse::Stop);
        assert!(g.advice.contains("Trigger를 멈추세요"));
    }
}
