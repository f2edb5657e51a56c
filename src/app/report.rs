use crate::domain::model::{Diagnosis, ProductEntry, Role, Status, TriggerUse};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(diagnosis: &Diagnosis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(diagnosis)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(diagnosis)?),
        OutputFormat::Csv => render_csv(diagnosis),
    }
}

fn status_banner(status: Status) -> &'static str {
    match status {
        Status::Normal => "[OK]",
        Status::Caution => "[INFO]",
        Status::Warning => "[WARN]",
        Status::Danger | Status::Medical => "[ERROR]",
    }
}

/// Per-entry marker shown next to a product, e.g. `⛔ ~~레티놀 앰플~~ (중단)`.
pub fn annotate(role: Role, entry: &ProductEntry, trigger_use: TriggerUse) -> String {
    match role {
        Role::Primer => format!("Op: {}", entry),
        Role::Trigger => match trigger_use {
            TriggerUse::Stop => format!("⛔ ~~{}~~ (중단)", entry),
            TriggerUse::Halve => format!("⚠️ {} (양 줄이기)", entry),
            TriggerUse::Encourage => format!("⚡ {}", entry),
        },
        Role::Stabilizer => format!("🛡️ {}", entry),
        Role::Unknown => entry.to_string(),
    }
}

fn annotation_code(role: Role, trigger_use: TriggerUse) -> &'static str {
    match (role, trigger_use) {
        (Role::Trigger, TriggerUse::Stop) => "stop",
        (Role::Trigger, TriggerUse::Halve) => "reduce",
        (Role::Unknown, _) => "unclassified",
        _ => "use",
    }
}

pub fn render_text(diagnosis: &Diagnosis) -> String {
    let guidance = &diagnosis.guidance;
    let mut lines = vec![
        "📊 L-BASI 분석 결과".to_string(),
        format!(
            "{} {} (score {}, rules: {})",
            status_banner(guidance.status),
            guidance.status,
            diagnosis.score,
            diagnosis.strategy
        ),
        guidance.advice.clone(),
    ];
    lines.extend(diagnosis.notices.iter().map(|notice| format!("※ {}", notice)));

    lines.push(String::new());
    lines.push("🧴 당신의 화장품 재배치".to_string());
    for (i, role) in Role::DISPLAY_ORDER.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, role.caption()));
        let entries = diagnosis.routine.bucket(*role);
        if entries.is_empty() {
            lines.push("   없음".to_string());
        }
        for entry in entries {
            lines.push(format!("   {}", annotate(*role, entry, guidance.trigger_use)));
        }
    }

    if !diagnosis.routine.unknown.is_empty() {
        let unknown: Vec<&str> = diagnosis.routine.unknown.iter().map(ProductEntry::as_str).collect();
        lines.push(format!("※ 분류 불가: {}", unknown.join(", ")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_csv(diagnosis: &Diagnosis) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["role", "product", "annotation"])?;

    let roles = Role::DISPLAY_ORDER.iter().chain(std::iter::once(&Role::Unknown));
    for role in roles {
        for entry in diagnosis.routine.bucket(*role) {
            writer.write_record([
                role.name(),
                entry.as_str(),
                annotation_code(*role, diagnosis.guidance.trigger_use),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::severity;
    use crate::domain::model::Routine;

    fn diagnosis(status: Status) -> Diagnosis {
        let mut routine = Routine::new();
        routine.push(Role::Trigger, ProductEntry::new("레티놀 앰플").unwrap());
        routine.push(Role::Primer, ProductEntry::new("세라마이드 크림").unwrap());
        routine.push(Role::Unknown, ProductEntry::new("정체불명 앰플").unwrap());
        Diagnosis {
            routine,
            strategy: "summed".to_string(),
            score: 7,
            recent_procedure: false,
            guidance: severity::guidance(status),
            notices: vec![],
            generated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_text_marks_suppressed_triggers() {
        let text = render_text(&diagnosis(Status::Warning));
        assert!(text.contains("⛔ ~~레티놀 앰플~~ (중단)"));
        assert!(text.contains("Op: 세라마이드 크림"));
        assert!(text.contains("3. Stabilizer (안정화)\n   없음"));
        assert!(text.contains("※ 분류 불가: 정체불명 앰플"));
    }

    #[test]
    fn test_text_layout_with_notices() {
        let mut d = diagnosis(Status::Normal);
        d.notices.push("이미지에서 글자를 읽지 못했습니다.".to_string());
        let text = render_text(&d);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "📊 L-BASI 분석 결과");
        assert_eq!(lines[1], "[OK] Normal (score 7, rules: summed)");
        assert!(lines.contains(&"※ 이미지에서 글자를 읽지 못했습니다."));
        assert!(lines.contains(&"1. Primer (환경조성)"));
        assert!(text.ends_with("※ 분류 불가: 정체불명 앰플\n"));
    }

    #[test]
    fn test_text_trigger_annotations_follow_status() {
        assert!(render_text(&diagnosis(Status::Caution)).contains("⚠️ 레티놀 앰플 (양 줄이기)"));
        assert!(render_text(&diagnosis(Status::Normal)).contains("⚡ 레티놀 앰플"));
    }

    #[test]
    fn test_csv_rows() {
        let csv = render_csv(&diagnosis(Status::Danger)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "role,product,annotation");
        assert_eq!(lines[1], "Primer,세라마이드 크림,use");
        assert_eq!(lines[2], "Trigger,레티놀 앰플,stop");
        assert_eq!(lines[3], "Unknown,정체불명 앰플,unclassified");
    }

    #[test]
    fn test_json_contains_guidance() {
        let json = render(&diagnosis(Status::Warning), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["guidance"]["status"], "Warning");
        assert_eq!(value["guidance"]["suppress_trigger"], true);
        assert_eq!(value["routine"]["Trigger"][0], "레티놀 앰플");
    }
}
