use crate::domain::model::{format_percent, HistoryEntry, PatientRecord, Prediction, RiskBand};
use chrono::{DateTime, Utc};
use std::fmt;

pub fn entry_from_prediction(
    name: &str,
    prediction: &Prediction,
    record: &PatientRecord,
    now: DateTime<Utc>,
) -> HistoryEntry {
    HistoryEntry {
        name: name.to_string(),
        date: now.format("%Y-%m-%d").to_string(),
        timestamp: now.timestamp_millis(),
        risk: prediction.risk_probability,
        risk_category: prediction.risk_category.clone(),
        record: *record,
    }
}

/// 最新一筆與同一位病患前一次紀錄的比較
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub previous_percent: f64,
    pub diff: f64,
}

impl Comparison {
    pub fn is_improvement(&self) -> bool {
        self.diff > 0.0
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Risk {} by {:.1} points since last check ({:.1}%)",
            if self.is_improvement() { "Decreased" } else { "Increased" },
            self.diff.abs(),
            self.previous_percent
        )
    }
}

pub fn compare_latest(entries: &[HistoryEntry]) -> Option<Comparison> {
    let current = entries.first()?;
    let previous = entries[1..].iter().find(|entry| {
        entry.name.to_lowercase() == current.name.to_lowercase()
            && entry.timestamp != current.timestamp
    })?;
    Some(Comparison {
        previous_percent: previous.risk * 100.0,
        diff: previous.risk * 100.0 - current.risk * 100.0,
    })
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No predictions recorded yet".to_string();
    }

    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{}  {}  {:>6}  {}",
                entry.date,
                entry.name,
                format_percent(entry.risk),
                RiskBand::from_probability(entry.risk)
            )
        })
        .collect();

    if let Some(comparison) = compare_latest(entries) {
        lines.push(comparison.to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(date: &str, risk: f64) -> HistoryEntry {
        named_entry("Guest", date, risk)
    }

    fn named_entry(name: &str, date: &str, risk: f64) -> HistoryEntry {
        HistoryEntry {
            name: name.to_string(),
            date: date.to_string(),
            timestamp: chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp_millis(),
            risk,
            risk_category: None,
            record: PatientRecord::default(),
        }
    }

    #[test]
    fn test_entry_from_prediction() {
        let prediction: Prediction = serde_json::from_value(serde_json::json!({
            "risk_probability": 0.42,
            "risk_category": "Elevated"
        }))
        .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();

        let entry = entry_from_prediction("Ada", &prediction, &PatientRecord::default(), now);
        assert_eq!(entry.name, "Ada");
        assert_eq!(entry.date, "2024-03-09");
        assert_eq!(entry.timestamp, now.timestamp_millis());
        assert_eq!(entry.risk_category.as_deref(), Some("Elevated"));
    }

    #[test]
    fn test_compare_latest() {
        assert!(compare_latest(&[entry("2024-01-01", 0.3)]).is_none());

        let comparison =
            compare_latest(&[entry("2024-02-01", 0.25), entry("2024-01-01", 0.4)]).unwrap();
        assert!((comparison.diff - 15.0).abs() < 1e-9);
        assert!(comparison.is_improvement());
        assert!(comparison.to_string().starts_with("Risk Decreased by 15.0"));
    }

    #[test]
    fn test_compare_latest_only_matches_same_patient() {
        let entries = [
            named_entry("Ada", "2024-03-01", 0.2),
            named_entry("Grace", "2024-02-01", 0.6),
            named_entry("ada", "2024-01-01", 0.3),
        ];
        let comparison = compare_latest(&entries).unwrap();
        assert!((comparison.previous_percent - 30.0).abs() < 1e-9);
        assert!(comparison.is_improvement());

        let others = [
            named_entry("Ada", "2024-03-01", 0.2),
            named_entry("Grace", "2024-02-01", 0.6),
        ];
        assert!(compare_latest(&others).is_none());
    }

    #[test]
    fn test_compare_latest_skips_same_timestamp() {
        let entries = [
            named_entry("Ada", "2024-03-01", 0.2),
            named_entry("Ada", "2024-03-01", 0.4),
        ];
        assert!(compare_latest(&entries).is_none());
    }

    #[test]
    fn test_entry_without_name_defaults_to_guest() {
        let entry: HistoryEntry = serde_json::from_value(serde_json::json!({
            "date": "2024-01-01",
            "timestamp": 1,
            "risk": 0.1,
            "record": PatientRecord::default()
        }))
        .unwrap();
        assert_eq!(entry.name, "Guest");
    }

    #[test]
    fn test_render_history() {
        assert_eq!(render_history(&[]), "No predictions recorded yet");

        let rendered = render_history(&[entry("2024-02-01", 0.6), entry("2024-01-01", 0.15)]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("High Risk"));
        assert!(lines[1].ends_with("Normal"));
        assert!(lines[2].starts_with("Risk Increased"));
    }
}
