use std::collections::HashSet;
use std::fmt;

/// 模型特徵與請求欄位的差異
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureCheck {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl FeatureCheck {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

pub fn check_payload(features: &[String], payload_fields: &[&str]) -> FeatureCheck {
    let payload: HashSet<&str> = payload_fields.iter().copied().collect();
    let expected: HashSet<&str> = features.iter().map(String::as_str).collect();

    let missing = features
        .iter()
        .filter(|f| !payload.contains(f.as_str()))
        .cloned()
        .collect();

    let unexpected = payload_fields
        .iter()
        .filter(|f| !expected.contains(*f))
        .map(|f| f.to_string())
        .collect();

    FeatureCheck {
        missing,
        unexpected,
    }
}

impl fmt::Display for FeatureCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_consistent() {
            return write!(f, "✅ payload matches features");
        }

        let mut lines = Vec::new();
        if !self.missing.is_empty() {
            lines.push(format!("Missing from payload: {}", self.missing.join(", ")));
        }
        if !self.unexpected.is_empty() {
            lines.push(format!("Not used by model: {}", self.unexpected.join(", ")));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PatientRecord;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matching_features() {
        let features = names(PatientRecord::field_names());
        let check = check_payload(&features, PatientRecord::field_names());
        assert!(check.is_consistent());
        assert_eq!(check.to_string(), "✅ payload matches features");
    }

    #[test]
    fn test_reports_both_directions_in_order() {
        let features = names(&["gender", "age", "bmi", "height"]);
        let check = check_payload(&features, &["age", "height", "smoke", "active"]);

        assert_eq!(check.missing, names(&["gender", "bmi"]));
        assert_eq!(check.unexpected, names(&["smoke", "active"]));
        assert_eq!(
            check.to_string(),
            "Missing from payload: gender, bmi\nNot used by model: smoke, active"
        );
    }
}
