use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 送往 `/predict` 的病患資料，欄位名稱即 JSON key。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub ap_hi: f64,
    pub ap_lo: f64,
    pub cholesterol: f64,
    pub gluc: f64,
    pub smoke: f64,
    pub alco: f64,
    pub active: f64,
}

impl Default for PatientRecord {
    /// 冒煙測試使用的固定紀錄
    fn default() -> Self {
        Self {
            age: 50.0,
            height: 175.0,
            weight: 75.0,
            ap_hi: 120.0,
            ap_lo: 80.0,
            cholesterol: 1.0,
            gluc: 1.0,
            smoke: 0.0,
            alco: 0.0,
            active: 1.0,
        }
    }
}

impl PatientRecord {
    pub const FIELD_NAMES: [&'static str; 10] = [
        "age",
        "height",
        "weight",
        "ap_hi",
        "ap_lo",
        "cholesterol",
        "gluc",
        "smoke",
        "alco",
        "active",
    ];

    pub fn field_names() -> &'static [&'static str] {
        &Self::FIELD_NAMES
    }

    pub fn bmi(&self) -> f64 {
        let meters = self.height / 100.0;
        if meters <= 0.0 {
            return 0.0;
        }
        self.weight / (meters * meters)
    }

    pub fn is_smoker(&self) -> bool {
        self.smoke != 0.0
    }

    pub fn drinks_alcohol(&self) -> bool {
        self.alco != 0.0
    }

    pub fn is_active(&self) -> bool {
        self.active != 0.0
    }

    /// 整數值輸出成整數，與服務端期待的 JSON 一致（`50` 而非 `50.0`）
    pub fn to_json(&self) -> serde_json::Value {
        let values = [
            self.age,
            self.height,
            self.weight,
            self.ap_hi,
            self.ap_lo,
            self.cholesterol,
            self.gluc,
            self.smoke,
            self.alco,
            self.active,
        ];

        let mut map = serde_json::Map::new();
        for (name, value) in Self::FIELD_NAMES.iter().zip(values) {
            map.insert(name.to_string(), number_value(value));
        }
        serde_json::Value::Object(map)
    }
}

fn number_value(value: f64) -> serde_json::Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// `/predict` 回應的寬鬆視圖，只要求 `risk_probability`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub risk_probability: f64,
    #[serde(default)]
    pub risk_category: Option<String>,
    #[serde(default)]
    pub advice: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Prediction {
    pub fn band(&self) -> RiskBand {
        RiskBand::from_probability(self.risk_probability)
    }

    pub fn percent(&self) -> String {
        format_percent(self.risk_probability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Normal,
    Elevated,
    High,
}

impl RiskBand {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.5 {
            RiskBand::High
        } else if probability > 0.2 {
            RiskBand::Elevated
        } else {
            RiskBand::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Normal => "Normal",
            RiskBand::Elevated => "Elevated",
            RiskBand::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub const DEFAULT_PATIENT_NAME: &str = "Guest";

fn default_patient_name() -> String {
    DEFAULT_PATIENT_NAME.to_string()
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default = "default_patient_name")]
    pub name: String,
    pub date: String,
    pub timestamp: i64,
    pub risk: f64,
    #[serde(default)]
    pub risk_category: Option<String>,
    pub record: PatientRecord,
}
