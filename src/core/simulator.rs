use crate::domain::model::{format_percent, PatientRecord};
use std::fmt;

const RISK_PER_YEAR: f64 = 0.008;
const SMOKING_IMPACT: f64 = 0.15;
const ACTIVITY_IMPACT: f64 = 0.10;
const MIN_RISK: f64 = 0.01;
const MAX_RISK: f64 = 0.99;

/// 假設情境，未指定的項目沿用原紀錄
#[derive(Debug, Clone, Copy, Default)]
pub struct Scenario {
    pub age: Option<f64>,
    pub smoke: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Worsening,
    NoChange,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Improving => "IMPROVING",
            Trend::Worsening => "WORSENING",
            Trend::NoChange => "NO CHANGE",
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub base_risk: f64,
    pub projected_risk: f64,
}

impl Projection {
    pub fn trend(&self) -> Trend {
        if self.projected_risk < self.base_risk {
            Trend::Improving
        } else if self.projected_risk > self.base_risk {
            Trend::Worsening
        } else {
            Trend::NoChange
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Projected Risk: {} (from {}) {}",
            format_percent(self.projected_risk),
            format_percent(self.base_risk),
            self.trend()
        )?;
        let message = if self.projected_risk < self.base_risk {
            "Great job! These changes could significantly lower your long-term risk."
        } else {
            "Caution: Maintaining these habits over time may increase your cardiovascular risk."
        };
        write!(f, "{}", message)
    }
}

pub fn project_risk(base_risk: f64, record: &PatientRecord, scenario: &Scenario) -> Projection {
    let mut risk = base_risk;

    let age = scenario.age.unwrap_or(record.age);
    risk += (age - record.age) * RISK_PER_YEAR;

    let smokes = scenario.smoke.unwrap_or(record.is_smoker());
    match (record.is_smoker(), smokes) {
        (true, false) => risk -= SMOKING_IMPACT,
        (false, true) => risk += SMOKING_IMPACT,
        _ => {}
    }

    let active = scenario.active.unwrap_or(record.is_active());
    match (record.is_active(), active) {
        (true, false) => risk += ACTIVITY_IMPACT,
        (false, true) => risk -= ACTIVITY_IMPACT,
        _ => {}
    }

    Projection {
        base_risk,
        projected_risk: risk.clamp(MIN_RISK, MAX_RISK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_scenario_keeps_risk() {
        let projection = project_risk(0.3, &PatientRecord::default(), &Scenario::default());
        assert!((projection.projected_risk - 0.3).abs() < 1e-9);
        assert_eq!(projection.trend(), Trend::NoChange);
    }

    #[test]
    fn test_quitting_smoking_and_aging() {
        let record = PatientRecord {
            smoke: 1.0,
            ..PatientRecord::default()
        };
        let scenario = Scenario {
            age: Some(60.0),
            smoke: Some(false),
            active: None,
        };
        let projection = project_risk(0.4, &record, &scenario);
        // 0.4 + 10 * 0.008 - 0.15
        assert!((projection.projected_risk - 0.33).abs() < 1e-9);
        assert_eq!(projection.trend(), Trend::Improving);
    }

    #[test]
    fn test_stopping_activity_worsens() {
        let scenario = Scenario {
            active: Some(false),
            ..Scenario::default()
        };
        let projection = project_risk(0.2, &PatientRecord::default(), &scenario);
        assert!((projection.projected_risk - 0.3).abs() < 1e-9);
        assert_eq!(projection.trend(), Trend::Worsening);
        assert!(projection.to_string().contains("WORSENING"));
    }

    #[test]
    fn test_projection_is_clamped() {
        let record = PatientRecord {
            active: 0.0,
            ..PatientRecord::default()
        };
        let scenario = Scenario {
            age: Some(20.0),
            smoke: None,
            active: Some(true),
        };
        let projection = project_risk(0.05, &record, &scenario);
        assert_eq!(projection.projected_risk, 0.01);

        let scenario = Scenario {
            age: Some(120.0),
            smoke: Some(true),
            active: None,
        };
        let projection = project_risk(0.9, &PatientRecord::default(), &scenario);
        assert_eq!(projection.projected_risk, 0.99);
    }
}
