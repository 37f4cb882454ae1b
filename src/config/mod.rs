#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::features::FeatureFormat;
use crate::core::smoke_test::DEFAULT_PREDICT_URL;
use crate::domain::model::PatientRecord;
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use toml_config::ProbeConfig;

pub const DEFAULT_FEATURES_PATH: &str = "BackEnd/features.pkl";
pub const DEFAULT_HISTORY_PATH: &str = ".cardio_history.json";

/// 個別覆寫病患欄位，TOML `[payload]` 與命令列共用
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct PayloadOverrides {
    #[cfg_attr(feature = "cli", arg(long))]
    pub age: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub height: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub weight: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub ap_hi: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub ap_lo: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub cholesterol: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub gluc: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub smoke: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub alco: Option<f64>,
    #[cfg_attr(feature = "cli", arg(long))]
    pub active: Option<f64>,
}

impl PayloadOverrides {
    pub fn apply(&self, base: PatientRecord) -> PatientRecord {
        PatientRecord {
            age: self.age.unwrap_or(base.age),
            height: self.height.unwrap_or(base.height),
            weight: self.weight.unwrap_or(base.weight),
            ap_hi: self.ap_hi.unwrap_or(base.ap_hi),
            ap_lo: self.ap_lo.unwrap_or(base.ap_lo),
            cholesterol: self.cholesterol.unwrap_or(base.cholesterol),
            gluc: self.gluc.unwrap_or(base.gluc),
            smoke: self.smoke.unwrap_or(base.smoke),
            alco: self.alco.unwrap_or(base.alco),
            active: self.active.unwrap_or(base.active),
        }
    }
}

/// 合併後的設定：命令列 > 設定檔 > 內建預設值
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint_url: String,
    pub timeout: Option<Duration>,
    pub headers: HashMap<String, String>,
    pub features_path: PathBuf,
    pub features_format: Option<FeatureFormat>,
    pub payload: PatientRecord,
    pub history_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_PREDICT_URL.to_string(),
            timeout: None,
            headers: HashMap::new(),
            features_path: PathBuf::from(DEFAULT_FEATURES_PATH),
            features_format: None,
            payload: PatientRecord::default(),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}

impl Settings {
    pub fn from_config(config: Option<&ProbeConfig>) -> Self {
        let mut settings = Self::default();
        let Some(config) = config else {
            return settings;
        };

        if let Some(url) = config.endpoint_url() {
            settings.endpoint_url = url.to_string();
        }
        settings.timeout = config.timeout_seconds().map(Duration::from_secs);
        settings.headers = config.headers();
        if let Some(path) = config.features_path() {
            settings.features_path = PathBuf::from(path);
        }
        settings.features_format = config.features_format();
        if let Some(payload) = &config.payload {
            settings.payload = payload.apply(settings.payload);
        }
        if let Some(path) = config.history_path() {
            settings.history_path = PathBuf::from(path);
        }
        settings
    }

    pub fn load(config_path: Option<&std::path::Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                let config = ProbeConfig::from_file(path)?;
                config.validate()?;
                Ok(Self::from_config(Some(&config)))
            }
            None => Ok(Self::default()),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint.url", &self.endpoint_url)?;
        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(ProbeError::InvalidConfigValueError {
                    field: "endpoint.timeout_seconds".to_string(),
                    value: timeout.as_secs().to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
        }
        validate_path("features.path", &self.features_path.to_string_lossy())?;
        validate_path("history.path", &self.history_path.to_string_lossy())?;
        Ok(())
    }
}
