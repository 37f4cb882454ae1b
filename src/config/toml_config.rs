use crate::adapters::features::FeatureFormat;
use crate::config::PayloadOverrides;
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{validate_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub endpoint: Option<EndpointConfig>,
    pub features: Option<FeaturesConfig>,
    pub payload: Option<PayloadOverrides>,
    pub history: Option<HistoryConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesConfig {
    pub path: Option<String>,
    pub format: Option<FeatureFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub path: String,
}

impl ProbeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ProbeError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint.as_ref()?.url.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.endpoint.as_ref()?.timeout_seconds
    }

    pub fn headers(&self) -> HashMap<String, String> {
        self.endpoint
            .as_ref()
            .and_then(|e| e.headers.clone())
            .unwrap_or_default()
    }

    pub fn features_path(&self) -> Option<&str> {
        self.features.as_ref()?.path.as_deref()
    }

    pub fn features_format(&self) -> Option<FeatureFormat> {
        self.features.as_ref()?.format
    }

    pub fn history_path(&self) -> Option<&str> {
        self.history.as_ref().map(|h| h.path.as_str())
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = self.endpoint_url() {
            validate_url("endpoint.url", url)?;
        }

        if let Some(timeout) = self.timeout_seconds() {
            if timeout == 0 {
                return Err(ProbeError::InvalidConfigValueError {
                    field: "endpoint.timeout_seconds".to_string(),
                    value: timeout.to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
        }

        if let Some(path) = self.features_path() {
            validate_path("features.path", path)?;
        }

        if let Some(path) = self.history_path() {
            validate_path("history.path", path)?;
        }

        Ok(())
    }
}
