use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pickle error: {0}")]
    PickleError(#[from] serde_pickle::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unsupported artifact shape in {path}: {reason}")]
    ArtifactShapeError { path: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Artifact,
    Config,
    Validation,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// `--strict` 模式下的退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ProbeError {
    pub fn config(message: impl Into<String>) -> Self {
        ProbeError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::ApiError(_) => ErrorCategory::Network,
            ProbeError::IoError(_) => ErrorCategory::Io,
            ProbeError::SerializationError(_)
            | ProbeError::PickleError(_)
            | ProbeError::CsvError(_)
            | ProbeError::ArtifactShapeError { .. } => ErrorCategory::Artifact,
            ProbeError::TomlError(_)
            | ProbeError::ConfigError { .. }
            | ProbeError::MissingConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            ProbeError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 服務未啟動或逾時，稍後重試即可
            ProbeError::ApiError(_) => ErrorSeverity::Medium,
            ProbeError::ValidationError { .. } => ErrorSeverity::Low,
            ProbeError::IoError(_)
            | ProbeError::SerializationError(_)
            | ProbeError::PickleError(_)
            | ProbeError::CsvError(_)
            | ProbeError::ArtifactShapeError { .. } => ErrorSeverity::High,
            ProbeError::TomlError(_)
            | ProbeError::ConfigError { .. }
            | ProbeError::MissingConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the prediction service: {}", self),
            ErrorCategory::Artifact => format!("Could not read the feature artifact: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::Validation => format!("Input looks wrong: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProbeError::ApiError(e) if e.is_connect() => {
                "Start the prediction service (e.g. on 127.0.0.1:8000) and try again"
            }
            ProbeError::ApiError(e) if e.is_timeout() => {
                "Increase --timeout-secs or check the service load"
            }
            ProbeError::ApiError(_) => "Check the endpoint URL and the service logs",
            ProbeError::IoError(_) => "Check that the path exists and is readable",
            ProbeError::PickleError(_) => {
                "Re-export the feature list as a plain Python list of strings, or as JSON"
            }
            ProbeError::SerializationError(_)
            | ProbeError::CsvError(_)
            | ProbeError::ArtifactShapeError { .. } => {
                "Pass --format to override the detected artifact format"
            }
            ProbeError::TomlError(_) => "Fix the TOML syntax in the config file",
            ProbeError::ConfigError { .. }
            | ProbeError::MissingConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. } => {
                "Review the config file and command line flags"
            }
            ProbeError::ValidationError { .. } => "Double-check the patient field values",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_errors_are_high_severity() {
        let err = ProbeError::ArtifactShapeError {
            path: "features.json".to_string(),
            reason: "expected a list".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Artifact);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.severity().exit_code(), 1);
        assert!(err.user_friendly_message().contains("features.json"));
    }

    #[test]
    fn test_io_error_keeps_os_description() {
        let err: ProbeError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory").into();
        assert_eq!(err.to_string(), "No such file or directory");
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_user_friendly_message_names_the_failing_area() {
        let err = ProbeError::InvalidConfigValueError {
            field: "endpoint.timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "Timeout must be at least 1 second".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Invalid configuration: Invalid value for endpoint.timeout_seconds (0): Timeout must be at least 1 second"
        );
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = ProbeError::config("bad");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
    }
}
