use crate::domain::ports::FeatureSource;
use crate::utils::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use serde_pickle::{DeOptions, HashableValue, Value as PickleValue};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FeatureFormat {
    Pickle,
    Json,
    Csv,
    Text,
}

impl FeatureFormat {
    /// 依副檔名判斷格式，無法辨識時視為純文字
    pub fn detect(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pkl") | Some("pickle") | Some("joblib") => FeatureFormat::Pickle,
            Some("json") => FeatureFormat::Json,
            Some("csv") => FeatureFormat::Csv,
            _ => FeatureFormat::Text,
        }
    }
}

/// 從本機檔案讀取特徵清單
#[derive(Debug, Clone)]
pub struct ArtifactFeatureSource {
    path: PathBuf,
    format: FeatureFormat,
}

impl ArtifactFeatureSource {
    pub fn new(path: impl Into<PathBuf>, format: Option<FeatureFormat>) -> Self {
        let path = path.into();
        let format = format.unwrap_or_else(|| FeatureFormat::detect(&path));
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FeatureFormat {
        self.format
    }

    fn shape_error(&self, reason: impl Into<String>) -> ProbeError {
        ProbeError::ArtifactShapeError {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }

    fn parse_pickle(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let value = serde_pickle::value_from_slice(bytes, DeOptions::new())?;

        let items: Vec<PickleValue> = match value {
            PickleValue::List(items) | PickleValue::Tuple(items) => items,
            PickleValue::Set(items) | PickleValue::FrozenSet(items) => {
                items.into_iter().map(HashableValue::into_value).collect()
            }
            other => {
                return Err(self.shape_error(format!(
                    "expected a pickled list of strings, found {}",
                    pickle_kind(&other)
                )))
            }
        };

        items
            .into_iter()
            .map(|item| match item {
                PickleValue::String(name) => Ok(name),
                other => Err(self.shape_error(format!(
                    "feature entries must be strings, found {}",
                    pickle_kind(&other)
                ))),
            })
            .collect()
    }

    fn parse_json(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;

        let items = match value {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(mut obj) => match obj.remove("features") {
                Some(serde_json::Value::Array(items)) => items,
                _ => return Err(self.shape_error("object has no \"features\" array")),
            },
            _ => return Err(self.shape_error("expected an array of strings")),
        };

        items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(name) => Ok(name),
                other => Err(self.shape_error(format!(
                    "feature entries must be strings, found {}",
                    other
                ))),
            })
            .collect()
    }

    fn parse_csv(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?;
        if headers.is_empty() {
            return Err(self.shape_error("CSV file has no header row"));
        }

        Ok(headers.iter().map(|h| h.trim().to_string()).collect())
    }

    fn parse_text(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| self.shape_error(format!("text artifact is not UTF-8: {}", e)))?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}

impl FeatureSource for ArtifactFeatureSource {
    fn load(&self) -> Result<Vec<String>> {
        tracing::debug!(
            "Loading feature artifact {} as {:?}",
            self.path.display(),
            self.format
        );
        let bytes = fs::read(&self.path)?;

        let features = match self.format {
            FeatureFormat::Pickle => self.parse_pickle(&bytes)?,
            FeatureFormat::Json => self.parse_json(&bytes)?,
            FeatureFormat::Csv => self.parse_csv(&bytes)?,
            FeatureFormat::Text => self.parse_text(&bytes)?,
        };

        tracing::debug!("Loaded {} features", features.len());
        Ok(features)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn pickle_kind(value: &PickleValue) -> &'static str {
    match value {
        PickleValue::None => "None",
        PickleValue::Bool(_) => "bool",
        PickleValue::I64(_) | PickleValue::Int(_) => "int",
        PickleValue::F64(_) => "float",
        PickleValue::Bytes(_) => "bytes",
        PickleValue::String(_) => "str",
        PickleValue::List(_) => "list",
        PickleValue::Tuple(_) => "tuple",
        PickleValue::Set(_) => "set",
        PickleValue::FrozenSet(_) => "frozenset",
        PickleValue::Dict(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn artifact(suffix: &str, content: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_detect_format_from_extension() {
        assert_eq!(FeatureFormat::detect(Path::new("features.pkl")), FeatureFormat::Pickle);
        assert_eq!(FeatureFormat::detect(Path::new("model.JOBLIB")), FeatureFormat::Pickle);
        assert_eq!(FeatureFormat::detect(Path::new("features.json")), FeatureFormat::Json);
        assert_eq!(FeatureFormat::detect(Path::new("cardio_train.csv")), FeatureFormat::Csv);
        assert_eq!(FeatureFormat::detect(Path::new("features")), FeatureFormat::Text);
    }

    #[test]
    fn test_load_pickled_list() {
        let names = vec!["age".to_string(), "ap_hi".to_string(), "bmi".to_string()];
        let bytes = serde_pickle::to_vec(&names, serde_pickle::SerOptions::new()).unwrap();
        let file = artifact(".pkl", &bytes);

        let source = ArtifactFeatureSource::new(file.path(), None);
        assert_eq!(source.load().unwrap(), names);
    }

    #[test]
    fn test_pickled_dict_is_shape_error() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("age".to_string(), 1i64);
        let bytes = serde_pickle::to_vec(&map, serde_pickle::SerOptions::new()).unwrap();
        let file = artifact(".pkl", &bytes);

        let err = ArtifactFeatureSource::new(file.path(), None).load().unwrap_err();
        assert!(matches!(err, ProbeError::ArtifactShapeError { .. }));
        assert!(err.to_string().contains("dict"));
    }

    #[test]
    fn test_load_json_array_and_object() {
        let file = artifact(".json", br#"["age", "height"]"#);
        let source = ArtifactFeatureSource::new(file.path(), None);
        assert_eq!(source.load().unwrap(), vec!["age", "height"]);

        let file = artifact(".json", br#"{"features": ["gluc"], "version": 3}"#);
        let source = ArtifactFeatureSource::new(file.path(), None);
        assert_eq!(source.load().unwrap(), vec!["gluc"]);
    }

    #[test]
    fn test_json_with_non_string_entry_fails() {
        let file = artifact(".json", br#"["age", 3]"#);
        let err = ArtifactFeatureSource::new(file.path(), None).load().unwrap_err();
        assert!(matches!(err, ProbeError::ArtifactShapeError { .. }));
    }

    #[test]
    fn test_load_csv_header() {
        let file = artifact(".csv", b"age,gender, height\n18393,2,168\n");
        let source = ArtifactFeatureSource::new(file.path(), None);
        assert_eq!(source.load().unwrap(), vec!["age", "gender", "height"]);
    }

    #[test]
    fn test_load_text_skips_blank_and_comment_lines() {
        let file = artifact(".txt", b"# exported features\nage\n\n  weight  \n");
        let source = ArtifactFeatureSource::new(file.path(), None);
        assert_eq!(source.load().unwrap(), vec!["age", "weight"]);
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let file = artifact(".dat", br#"["smoke"]"#);
        let source = ArtifactFeatureSource::new(file.path(), Some(FeatureFormat::Json));
        assert_eq!(source.format(), FeatureFormat::Json);
        assert_eq!(source.load().unwrap(), vec!["smoke"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = ArtifactFeatureSource::new("/definitely/not/here/features.pkl", None);
        assert!(matches!(source.load().unwrap_err(), ProbeError::IoError(_)));
    }
}
