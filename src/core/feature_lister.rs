use crate::domain::ports::FeatureSource;
use crate::utils::error::ProbeError;
use std::fmt;

pub const FEATURE_BANNER: &str = "--- REQUIRED FEATURES ---";

/// 讀取一次特徵檔並產生報告，錯誤不往外拋
pub struct FeatureLister<F: FeatureSource> {
    source: F,
}

#[derive(Debug)]
pub enum FeatureReport {
    Listed(Vec<String>),
    Failed(ProbeError),
}

impl<F: FeatureSource> FeatureLister<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    pub fn run(&self) -> FeatureReport {
        tracing::info!("📂 Reading feature artifact {}", self.source.describe());

        match self.source.load() {
            Ok(features) => {
                tracing::info!("✅ Loaded {} features", features.len());
                FeatureReport::Listed(features)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Feature artifact could not be loaded: {} (Category: {:?})",
                    e,
                    e.category()
                );
                FeatureReport::Failed(e)
            }
        }
    }
}

impl FeatureReport {
    pub fn features(&self) -> Option<&[String]> {
        match self {
            FeatureReport::Listed(features) => Some(features),
            FeatureReport::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ProbeError> {
        match self {
            FeatureReport::Listed(_) => None,
            FeatureReport::Failed(e) => Some(e),
        }
    }
}

impl fmt::Display for FeatureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureReport::Listed(features) => {
                write!(f, "{}", FEATURE_BANNER)?;
                for feature in features {
                    write!(f, "\n{}", feature)?;
                }
                Ok(())
            }
            FeatureReport::Failed(e) => write!(f, "Error: {}", e),
        }
    }
}
