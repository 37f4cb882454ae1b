pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::{toml_config::ProbeConfig, Settings};

pub use adapters::{
    features::{ArtifactFeatureSource, FeatureFormat},
    history::JsonHistoryStore,
    http::HttpPredictionClient,
};
pub use core::{feature_lister::FeatureLister, smoke_test::SmokeTest};
pub use domain::model::{PatientRecord, Prediction, RiskBand};
pub use utils::error::{ProbeError, Result};
