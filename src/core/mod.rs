pub mod advisor;
pub mod feature_check;
pub mod feature_lister;
pub mod history;
pub mod simulator;

pub use crate::domain::model::{PatientRecord, Prediction, RiskBand};
pub use crate::domain::ports::{FeatureSource, HistoryStore, PredictionClient, RawResponse};
pub use crate::utils::error::Result;
