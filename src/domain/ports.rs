use crate::domain::model::{HistoryEntry, PatientRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 預測服務的原始回應，狀態碼與內容原樣保留。
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

pub trait FeatureSource: Send + Sync {
    fn load(&self) -> Result<Vec<String>>;
    fn describe(&self) -> String;
}

#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, record: &PatientRecord) -> Result<RawResponse>;
    fn endpoint(&self) -> &str;
}

pub trait HistoryStore: Send + Sync {
    fn entries(&self) -> Result<Vec<HistoryEntry>>;
    fn record(&self, entry: HistoryEntry) -> Result<()>;
}
