use crate::domain::model::PatientRecord;
use crate::domain::ports::{PredictionClient, RawResponse};
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub struct HttpPredictionClient {
    client: Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// `timeout` 為 `None` 時不設逾時
    pub fn with_options(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
        headers: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ProbeError::InvalidConfigValueError {
                    field: "endpoint.headers".to_string(),
                    value: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ProbeError::InvalidConfigValueError {
                    field: format!("endpoint.headers.{}", key),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            default_headers.insert(name, value);
        }

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, record: &PatientRecord) -> Result<RawResponse> {
        let payload = record.to_json();
        tracing::debug!("POST {} with payload {}", self.endpoint, payload);

        let started = Instant::now();
        let response = self.client.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let elapsed = started.elapsed();

        tracing::debug!("Prediction service answered {} in {:?}", status, elapsed);

        Ok(RawResponse {
            status,
            body,
            elapsed,
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
