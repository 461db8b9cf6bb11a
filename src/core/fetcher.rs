use crate::config::{MAX_TIMEOUT_SECONDS, OURA_API_KEY_ENV};
use crate::core::{ConfigProvider, SleepSource};
use crate::domain::model::{ApiToken, DateRange};
use crate::utils::error::{OuraError, Result};
use crate::utils::validation::{
    validate_base_url, validate_non_empty_string, validate_range, validate_required_field,
};
use chrono::NaiveDate;
use reqwest::{Client, Request};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DAILY_SLEEP_PATH: &str = "/v2/usercollection/daily_sleep";
const DAILY_SLEEP_SEGMENTS: [&str; 3] = ["v2", "usercollection", "daily_sleep"];

/// Reads the Oura daily sleep collection. One GET per call, no retry, no cache.
#[derive(Debug, Clone)]
pub struct SleepDataFetcher {
    client: Client,
    base_url: Url,
    api_key: Option<ApiToken>,
}

impl SleepDataFetcher {
    /// Rejects a base URL with a query or fragment and a timeout outside 1..=300 s.
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = validate_base_url("base_url", config.base_url())?;
        validate_range("timeout_seconds", config.timeout_seconds(), 1, MAX_TIMEOUT_SECONDS)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(concat!("oura-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key().cloned(),
        })
    }

    fn token(&self) -> Result<&ApiToken> {
        validate_required_field(OURA_API_KEY_ENV, &self.api_key)
    }

    fn collection_url(&self, extra_segment: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| OuraError::ConfigError {
                message: format!("base_url cannot carry a path: {}", self.base_url),
            })?;
            segments.pop_if_empty().extend(DAILY_SLEEP_SEGMENTS);
            if let Some(segment) = extra_segment {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    pub fn build_daily_sleep_request(&self, range: &DateRange) -> Result<Request> {
        let token = self.token()?;
        let request = self
            .client
            .get(self.collection_url(None)?)
            .query(&range.query_pairs())
            .bearer_auth(token.expose())
            .build()?;
        Ok(request)
    }

    pub fn build_document_request(&self, document_id: &str) -> Result<Request> {
        let token = self.token()?;
        validate_non_empty_string("document_id", document_id)?;

        let url = self.collection_url(Some(document_id.trim()))?;
        let request = self.client.get(url).bearer_auth(token.expose()).build()?;
        Ok(request)
    }

    /// Fetches daily sleep documents; a missing `end_date` means a single day.
    pub async fn fetch(&self, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<Value> {
        self.fetch_range(DateRange::new(start_date, end_date)).await
    }

    pub async fn fetch_range(&self, range: DateRange) -> Result<Value> {
        let request = self.build_daily_sleep_request(&range)?;
        tracing::debug!(
            start_date = %range.start_date,
            end_date = %range.end_date,
            "Requesting daily sleep"
        );
        self.execute(request).await
    }

    pub async fn fetch_document(&self, document_id: &str) -> Result<Value> {
        let request = self.build_document_request(document_id)?;
        tracing::debug!(document_id = document_id.trim(), "Requesting daily sleep document");
        self.execute(request).await
    }

    async fn execute(&self, request: Request) -> Result<Value> {
        let response = self.client.execute(request).await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Oura API returned an error status");
            return Err(OuraError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl SleepSource for SleepDataFetcher {
    async fn daily_sleep(&self, range: DateRange) -> Result<Value> {
        self.fetch_range(range).await
    }

    async fn daily_sleep_document(&self, document_id: &str) -> Result<Value> {
        self.fetch_document(document_id).await
    }
}
