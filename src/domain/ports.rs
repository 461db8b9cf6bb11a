use crate::domain::model::{ApiToken, DateRange};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&ApiToken>;
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// Source of daily sleep documents. Responses are opaque JSON.
#[async_trait]
pub trait SleepSource: Send + Sync {
    async fn daily_sleep(&self, range: DateRange) -> Result<Value>;
    async fn daily_sleep_document(&self, document_id: &str) -> Result<Value>;
}
