use crate::domain::model::{parse_date, DateRange};
use crate::utils::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for `get_daily_sleep`.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailySleepRequest {
    #[schemars(description = "First day to fetch, as a calendar date in YYYY-MM-DD format.")]
    pub start_date: String,
    /// Omitted, null or blank means the same day as `start_date`.
    #[schemars(description = "Last day to fetch (inclusive), YYYY-MM-DD. Defaults to start_date.")]
    #[serde(default)]
    pub end_date: Option<String>,
}

impl DailySleepRequest {
    pub fn date_range(&self) -> Result<DateRange> {
        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = match self.end_date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date("end_date", value)?),
            _ => None,
        };
        Ok(DateRange::new(start_date, end_date))
    }
}

/// Parameters for `get_daily_sleep_document`.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SleepDocumentRequest {
    #[schemars(description = "Identifier of one daily sleep document, as returned in the `id` field by get_daily_sleep.")]
    pub document_id: String,
}
