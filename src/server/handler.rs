use crate::core::SleepSource;
use crate::server::params::{DailySleepRequest, SleepDocumentRequest};
use crate::utils::error::OuraError;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use serde_json::{json, Value};
use std::sync::Arc;

/// MCP tool surface over a [`SleepSource`]. Cheap to clone; the source is shared.
#[derive(Clone)]
pub struct OuraMcpServer {
    tool_router: ToolRouter<Self>,
    source: Arc<dyn SleepSource>,
}

#[tool_router]
impl OuraMcpServer {
    pub fn new(source: Arc<dyn SleepSource>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            source,
        }
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Get Oura Ring daily sleep scores for a date range. Input: start_date (YYYY-MM-DD), optional end_date (YYYY-MM-DD, defaults to start_date). Returns the Oura API response unchanged: a `data` array of per-day documents with `id`, `day`, `score` and `contributors`."
    )]
    pub async fn get_daily_sleep(&self, param: Parameters<DailySleepRequest>) -> Result<CallToolResult, ErrorData> {
        let range = param.0.date_range().map_err(to_error_data)?;
        tracing::info!(
            tool = "get_daily_sleep",
            start_date = %range.start_date,
            end_date = %range.end_date,
            "Tool call"
        );

        let payload = self.source.daily_sleep(range).await.map_err(to_error_data)?;
        Ok(CallToolResult::structured(payload))
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Get a single Oura daily sleep document by its id (the `id` field of a get_daily_sleep entry). Returns the document unchanged."
    )]
    pub async fn get_daily_sleep_document(
        &self,
        param: Parameters<SleepDocumentRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "get_daily_sleep_document", document_id = %param.0.document_id, "Tool call");

        let payload = self
            .source
            .daily_sleep_document(&param.0.document_id)
            .await
            .map_err(to_error_data)?;
        Ok(CallToolResult::structured(payload))
    }
}

/// Maps a fetch failure to an MCP error. Caller input problems become
/// `invalid_params`; everything else is `internal_error` with the details in `data`.
pub fn to_error_data(err: OuraError) -> ErrorData {
    let mut data = json!({ "kind": err.kind() });
    if let OuraError::UpstreamError { status, body } = &err {
        data["status"] = json!(status);
        data["body"] = Value::String(body.clone());
    }

    let invalid_input = match &err {
        OuraError::InvalidDateError { .. } => true,
        OuraError::InvalidConfigValueError { field, .. } => field == "document_id",
        _ => false,
    };

    if invalid_input {
        tracing::debug!(error = %err, "Rejected tool arguments");
        ErrorData::invalid_params(err.to_string(), Some(data))
    } else {
        tracing::error!(error = %err, kind = err.kind(), "Tool call failed");
        ErrorData::internal_error(err.to_string(), Some(data))
    }
}

#[tool_handler]
impl ServerHandler for OuraMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "oura-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Oura Ring sleep data".to_string()),
                ..Default::default()
            },
            instructions: Some(
                "Read-only access to Oura Ring daily sleep scores. Call get_daily_sleep with start_date (and optionally end_date) in YYYY-MM-DD format; use get_daily_sleep_document to re-read one entry by id.".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_upstream_error_payload_keeps_status_and_body() {
        let err = to_error_data(OuraError::UpstreamError {
            status: 401,
            body: r#"{"detail":"Unauthorized"}"#.to_string(),
        });

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        let data = err.data.unwrap();
        assert_eq!(data["kind"], "upstream");
        assert_eq!(data["status"], 401);
        assert_eq!(data["body"], r#"{"detail":"Unauthorized"}"#);
    }

    #[test]
    fn test_invalid_date_is_invalid_params() {
        let err = to_error_data(OuraError::InvalidDateError {
            field: "start_date".to_string(),
            value: "yesterday".to_string(),
        });
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["kind"], "invalid_date");
    }

    #[test]
    fn test_missing_key_is_internal_configuration_error() {
        let err = to_error_data(OuraError::MissingConfigError {
            field: "OURA_API_KEY".to_string(),
        });
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.data.unwrap()["kind"], "configuration");
    }
}
