use async_trait::async_trait;
use httpmock::prelude::*;
use oura_mcp::core::SleepSource;
use oura_mcp::server::{DailySleepRequest, SleepDocumentRequest};
use oura_mcp::utils::error::Result;
use oura_mcp::{ApiToken, DateRange, OuraConfig, OuraError, OuraMcpServer, SleepDataFetcher};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use rmcp::ServerHandler;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct RecordingSource {
    ranges: Mutex<Vec<DateRange>>,
    documents: Mutex<Vec<String>>,
}

#[async_trait]
impl SleepSource for RecordingSource {
    async fn daily_sleep(&self, range: DateRange) -> Result<Value> {
        self.ranges.lock().await.push(range);
        Ok(json!({"data": [], "next_token": null}))
    }

    async fn daily_sleep_document(&self, document_id: &str) -> Result<Value> {
        self.documents.lock().await.push(document_id.to_string());
        if document_id == "missing" {
            return Err(OuraError::UpstreamError {
                status: 404,
                body: r#"{"detail":"Not Found"}"#.to_string(),
            });
        }
        Ok(json!({"id": document_id}))
    }
}

fn request(start: &str, end: Option<&str>) -> Parameters<DailySleepRequest> {
    Parameters(DailySleepRequest {
        start_date: start.to_string(),
        end_date: end.map(str::to_string),
    })
}

#[tokio::test]
async fn test_tool_defaults_end_date() {
    let source = Arc::new(RecordingSource::default());
    let server = OuraMcpServer::new(source.clone());

    let result = server.get_daily_sleep(request("2025-05-28", None)).await.unwrap();

    assert_eq!(result.structured_content, Some(json!({"data": [], "next_token": null})));
    let ranges = source.ranges.lock().await;
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].query_pairs()[0].1, "2025-05-28");
    assert_eq!(ranges[0].query_pairs()[1].1, "2025-05-28");
}

#[tokio::test]
async fn test_tool_rejects_malformed_date_without_calling_source() {
    let source = Arc::new(RecordingSource::default());
    let server = OuraMcpServer::new(source.clone());

    let err = server
        .get_daily_sleep(request("2025-13-01", Some("2025-05-30")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(source.ranges.lock().await.is_empty());
}

#[tokio::test]
async fn test_document_tool_surfaces_upstream_error() {
    let source = Arc::new(RecordingSource::default());
    let server = OuraMcpServer::new(source.clone());

    let ok = server
        .get_daily_sleep_document(Parameters(SleepDocumentRequest {
            document_id: "abc".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(ok.structured_content, Some(json!({"id": "abc"})));

    let err = server
        .get_daily_sleep_document(Parameters(SleepDocumentRequest {
            document_id: "missing".to_string(),
        }))
        .await
        .unwrap_err();
    let data = err.data.unwrap();
    assert_eq!(data["status"], 404);
    assert_eq!(data["body"], r#"{"detail":"Not Found"}"#);
}

#[tokio::test]
async fn test_end_to_end_with_http_fetcher() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/usercollection/daily_sleep")
                .query_param("start_date", "2025-05-28")
                .query_param("end_date", "2025-05-30")
                .header("Authorization", "Bearer live-token");
            then.status(200).json_body(json!({"data": [{"day": "2025-05-28", "score": 80}]}));
        })
        .await;

    let config = OuraConfig::new(ApiToken::new("live-token")).with_base_url(server.base_url());
    let fetcher = SleepDataFetcher::new(&config).unwrap();
    let mcp = OuraMcpServer::new(Arc::new(fetcher));

    let result = mcp
        .get_daily_sleep(request("2025-05-28", Some("2025-05-30")))
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(
        result.structured_content,
        Some(json!({"data": [{"day": "2025-05-28", "score": 80}]}))
    );
}

#[tokio::test]
async fn test_end_to_end_unauthorized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/usercollection/daily_sleep");
            then.status(401).body("unauthorized");
        })
        .await;

    let config = OuraConfig::new(ApiToken::new("bad")).with_base_url(server.base_url());
    let mcp = OuraMcpServer::new(Arc::new(SleepDataFetcher::new(&config).unwrap()));

    let err = mcp.get_daily_sleep(request("2025-05-28", None)).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    let data = err.data.unwrap();
    assert_eq!(data["kind"], "upstream");
    assert_eq!(data["status"], 401);
    assert_eq!(data["body"], "unauthorized");
}

#[test]
fn test_server_info_advertises_tools() {
    let server = OuraMcpServer::new(Arc::new(RecordingSource::default()));
    let info = server.get_info();

    assert_eq!(info.server_info.name, "oura-mcp");
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.unwrap().contains("get_daily_sleep"));
}

#[tokio::test]
async fn test_blank_document_id_is_invalid_params_without_request() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({"id": "unexpected"}));
        })
        .await;

    let config = OuraConfig::new(ApiToken::new("live-token")).with_base_url(server.base_url());
    let mcp = OuraMcpServer::new(Arc::new(SleepDataFetcher::new(&config).unwrap()));

    let err = mcp
        .get_daily_sleep_document(Parameters(SleepDocumentRequest {
            document_id: "  ".to_string(),
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    api_mock.assert_hits_async(0).await;
}
