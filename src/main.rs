use clap::Parser;
use oura_mcp::utils::error::OuraError;
use oura_mcp::utils::validation::Validate;
use oura_mcp::{CliConfig, OuraMcpServer, SleepDataFetcher};
use rmcp::{transport::stdio, ServiceExt};
use std::sync::Arc;

fn fail(e: OuraError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();
    let loaded = cli.connection.load();

    cli.connection.init_logging(loaded.as_ref().ok());

    let loaded = loaded.unwrap_or_else(|e| fail(e));
    if let Err(e) = loaded.oura.validate() {
        fail(e);
    }

    tracing::info!(
        base_url = %loaded.oura.base_url,
        timeout_seconds = loaded.oura.timeout_seconds,
        "Starting oura-mcp"
    );

    let fetcher = SleepDataFetcher::new(&loaded.oura).unwrap_or_else(|e| fail(e));
    let server = OuraMcpServer::new(Arc::new(fetcher));

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("MCP serve error: {:?}", e);
    })?;

    tracing::info!("MCP server running on stdio");
    let quit_reason = service.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
