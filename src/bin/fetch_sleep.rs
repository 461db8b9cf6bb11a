use clap::Parser;
use oura_mcp::domain::model::parse_date;
use oura_mcp::utils::error::{OuraError, Result};
use oura_mcp::utils::validation::Validate;
use oura_mcp::{ConnectionArgs, LoadedConfig, SleepDataFetcher};

/// Fetch Oura daily sleep data once and print it.
#[derive(Debug, Parser)]
#[command(name = "fetch_sleep", version)]
struct FetchArgs {
    #[arg(long, required_unless_present = "document_id", help = "First day, YYYY-MM-DD")]
    start_date: Option<String>,

    #[arg(long, help = "Last day, YYYY-MM-DD (defaults to --start-date)")]
    end_date: Option<String>,

    #[arg(long, conflicts_with_all = ["start_date", "end_date"], help = "Fetch one document by id")]
    document_id: Option<String>,

    #[command(flatten)]
    connection: ConnectionArgs,
}

async fn run(args: &FetchArgs, loaded: LoadedConfig) -> Result<serde_json::Value> {
    loaded.oura.validate()?;
    let fetcher = SleepDataFetcher::new(&loaded.oura)?;

    match (&args.document_id, &args.start_date) {
        (Some(document_id), _) => fetcher.fetch_document(document_id).await,
        (None, Some(start)) => {
            let start_date = parse_date("start_date", start)?;
            let end_date = args
                .end_date
                .as_deref()
                .map(|end| parse_date("end_date", end))
                .transpose()?;
            fetcher.fetch(start_date, end_date).await
        }
        // clap requires --start-date when --document-id is absent
        (None, None) => Err(OuraError::InvalidDateError {
            field: "start_date".to_string(),
            value: String::new(),
        }),
    }
}

#[tokio::main]
async fn main() {
    let args = FetchArgs::parse();
    let loaded = args.connection.load();
    args.connection.init_logging(loaded.as_ref().ok());

    let outcome = match loaded {
        Ok(loaded) => run(&args, loaded).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(payload) => match serde_json::to_string_pretty(&payload) {
            Ok(pretty) => println!("{}", pretty),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!("❌ Fetch failed: {} (Category: {:?})", e, e.category());
            if let OuraError::UpstreamError { body, .. } = &e {
                eprintln!("{}", body);
            }
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }
}
