use crate::config::toml_config::TomlConfig;
use crate::config::OuraConfig;
use crate::utils::error::Result;
use crate::utils::logger;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Flags shared by the server and the one-shot fetch tool.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    #[arg(long, short = 'c', help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the Oura API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "HTTP request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub oura: OuraConfig,
    pub log_level: Option<String>,
}

impl ConnectionArgs {
    /// Layers defaults, then the optional file (or `OURA_API_KEY`), then flags.
    pub fn load(&self) -> Result<LoadedConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut oura = file.to_oura_config();
        if let Some(base_url) = &self.base_url {
            oura.base_url = base_url.clone();
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            oura.timeout_seconds = timeout_seconds;
        }

        Ok(LoadedConfig {
            oura,
            log_level: file.log_level().map(str::to_string),
        })
    }

    /// Starts the stderr logger. `-v` and `RUST_LOG` win over `[logging] level`.
    pub fn init_logging(&self, loaded: Option<&LoadedConfig>) {
        let level = loaded.and_then(|l| l.log_level.as_deref());
        if self.json_logs {
            logger::init_json_logger(self.verbose, level);
        } else {
            logger::init_cli_logger(self.verbose, level);
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "oura-mcp")]
#[command(about = "MCP server exposing Oura Ring daily sleep data over stdio", version)]
pub struct CliConfig {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}
