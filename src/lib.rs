pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ConnectionArgs, LoadedConfig};

pub use config::OuraConfig;
pub use core::fetcher::SleepDataFetcher;
pub use domain::model::{ApiToken, DateRange};
pub use server::OuraMcpServer;
pub use utils::error::{OuraError, Result};
