use thiserror::Error;

#[derive(Error, Debug)]
pub enum OuraError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid date for {field}: {value} (expected YYYY-MM-DD)")]
    InvalidDateError { field: String, value: String },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Failed to decode upstream response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Upstream,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for the binaries.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 請求錯誤
            ErrorSeverity::Critical => 3, // 配置或系統錯誤
        }
    }
}

impl OuraError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OuraError::ConfigError { .. }
            | OuraError::MissingConfigError { .. }
            | OuraError::InvalidConfigValueError { .. }
            | OuraError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            OuraError::InvalidDateError { .. } => ErrorCategory::Input,
            OuraError::TransportError(_) => ErrorCategory::Network,
            OuraError::UpstreamError { .. } => ErrorCategory::Upstream,
            OuraError::DecodeError(_) => ErrorCategory::Data,
            OuraError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Upstream => match self {
                // 429 and 5xx are worth trying again later
                OuraError::UpstreamError { status, .. } if *status == 429 || *status >= 500 => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Short machine-readable tag, used in MCP error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            OuraError::ConfigError { .. }
            | OuraError::MissingConfigError { .. }
            | OuraError::InvalidConfigValueError { .. }
            | OuraError::ConfigValidationError { .. } => "configuration",
            OuraError::InvalidDateError { .. } => "invalid_date",
            OuraError::TransportError(_) => "transport",
            OuraError::UpstreamError { .. } => "upstream",
            OuraError::DecodeError(_) => "decode",
            OuraError::IoError(_) => "io",
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            OuraError::MissingConfigError { field } if field == "OURA_API_KEY" => {
                "Create a personal access token in the Oura cloud dashboard and export it as OURA_API_KEY".to_string()
            }
            OuraError::ConfigError { .. }
            | OuraError::MissingConfigError { .. }
            | OuraError::InvalidConfigValueError { .. }
            | OuraError::ConfigValidationError { .. } => {
                "Check the command line flags and the configuration file".to_string()
            }
            OuraError::InvalidDateError { .. } => {
                "Pass dates as calendar dates in YYYY-MM-DD format".to_string()
            }
            OuraError::TransportError(e) if e.is_timeout() => {
                "The Oura API did not answer in time; retry or raise --timeout-seconds".to_string()
            }
            OuraError::TransportError(_) => {
                "Check network connectivity and the configured base URL".to_string()
            }
            OuraError::UpstreamError { status: 401, .. } => {
                "The access token was rejected; verify OURA_API_KEY".to_string()
            }
            OuraError::UpstreamError { status: 403, .. } => {
                "The token lacks access to daily sleep data or the subscription has lapsed".to_string()
            }
            OuraError::UpstreamError { status: 429, .. } => {
                "Rate limited by the Oura API; wait before retrying".to_string()
            }
            OuraError::UpstreamError { status, .. } if *status >= 500 => {
                "The Oura API is having trouble; retry later".to_string()
            }
            OuraError::UpstreamError { .. } => {
                "Inspect the upstream response body for details".to_string()
            }
            OuraError::DecodeError(_) => {
                "The upstream response was not valid JSON; check the base URL".to_string()
            }
            OuraError::IoError(_) => "Check file permissions and paths".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OuraError::MissingConfigError { field } => {
                format!("{} is not set", field)
            }
            OuraError::TransportError(_) => {
                "Could not reach the Oura API".to_string()
            }
            OuraError::UpstreamError { status, .. } => {
                format!("The Oura API rejected the request (HTTP {})", status)
            }
            OuraError::DecodeError(_) => "The Oura API returned malformed data".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OuraError>;
