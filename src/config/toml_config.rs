use crate::config::{api_key_from_env, OuraConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::ApiToken;
use crate::utils::error::{OuraError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub oura: OuraSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OuraSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OuraError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| OuraError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OURA_API_KEY})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Token from the file, ignoring placeholders whose variable was unset.
    pub fn file_api_key(&self) -> Option<ApiToken> {
        self.oura
            .api_key
            .as_deref()
            .filter(|key| !env_placeholder().is_match(key))
            .and_then(ApiToken::new)
    }

    pub fn base_url(&self) -> &str {
        self.oura.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.oura.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    /// Resolves the connection settings. The file key wins over `OURA_API_KEY`.
    pub fn to_oura_config(&self) -> OuraConfig {
        OuraConfig {
            api_key: self.file_api_key().or_else(api_key_from_env),
            base_url: self.base_url().to_string(),
            timeout_seconds: self.timeout_seconds(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_oura_config().validate()
    }
}
