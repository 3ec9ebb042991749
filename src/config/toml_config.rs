use crate::config::{
    validate_provider, DEFAULT_CQ_ENDPOINT, DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_PATH,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, DEFAULT_WIKIDATA_ENDPOINT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: Option<PipelineConfig>,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_cq_endpoint")]
    pub cq_endpoint: String,
    #[serde(default = "default_wikidata_endpoint")]
    pub wikidata_endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub concurrent_queries: Option<bool>,
    pub ordered: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_cq_endpoint() -> String {
    DEFAULT_CQ_ENDPOINT.to_string()
}

fn default_wikidata_endpoint() -> String {
    DEFAULT_WIKIDATA_ENDPOINT.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            cq_endpoint: default_cq_endpoint(),
            wikidata_endpoint: default_wikidata_endpoint(),
            timeout_seconds: None,
            user_agent: None,
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            filename: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WIKIDATA_ENDPOINT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(pipeline) = &self.pipeline {
            if pipeline.name.trim().is_empty() {
                return Err(EtlError::MissingConfigError {
                    field: "pipeline.name".to_string(),
                });
            }
        }
        validate_provider(self, "source.", "load.")
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn pipeline_name(&self) -> &str {
        self.pipeline
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("movie-langues")
    }
}

impl ConfigProvider for TomlConfig {
    fn cq_endpoint(&self) -> &str {
        &self.source.cq_endpoint
    }

    fn wikidata_endpoint(&self) -> &str {
        &self.source.wikidata_endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_file(&self) -> &str {
        self.load.filename.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn user_agent(&self) -> &str {
        self.source.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn concurrent_queries(&self) -> bool {
        self.extract.concurrent_queries.unwrap_or(false)
    }

    fn ordered_queries(&self) -> bool {
        self.extract.ordered.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
