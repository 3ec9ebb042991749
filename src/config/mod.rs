pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_output_filename, validate_path, validate_range,
    validate_url,
};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_CQ_ENDPOINT: &str = "http://data.cinematheque.qc.ca/sparql";
pub const DEFAULT_WIKIDATA_ENDPOINT: &str = "https://query.wikidata.org/sparql";
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "movie_langues.csv";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
pub const DEFAULT_USER_AGENT: &str = concat!("movie-langues/", env!("CARGO_PKG_VERSION"));

/// Checks shared by every configuration source. The prefixes are prepended to field
/// names in error messages (TOML section names, empty for CLI flags).
pub(crate) fn validate_provider<C: ConfigProvider + ?Sized>(
    config: &C,
    endpoint_prefix: &str,
    load_prefix: &str,
) -> Result<()> {
    validate_url(
        &format!("{}cq_endpoint", endpoint_prefix),
        config.cq_endpoint(),
    )?;
    validate_url(
        &format!("{}wikidata_endpoint", endpoint_prefix),
        config.wikidata_endpoint(),
    )?;
    validate_range(
        &format!("{}timeout_seconds", endpoint_prefix),
        config.request_timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    validate_non_empty_string(
        &format!("{}user_agent", endpoint_prefix),
        config.user_agent(),
    )?;
    validate_path(&format!("{}output_path", load_prefix), config.output_path())?;
    validate_output_filename(&format!("{}output_file", load_prefix), config.output_file())?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "movie-langues")]
#[command(about = "Export Cinémathèque québécoise films with their Wikidata language to CSV")]
pub struct CliConfig {
    /// SPARQL endpoint of the Cinémathèque québécoise
    #[arg(long, default_value = DEFAULT_CQ_ENDPOINT)]
    pub cq_endpoint: String,

    /// Wikidata SPARQL endpoint
    #[arg(long, default_value = DEFAULT_WIKIDATA_ENDPOINT)]
    pub wikidata_endpoint: String,

    /// Directory the CSV file is written to
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Name of the CSV file, must end in .csv
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Per-request timeout
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// User-Agent header sent with both queries
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Send both SPARQL queries at the same time
    #[arg(long)]
    pub concurrent_queries: bool,

    /// Add ORDER BY to both queries for reproducible output
    #[arg(long)]
    pub ordered: bool,

    /// Load settings from a TOML file; flags set to a non-default value still win
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Log CPU and memory usage per phase
    #[arg(long)]
    pub monitor: bool,

    /// Show configuration and queries without running them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Copies every flag that differs from its default into `config`.
    ///
    /// A flag passed with its default value cannot be told apart from an absent one and
    /// leaves the TOML value in place.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if self.cq_endpoint != DEFAULT_CQ_ENDPOINT {
            config.source.cq_endpoint = self.cq_endpoint.clone();
        }
        if self.wikidata_endpoint != DEFAULT_WIKIDATA_ENDPOINT {
            config.source.wikidata_endpoint = self.wikidata_endpoint.clone();
        }
        if self.timeout_seconds != DEFAULT_TIMEOUT_SECONDS {
            config.source.timeout_seconds = Some(self.timeout_seconds);
        }
        if self.user_agent != DEFAULT_USER_AGENT {
            config.source.user_agent = Some(self.user_agent.clone());
        }
        if self.output_path != DEFAULT_OUTPUT_PATH {
            config.load.output_path = self.output_path.clone();
        }
        if self.output_file != DEFAULT_OUTPUT_FILE {
            config.load.filename = Some(self.output_file.clone());
        }
        if self.concurrent_queries {
            config.extract.concurrent_queries = Some(true);
        }
        if self.ordered {
            config.extract.ordered = Some(true);
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn cq_endpoint(&self) -> &str {
        &self.cq_endpoint
    }

    fn wikidata_endpoint(&self) -> &str {
        &self.wikidata_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn concurrent_queries(&self) -> bool {
        self.concurrent_queries
    }

    fn ordered_queries(&self) -> bool {
        self.ordered
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self, "", "")
    }
}
