use crate::config::toml_config::{TomlConfig, LOG_LEVELS, OUTPUT_FORMATS};
use crate::config::DEFAULT_API_ENDPOINT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_positive_number, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "cat-roster")]
#[command(about = "Lists cats from a people feed, grouped by owner gender")]
pub struct CliConfig {
    /// URL of the people feed (default: the public AGL feed)
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Path to a TOML configuration file; flags take precedence over it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Fills every option not given on the command line from `file`.
    pub fn apply_file(&mut self, file: &TomlConfig) {
        if self.api_endpoint.is_none() {
            self.api_endpoint = Some(file.source.endpoint.clone());
        }
        if self.timeout_seconds.is_none() {
            self.timeout_seconds = file.source.timeout_seconds;
        }
        if self.format.is_none() {
            self.format = file
                .display
                .as_ref()
                .and_then(|d| d.format.clone());
        }
        if self.log_level.is_none() {
            self.log_level = file.log_level().map(str::to_string);
        }
        self.json_logs |= file.json_logs();
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn output_format(&self) -> &str {
        self.format.as_deref().unwrap_or(OUTPUT_FORMATS[0])
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", self.api_endpoint())?;
        validate_one_of("format", self.output_format(), &OUTPUT_FORMATS)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        if let Some(level) = self.log_level.as_deref() {
            validate_one_of("log_level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}
