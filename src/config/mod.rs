pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";
pub const DEFAULT_CHECKER_STATES_PATH: &str = "checker-states";
pub const DEFAULT_STATE_PATH: &str = "state";
pub const DEFAULT_HEALTH_PATH: &str = "health";
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full dashboard state as JSON, including per-request status
    #[default]
    Json,
    /// Only the loaded data, as `{"all": ..., "alerts": ...}`
    Holder,
    /// Per-group column listing
    Summary,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "monitor-dash")]
#[command(about = "Load checker states and alerts from a monitoring backend")]
pub struct CliConfig {
    /// Backend base URL; endpoint paths are resolved relative to it
    #[arg(long, env = "MONITOR_DASH_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// TOML configuration file (takes precedence over the backend flags)
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_CHECKER_STATES_PATH)]
    pub checker_states_path: String,

    #[arg(long, default_value = DEFAULT_STATE_PATH)]
    pub state_path: String,

    #[arg(long, default_value = DEFAULT_HEALTH_PATH)]
    pub health_path: String,

    /// Client-side timeout per request
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format [default: json]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Check the backend health endpoint before loading
    #[arg(long)]
    pub health: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

/// Where the rendered dashboard goes and in which format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub path: Option<String>,
    pub format: OutputFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Command line flags take precedence over the TOML `[output]` section.
    pub fn output_settings(&self, file: Option<&toml_config::TomlConfig>) -> OutputSettings {
        OutputSettings {
            path: self
                .output
                .clone()
                .or_else(|| file.and_then(|f| f.output_path()).map(str::to_string)),
            format: self
                .format
                .or_else(|| file.and_then(|f| f.output_format()))
                .unwrap_or_default(),
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn checker_states_path(&self) -> &str {
        &self.checker_states_path
    }

    fn state_path(&self) -> &str {
        &self.state_path
    }

    fn health_path(&self) -> &str {
        &self.health_path
    }

    fn request_timeout(&self) -> Option<std::time::Duration> {
        self.timeout_seconds.map(std::time::Duration::from_secs)
    }
}

#[cfg(feature = "cli")]
impl validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_backend(self)?;
        if let Some(output) = &self.output {
            validation::validate_output_path("output", output)?;
        }
        Ok(())
    }
}

/// Checks shared by every `ConfigProvider`.
pub fn validate_backend<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_base_url("base_url", config.base_url())?;
    validation::validate_endpoint_path("checker_states_path", config.checker_states_path())?;
    validation::validate_endpoint_path("state_path", config.state_path())?;
    validation::validate_endpoint_path("health_path", config.health_path())?;
    if let Some(timeout) = config.request_timeout() {
        validation::validate_range("timeout_seconds", timeout.as_secs(), 1, MAX_TIMEOUT_SECONDS)?;
    }
    Ok(())
}
