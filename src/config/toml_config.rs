use crate::config::{
    validate_backend, OutputFormat, DEFAULT_CHECKER_STATES_PATH, DEFAULT_HEALTH_PATH,
    DEFAULT_STATE_PATH,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub backend: BackendConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub checker_states_path: Option<String>,
    pub state_path: Option<String>,
    pub health_path: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub format: Option<OutputFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MONITOR_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.backend.base_url
    }

    fn checker_states_path(&self) -> &str {
        self.backend
            .checker_states_path
            .as_deref()
            .unwrap_or(DEFAULT_CHECKER_STATES_PATH)
    }

    fn state_path(&self) -> &str {
        self.backend.state_path.as_deref().unwrap_or(DEFAULT_STATE_PATH)
    }

    fn health_path(&self) -> &str {
        self.backend.health_path.as_deref().unwrap_or(DEFAULT_HEALTH_PATH)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.backend.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_backend(self)?;
        if let Some(path) = self.output_path() {
            validation::validate_output_path("output.path", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_default_paths() {
        let toml_content = r#"
[backend]
base_url = "http://monitor.example:8080/"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "http://monitor.example:8080/");
        assert_eq!(config.checker_states_path(), "checker-states");
        assert_eq!(config.state_path(), "state");
        assert_eq!(config.health_path(), "health");
        assert_eq!(config.request_timeout(), None);
        assert!(config.output_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
base_url = "https://monitor.example/dash/"
checker_states_path = "api/checker-states"
state_path = "api/state"
health_path = "api/health"
request_timeout_seconds = 15

[output]
path = "./snapshots/latest.json"
format = "summary"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.checker_states_path(), "api/checker-states");
        assert_eq!(config.state_path(), "api/state");
        assert_eq!(config.health_path(), "api/health");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.output_path(), Some("./snapshots/latest.json"));
        assert_eq!(config.output_format(), Some(OutputFormat::Summary));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MONITOR_DASH_TEST_HOST", "https://mon.test.example");

        let toml_content = r#"
[backend]
base_url = "${MONITOR_DASH_TEST_HOST}/"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://mon.test.example/");

        std::env::remove_var("MONITOR_DASH_TEST_HOST");
    }

    #[test]
    fn test_unset_env_var_left_in_place() {
        let toml_content = r#"
[backend]
base_url = "${MONITOR_DASH_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "${MONITOR_DASH_SURELY_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[backend]
base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_backend_section_is_parse_error() {
        let result = TomlConfig::from_toml_str("[output]\npath = \"x.json\"\n");
        assert!(matches!(
            result,
            Err(DashError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[backend]
base_url = "http://localhost:8080/"
request_timeout_seconds = 5
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }
}
