use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Malformed response body from '{endpoint}': {source}")]
    MalformedBody {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, DashError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::TransportError(_) => ErrorCategory::Network,
            DashError::MalformedBody { .. } | DashError::SerializationError(_) => {
                ErrorCategory::Data
            }
            DashError::InvalidUrl { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashError::TransportError(_) => {
                "Check that the monitoring backend is running and reachable"
            }
            DashError::MalformedBody { .. } => {
                "The backend returned an unexpected payload; check that its version matches this dashboard"
            }
            DashError::SerializationError(_) => "Inspect the snapshot data for invalid values",
            DashError::IoError(_) => "Check that the output path exists and is writable",
            DashError::InvalidUrl { .. } => {
                "Use an absolute http(s) URL such as http://localhost:8080/"
            }
            DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. } => {
                "Fix the configuration file or command line arguments and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::TransportError(_) => "Could not reach the monitoring backend".to_string(),
            DashError::MalformedBody { endpoint, .. } => {
                format!("The '{}' endpoint returned data in an unexpected shape", endpoint)
            }
            DashError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            DashError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}
