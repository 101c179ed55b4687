use crate::utils::error::{DashError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> DashError {
    DashError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The backend base URL: absolute http(s) with a host. A query or fragment
/// would be dropped when endpoint paths are joined onto it, so both are rejected.
pub fn validate_base_url(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "URL cannot be empty"));
    }

    let url = Url::parse(value)
        .map_err(|e| invalid(field_name, value, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                value,
                format!("Unsupported URL scheme: {}", scheme),
            ))
        }
    }
    if url.host_str().is_none() {
        return Err(invalid(field_name, value, "URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            value,
            "Base URL cannot carry a query or fragment",
        ));
    }

    Ok(())
}

/// An endpoint path resolved against the base URL. It must stay on the
/// backend, so absolute and protocol-relative URLs are rejected.
pub fn validate_endpoint_path(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Endpoint path cannot be empty"));
    }
    if value.starts_with("//") || Url::parse(value).is_ok() {
        return Err(invalid(
            field_name,
            value,
            "Endpoint path must be relative to base_url",
        ));
    }
    Ok(())
}

/// The snapshot file the CLI writes.
pub fn validate_output_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    if path.ends_with('/') || path.ends_with('\\') {
        return Err(invalid(field_name, path, "Path must name a file, not a directory"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("base_url", "https://example.com").is_ok());
        assert!(validate_base_url("base_url", "http://localhost:8080/dash/").is_ok());
        assert!(validate_base_url("base_url", "").is_err());
        assert!(validate_base_url("base_url", "invalid-url").is_err());
        assert!(validate_base_url("base_url", "ftp://example.com").is_err());
        assert!(validate_base_url("base_url", "http://localhost:8080/?token=1").is_err());
        assert!(validate_base_url("base_url", "http://localhost:8080/#top").is_err());
    }

    #[test]
    fn test_validate_endpoint_path() {
        assert!(validate_endpoint_path("state_path", "state").is_ok());
        assert!(validate_endpoint_path("state_path", "api/checker-states").is_ok());
        assert!(validate_endpoint_path("state_path", "/health").is_ok());
        assert!(validate_endpoint_path("state_path", "   ").is_err());
        assert!(validate_endpoint_path("state_path", "https://elsewhere.example/state").is_err());
        assert!(validate_endpoint_path("state_path", "//elsewhere.example/state").is_err());
    }

    #[test]
    fn test_validate_output_path() {
        assert!(validate_output_path("output.path", "./snapshot.json").is_ok());
        assert!(validate_output_path("output.path", "").is_err());
        assert!(validate_output_path("output.path", "bad\0path").is_err());
        assert!(validate_output_path("output.path", "snapshots/").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_seconds", 30u64, 1, 600).is_ok());
        assert!(validate_range("timeout_seconds", 0u64, 1, 600).is_err());
        assert!(validate_range("timeout_seconds", 601u64, 1, 600).is_err());
    }
}
