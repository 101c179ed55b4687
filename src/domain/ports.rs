use crate::utils::error::{DashError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn checker_states_path(&self) -> &str;
    fn state_path(&self) -> &str;
    fn health_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| DashError::MalformedBody {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Decode a body that must be a JSON object. Arrays and scalars are
    /// rejected rather than matched against fields by position.
    pub fn json_object(&self, endpoint: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
        match self.json::<serde_json::Value>(endpoint)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(DashError::MalformedBody {
                endpoint: endpoint.to_string(),
                source: serde::de::Error::custom(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// A GET against the dashboard backend. Transport failures are `Err`;
/// any HTTP status, including errors, comes back as `Ok`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<FetchResponse>;
}
