use crate::core::request::fetch_checked;
use crate::domain::model::{HealthStatus, LoadOutcome};
use crate::domain::ports::Fetcher;
use crate::utils::error::{DashError, Result};
use std::sync::Arc;

/// Checks the backend's `health` endpoint, which answers `{"health": "ok"}`.
pub struct HealthCheck<F: Fetcher> {
    fetcher: Arc<F>,
    path: String,
}

impl<F: Fetcher> HealthCheck<F> {
    pub fn new(fetcher: Arc<F>, path: impl Into<String>) -> Self {
        Self {
            fetcher,
            path: path.into(),
        }
    }

    pub async fn check(&self) -> Result<LoadOutcome<HealthStatus>> {
        let response = match fetch_checked(self.fetcher.as_ref(), &self.path).await? {
            Ok(response) => response,
            Err(failure) => return Ok(failure.into_outcome()),
        };

        let body = response.json_object(&self.path)?;
        let status: HealthStatus = serde_json::from_value(serde_json::Value::Object(body))
            .map_err(|source| DashError::MalformedBody {
                endpoint: self.path.clone(),
                source,
            })?;
        if !status.is_ok() {
            tracing::warn!("Backend reports health '{}'", status.health);
        }
        Ok(LoadOutcome::Loaded(status))
    }
}
