use crate::core::request::fetch_checked;
use crate::domain::model::{AlertsSummary, LoadOutcome};
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;
use std::sync::Arc;

/// Loads the alert summary from the `state` endpoint.
pub struct AlertsLoader<F: Fetcher> {
    fetcher: Arc<F>,
    path: String,
}

impl<F: Fetcher> AlertsLoader<F> {
    pub fn new(fetcher: Arc<F>, path: impl Into<String>) -> Self {
        Self {
            fetcher,
            path: path.into(),
        }
    }

    pub async fn load(&self) -> Result<LoadOutcome<AlertsSummary>> {
        let response = match fetch_checked(self.fetcher.as_ref(), &self.path).await? {
            Ok(response) => response,
            Err(failure) => return Ok(failure.into_outcome()),
        };

        // 只取 alerts，其他欄位一律忽略
        let mut state = response.json_object(&self.path)?;
        let alerts = AlertsSummary(
            state
                .remove("alerts")
                .unwrap_or(serde_json::Value::Null),
        );
        if let Some(count) = alerts.count() {
            tracing::debug!("Received {} alerts", count);
        }

        Ok(LoadOutcome::Loaded(alerts))
    }
}
