use crate::core::columns::build_checker_states;
use crate::core::request::fetch_checked;
use crate::domain::model::{CheckerStates, LoadOutcome, RawCheckerStates};
use crate::domain::ports::Fetcher;
use crate::utils::error::Result;
use std::sync::Arc;

/// Loads the `checker-states` snapshot and derives per-group column presence.
pub struct StateLoader<F: Fetcher> {
    fetcher: Arc<F>,
    path: String,
}

impl<F: Fetcher> StateLoader<F> {
    pub fn new(fetcher: Arc<F>, path: impl Into<String>) -> Self {
        Self {
            fetcher,
            path: path.into(),
        }
    }

    /// A failed request is reported as `LoadOutcome::Failed`. A body that is
    /// not a map of group name to entry list is an error.
    pub async fn load(&self) -> Result<LoadOutcome<CheckerStates>> {
        let response = match fetch_checked(self.fetcher.as_ref(), &self.path).await? {
            Ok(response) => response,
            Err(failure) => return Ok(failure.into_outcome()),
        };

        let raw: RawCheckerStates = response.json(&self.path)?;
        tracing::debug!("Received {} checker groups", raw.len());

        Ok(LoadOutcome::Loaded(build_checker_states(raw)))
    }
}
